//! Iterator levels.
//!
//! A level is a marker type naming the operations an
//! [`AnyIterator`](crate::AnyIterator) supports. Levels form a chain:
//!
//! - [`Forward`]: dereference, advance, equality
//! - [`Bidirectional`]: everything [`Forward`] has, plus retreat
//! - [`RandomAccess`]: everything [`Bidirectional`] has, plus jumps,
//!   distances and ordering
//!
//! A cursor can be erased at its own level or any lower one, and an erased
//! iterator can be narrowed to any lower level. The reverse directions are
//! rejected at compile time.
//!
//! The [`Level`], [`BidirectionalLevel`], [`NarrowTo`] and [`Erasable`]
//! traits are sealed or blanket-implemented. They appear in bounds, and
//! cannot be implemented outside this crate.

pub use anyiter_internals::level::{
    Bidirectional, BidirectionalLevel, Erasable, Forward, Level, NarrowTo, RandomAccess,
};
