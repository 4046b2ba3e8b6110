//! Operation tables for erased cursors.
//!
//! Each capability level has its own table type, and each table embeds the
//! table of the level below it:
//!
//! - [`ForwardVtable`]: lifecycle operations, dereference, advance, equality
//! - [`BidirectionalVtable`]: a forward table plus retreat
//! - [`RandomAccessVtable`]: a bidirectional table plus jumps, distance and
//!   ordering
//!
//! Tables are `'static` and built at compile time, one per cursor type and
//! element type. The types are public so they can appear in
//! [`Level::Vtable`](crate::level::Level::Vtable), but their fields and
//! constructors are private to this crate.
//!
//! The table of a null iterator is described in the [`null`] module.

mod bidirectional;
mod forward;
mod null;
mod random_access;

pub use self::{
    bidirectional::BidirectionalVtable, forward::ForwardVtable,
    random_access::RandomAccessVtable,
};
