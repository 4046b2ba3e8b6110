#![no_std]
#![forbid(
    missing_docs,
    clippy::alloc_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::std_instead_of_core,
    clippy::missing_safety_doc,
    clippy::missing_docs_in_private_items,
    clippy::undocumented_unsafe_blocks,
    clippy::multiple_unsafe_ops_per_block,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::broken_intra_doc_links,
    missing_copy_implementations,
    unused_doc_comments
)]
#![allow(rustdoc::private_intra_doc_links)]
//! Internal implementation crate for [`anyiter`].
//!
//! # Overview
//!
//! This crate contains the low-level, type-erased storage and the unsafe
//! operation tables that power the [`anyiter`] type-erased iterators.
//!
//! **This crate is an implementation detail.** No semantic versioning
//! guarantees are provided. Users should depend on the [`anyiter`] crate, not
//! this one.
//!
//! # Architecture
//!
//! - **[`cursor`]**: The traits concrete cursor types implement, one per
//!   capability level.
//! - **[`level`]**: Zero-sized level markers, and the traits mapping a level
//!   to its operation table.
//! - **[`vtable`]**: One operation table type per level. Each table embeds the
//!   table of the level below it, and a single null table serves all levels.
//! - **Storage**: A one-word cell holding the cursor inline when it fits, or
//!   a pointer to a boxed cursor otherwise. See [`fits_inline`] and
//!   [`Storage`].
//! - **[`RawIterator`]**: An owned table/cell pair with a safe API for
//!   everything but cross-iterator comparisons.
//!
//! # Safety Strategy
//!
//! An erased cursor is a bag of bytes; the only thing that knows what those
//! bytes mean is the operation table stored next to them. Safety rests on
//! never letting the two drift apart:
//!
//! - **Module-based encapsulation**: The table and the cell of a
//!   [`RawIterator`] are private to one module, and every method that changes
//!   one updates the other in the same step.
//! - **Compile-time tables**: A table is built for exactly one cursor type and
//!   one storage strategy, and the strategy is chosen by the same
//!   [`fits_inline`] test that chooses how the cursor is stored.
//! - **Documented table contracts**: Each table method specifies exactly when
//!   it can be called. Comparisons between two iterators additionally require
//!   them to share a table, which is why they are `unsafe` at this level.
//!
//! [`anyiter`]: https://docs.rs/anyiter/latest/anyiter/

extern crate alloc;

pub mod cursor;
mod error;
pub mod level;
mod raw;
mod storage;
pub mod vtable;

pub use self::{
    error::NullIterator,
    raw::RawIterator,
    storage::{INLINE_ALIGN, INLINE_SIZE, Storage, fits_inline},
};
