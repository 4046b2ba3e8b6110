#![cfg_attr(not(doc), no_std)]
#![deny(
    missing_docs,
    clippy::alloc_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::std_instead_of_core,
    clippy::missing_safety_doc,
    clippy::undocumented_unsafe_blocks,
    clippy::multiple_unsafe_ops_per_block,
    clippy::as_ptr_cast_mut,
    clippy::ptr_as_ptr,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::broken_intra_doc_links,
    missing_copy_implementations,
    unused_doc_comments
)]
// Make docs.rs generate better docs
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Type-erased iterators with forward, bidirectional and random-access
//! capability levels.
//!
//! ## Overview
//!
//! [`AnyIterator`] wraps any cursor type behind one concrete type, so code
//! can accept "some iterator over `T`" without being generic over the
//! cursor. Unlike `Box<dyn Iterator>`, an erased iterator is a *position*:
//! it can be copied, compared with another position, and moved back and
//! forth when its level allows it.
//!
//! - **Levels**: [`Forward`](category::Forward),
//!   [`Bidirectional`](category::Bidirectional) and
//!   [`RandomAccess`](category::RandomAccess) select the available
//!   operations at compile time. Higher levels convert to lower ones.
//! - **Small-buffer storage**: cursors that fit in a pointer-sized slot are
//!   stored inline. Larger ones are boxed. See [`fits_inline`].
//! - **Null state**: an [`empty`](AnyIterator::empty) iterator holds no
//!   cursor, and every operation on it fails with [`Error::Empty`].
//! - **Checked comparisons**: comparing iterators that hold different cursor
//!   types fails with [`Error::Mismatched`].
//!
//! ## Quick Example
//!
//! ```
//! use anyiter::{AnyRandomAccessIterator, SliceCursor};
//!
//! fn middle<'a>(
//!     begin: &AnyRandomAccessIterator<'a, i32>,
//!     end: &AnyRandomAccessIterator<'a, i32>,
//! ) -> Result<&'a i32, anyiter::Error> {
//!     let half = end.distance_from(begin)? / 2;
//!     begin.at(half)
//! }
//!
//! let numbers = [1, 2, 3, 4, 5];
//! let begin = AnyRandomAccessIterator::new(SliceCursor::begin(&numbers));
//! let end = AnyRandomAccessIterator::new(SliceCursor::end(&numbers));
//! assert_eq!(middle(&begin, &end), Ok(&3));
//! ```
//!
//! ## Writing cursors
//!
//! A cursor is a small value implementing
//! [`ForwardCursor`](cursor::ForwardCursor), and optionally
//! [`BidirectionalCursor`](cursor::BidirectionalCursor) and
//! [`RandomAccessCursor`](cursor::RandomAccessCursor). The [`cursors`]
//! module has ready-made cursors over slices and reversed sequences.
//!
//! ## Iterating
//!
//! [`AnyRange`] pairs a beginning and an end iterator into a Rust
//! [`Iterator`], and a [`DoubleEndedIterator`] when the level is at least
//! bidirectional.
//!
//! ## Diagnostics
//!
//! Failed operations emit a `tracing` debug event carrying the error, and
//! erasing or narrowing an iterator emits a trace event.
//!
//! ## Features
//!
//! - `std`: enables the `std` features of `thiserror` and `tracing`.

extern crate alloc;

mod any_iterator;
pub mod category;
pub mod cursors;
mod error;
mod range;

pub use anyiter_internals::cursor;

pub use self::{
    any_iterator::AnyIterator,
    cursors::{Reversed, SliceCursor, slice_bounds},
    error::{Error, Operation},
    range::AnyRange,
};
pub use anyiter_internals::{INLINE_ALIGN, INLINE_SIZE, Storage, fits_inline};

/// An erased iterator at the forward level.
pub type AnyForwardIterator<'a, T> = AnyIterator<'a, T, category::Forward>;

/// An erased iterator at the bidirectional level.
pub type AnyBidirectionalIterator<'a, T> = AnyIterator<'a, T, category::Bidirectional>;

/// An erased iterator at the random-access level.
pub type AnyRandomAccessIterator<'a, T> = AnyIterator<'a, T, category::RandomAccess>;
