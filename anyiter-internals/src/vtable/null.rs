//! The operation table of the null state.
//!
//! There is one null table per element type. It is a full
//! [`RandomAccessVtable`], and the null tables of the lower levels are its
//! embedded parts, so narrowing a null iterator yields a null iterator.
//!
//! Copying, relocating and destroying are no-ops, since a null cell holds
//! nothing. Assigning destroys the destination, which leaves it null. Every
//! other operation fails with [`NullIterator`].

use core::ptr::NonNull;

use crate::{
    error::NullIterator,
    storage::{Storage, StorageCell},
    vtable::{BidirectionalVtable, ForwardVtable, RandomAccessVtable},
};

impl<T: ?Sized + 'static> RandomAccessVtable<T> {
    /// Returns the null table for element type `T`.
    pub(crate) fn null() -> &'static Self {
        const {
            &RandomAccessVtable {
                bidirectional: BidirectionalVtable {
                    forward: ForwardVtable {
                        type_name: type_name,
                        storage: Storage::Null,
                        copy,
                        relocate,
                        assign: assign::<T>,
                        destroy,
                        get: get::<T>,
                        advance: step,
                        post_advance: post_step,
                        eq: compare,
                    },
                    retreat: step,
                    post_retreat: post_step,
                },
                advance_by: jump,
                retreat_by: jump,
                distance,
                lt: compare,
            }
        }
    }
}

impl<T: ?Sized + 'static> BidirectionalVtable<T> {
    /// Returns the null table for element type `T`.
    #[inline]
    pub(crate) fn null() -> &'static Self {
        &RandomAccessVtable::null().bidirectional
    }
}

impl<T: ?Sized + 'static> ForwardVtable<T> {
    /// Returns the null table for element type `T`.
    #[inline]
    pub(crate) fn null() -> &'static Self {
        &BidirectionalVtable::null().forward
    }
}

/// The null table has no cursor type.
fn type_name() -> &'static str {
    "null"
}

/// Nothing to copy.
unsafe fn copy(_dst: &mut StorageCell, _src: &StorageCell) {}

/// Nothing to move.
unsafe fn relocate(_dst: &mut StorageCell, _src: &mut StorageCell) {}

/// Destroys the destination, leaving it null.
///
/// # Safety
///
/// The caller must ensure:
///
/// 1. `dst_vtable` is the table of `dst`.
unsafe fn assign<T: ?Sized + 'static>(
    dst_vtable: &ForwardVtable<T>,
    dst: &mut StorageCell,
    _src: &StorageCell,
) {
    // SAFETY:
    // 1. Guaranteed by the caller
    // 2. The caller treats the null table as the table of `dst` afterwards
    unsafe { dst_vtable.destroy(dst) }
}

/// Nothing to drop.
unsafe fn destroy(_cell: &mut StorageCell) {}

/// There is no element to dereference.
unsafe fn get<T: ?Sized + 'static>(_cell: &StorageCell) -> Result<NonNull<T>, NullIterator> {
    Err(NullIterator)
}

/// There is no cursor to move.
unsafe fn step(_cell: &mut StorageCell) -> Result<(), NullIterator> {
    Err(NullIterator)
}

/// There is no cursor to copy and move.
unsafe fn post_step(_dst: &mut StorageCell, _src: &mut StorageCell) -> Result<(), NullIterator> {
    Err(NullIterator)
}

/// There is no cursor to move.
unsafe fn jump(_cell: &mut StorageCell, _n: usize) -> Result<(), NullIterator> {
    Err(NullIterator)
}

/// There is no cursor to compare.
unsafe fn compare(_lhs: &StorageCell, _rhs: &StorageCell) -> Result<bool, NullIterator> {
    Err(NullIterator)
}

/// There is no cursor to measure from.
unsafe fn distance(_target: &StorageCell, _origin: &StorageCell) -> Result<isize, NullIterator> {
    Err(NullIterator)
}
