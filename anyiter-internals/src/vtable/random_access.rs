//! Operation table for random-access cursors.

use core::cmp::Ordering;

use crate::{
    cursor::RandomAccessCursor,
    error::NullIterator,
    storage::{Boxed, Inline, StorageCell, Strategy, fits_inline},
    vtable::bidirectional::BidirectionalVtable,
};

/// Operation table for erased random-access cursors yielding `T`.
///
/// # Safety Invariant
///
/// The four functions of this table were instantiated with the same cursor
/// type and strategy as the functions of `bidirectional`, or all of them are
/// the null versions.
pub struct RandomAccessVtable<T: ?Sized + 'static> {
    /// The bidirectional operations of the same cursor.
    pub(super) bidirectional: BidirectionalVtable<T>,
    /// Moves the cursor in the cell `n` positions forward.
    pub(super) advance_by: unsafe fn(cell: &mut StorageCell, n: usize) -> Result<(), NullIterator>,
    /// Moves the cursor in the cell `n` positions backward.
    pub(super) retreat_by: unsafe fn(cell: &mut StorageCell, n: usize) -> Result<(), NullIterator>,
    /// Returns the signed distance from the cursor of `origin` to that of
    /// `target`.
    pub(super) distance:
        unsafe fn(target: &StorageCell, origin: &StorageCell) -> Result<isize, NullIterator>,
    /// Returns whether the cursor of `lhs` is strictly before that of `rhs`.
    pub(super) lt: unsafe fn(lhs: &StorageCell, rhs: &StorageCell) -> Result<bool, NullIterator>,
}

impl<T: ?Sized + 'static> RandomAccessVtable<T> {
    /// Builds the table for cursor type `I` stored with strategy `S`.
    const fn new<'a, I, S>() -> Self
    where
        I: RandomAccessCursor<'a, Item = T>,
        S: Strategy,
    {
        Self {
            bidirectional: BidirectionalVtable::new::<I, S>(),
            advance_by: advance_by::<I, S>,
            retreat_by: retreat_by::<I, S>,
            distance: distance::<I, S>,
            lt: lt::<I, S>,
        }
    }

    /// Returns the table for cursor type `I`.
    pub(crate) fn of<'a, I>() -> &'static Self
    where
        I: RandomAccessCursor<'a, Item = T>,
    {
        const {
            if fits_inline::<I>() {
                &Self::new::<I, Inline>()
            } else {
                &Self::new::<I, Boxed>()
            }
        }
    }

    /// Returns the bidirectional part of this table.
    #[inline]
    pub(crate) fn bidirectional(&self) -> &BidirectionalVtable<T> {
        &self.bidirectional
    }

    /// Moves the cursor of `cell` `n` positions forward.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. This table is the table of `cell`.
    #[inline]
    pub(crate) unsafe fn advance_by(
        &self,
        cell: &mut StorageCell,
        n: usize,
    ) -> Result<(), NullIterator> {
        // SAFETY: We know that `self.advance_by` points to
        // `advance_by::<I, S>` below, or to the null version. Its safety
        // requirements are upheld:
        // 1. Guaranteed by the caller
        unsafe { (self.advance_by)(cell, n) }
    }

    /// Moves the cursor of `cell` `n` positions backward.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. This table is the table of `cell`.
    #[inline]
    pub(crate) unsafe fn retreat_by(
        &self,
        cell: &mut StorageCell,
        n: usize,
    ) -> Result<(), NullIterator> {
        // SAFETY: We know that `self.retreat_by` points to
        // `retreat_by::<I, S>` below, or to the null version. Its safety
        // requirements are upheld:
        // 1. Guaranteed by the caller
        unsafe { (self.retreat_by)(cell, n) }
    }

    /// Returns the signed number of positions from `origin` to `target`.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. This table is the table of both `target` and `origin`.
    #[inline]
    pub(crate) unsafe fn distance(
        &self,
        target: &StorageCell,
        origin: &StorageCell,
    ) -> Result<isize, NullIterator> {
        // SAFETY: We know that `self.distance` points to `distance::<I, S>`
        // below, or to the null version. Its safety requirements are upheld:
        // 1. Guaranteed by the caller
        unsafe { (self.distance)(target, origin) }
    }

    /// Returns whether the cursor of `lhs` is strictly before that of `rhs`.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. This table is the table of both `lhs` and `rhs`.
    #[inline]
    pub(crate) unsafe fn lt(&self, lhs: &StorageCell, rhs: &StorageCell) -> Result<bool, NullIterator> {
        // SAFETY: We know that `self.lt` points to `lt::<I, S>` below, or to
        // the null version. Its safety requirements are upheld:
        // 1. Guaranteed by the caller
        unsafe { (self.lt)(lhs, rhs) }
    }
}

/// Moves the cursor in `cell` `n` positions forward.
///
/// # Safety
///
/// The caller must ensure:
///
/// 1. `cell` holds a live `I` placed by strategy `S`.
unsafe fn advance_by<'a, I: RandomAccessCursor<'a>, S: Strategy>(
    cell: &mut StorageCell,
    n: usize,
) -> Result<(), NullIterator> {
    // SAFETY:
    // 1. Guaranteed by the caller
    let cursor: &mut I = unsafe { S::get_mut::<I>(cell) };
    cursor.advance_by(n);
    Ok(())
}

/// Moves the cursor in `cell` `n` positions backward.
///
/// # Safety
///
/// The caller must ensure:
///
/// 1. `cell` holds a live `I` placed by strategy `S`.
unsafe fn retreat_by<'a, I: RandomAccessCursor<'a>, S: Strategy>(
    cell: &mut StorageCell,
    n: usize,
) -> Result<(), NullIterator> {
    // SAFETY:
    // 1. Guaranteed by the caller
    let cursor: &mut I = unsafe { S::get_mut::<I>(cell) };
    cursor.retreat_by(n);
    Ok(())
}

/// Returns the signed number of positions from `origin` to `target`.
///
/// # Safety
///
/// The caller must ensure:
///
/// 1. Both cells hold a live `I` placed by strategy `S`.
unsafe fn distance<'a, I: RandomAccessCursor<'a>, S: Strategy>(
    target: &StorageCell,
    origin: &StorageCell,
) -> Result<isize, NullIterator> {
    // SAFETY:
    // 1. Guaranteed by the caller
    let target: &I = unsafe { S::get::<I>(target) };
    // SAFETY:
    // 1. Guaranteed by the caller
    let origin: &I = unsafe { S::get::<I>(origin) };
    Ok(target.distance_from(origin))
}

/// Returns whether the cursor of `lhs` is strictly before that of `rhs`.
///
/// # Safety
///
/// The caller must ensure:
///
/// 1. Both cells hold a live `I` placed by strategy `S`.
unsafe fn lt<'a, I: RandomAccessCursor<'a>, S: Strategy>(
    lhs: &StorageCell,
    rhs: &StorageCell,
) -> Result<bool, NullIterator> {
    // SAFETY:
    // 1. Guaranteed by the caller
    let lhs: &I = unsafe { S::get::<I>(lhs) };
    // SAFETY:
    // 1. Guaranteed by the caller
    let rhs: &I = unsafe { S::get::<I>(rhs) };
    Ok(lhs.partial_cmp(rhs) == Some(Ordering::Less))
}
