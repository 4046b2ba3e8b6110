//! Operation table for bidirectional cursors.
//!
//! A [`BidirectionalVtable`] embeds a complete [`ForwardVtable`], so a
//! reference to its `forward` field is a valid forward table for the same
//! cursor type. This is what makes narrowing an erased iterator free.

use crate::{
    cursor::BidirectionalCursor,
    error::NullIterator,
    storage::{Boxed, Inline, StorageCell, Strategy, fits_inline},
    vtable::forward::{self, ForwardVtable},
};

/// Operation table for erased bidirectional cursors yielding `T`.
///
/// # Safety Invariant
///
/// `retreat` and `post_retreat` were instantiated with the same cursor type
/// and strategy as the functions of `forward`, or all of them are the null
/// versions.
pub struct BidirectionalVtable<T: ?Sized + 'static> {
    /// The forward operations of the same cursor.
    pub(super) forward: ForwardVtable<T>,
    /// Moves the cursor in the cell one position backward.
    pub(super) retreat: unsafe fn(cell: &mut StorageCell) -> Result<(), NullIterator>,
    /// Clones the cursor of `src` into the vacant `dst`, then retreats `src`.
    pub(super) post_retreat:
        unsafe fn(dst: &mut StorageCell, src: &mut StorageCell) -> Result<(), NullIterator>,
}

impl<T: ?Sized + 'static> BidirectionalVtable<T> {
    /// Builds the table for cursor type `I` stored with strategy `S`.
    pub(super) const fn new<'a, I, S>() -> Self
    where
        I: BidirectionalCursor<'a, Item = T>,
        S: Strategy,
    {
        Self {
            forward: ForwardVtable::new::<I, S>(),
            retreat: retreat::<I, S>,
            post_retreat: post_retreat::<I, S>,
        }
    }

    /// Returns the table for cursor type `I`.
    pub(crate) fn of<'a, I>() -> &'static Self
    where
        I: BidirectionalCursor<'a, Item = T>,
    {
        const {
            if fits_inline::<I>() {
                &Self::new::<I, Inline>()
            } else {
                &Self::new::<I, Boxed>()
            }
        }
    }

    /// Returns the forward part of this table.
    #[inline]
    pub(crate) fn forward(&self) -> &ForwardVtable<T> {
        &self.forward
    }

    /// Moves the cursor of `cell` one position backward.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. This table is the table of `cell`.
    #[inline]
    pub(crate) unsafe fn retreat(&self, cell: &mut StorageCell) -> Result<(), NullIterator> {
        // SAFETY: We know that `self.retreat` points to `retreat::<I, S>`
        // below, or to the null version. Its safety requirements are upheld:
        // 1. Guaranteed by the caller
        unsafe { (self.retreat)(cell) }
    }

    /// Clones the cursor of `src` into `dst` and retreats `src`.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. This table is the table of `src`.
    /// 2. `dst` is vacant. On success it holds a cursor of this table; on
    ///    failure it is still vacant.
    #[inline]
    pub(crate) unsafe fn post_retreat(
        &self,
        dst: &mut StorageCell,
        src: &mut StorageCell,
    ) -> Result<(), NullIterator> {
        // SAFETY: We know that `self.post_retreat` points to
        // `post_retreat::<I, S>` below, or to the null version. Its safety
        // requirements are upheld:
        // 1. Guaranteed by the caller
        // 2. Guaranteed by the caller
        unsafe { (self.post_retreat)(dst, src) }
    }
}

/// Moves the cursor in `cell` one position backward.
///
/// # Safety
///
/// The caller must ensure:
///
/// 1. `cell` holds a live `I` placed by strategy `S`.
unsafe fn retreat<'a, I: BidirectionalCursor<'a>, S: Strategy>(
    cell: &mut StorageCell,
) -> Result<(), NullIterator> {
    // SAFETY:
    // 1. Guaranteed by the caller
    let cursor: &mut I = unsafe { S::get_mut::<I>(cell) };
    cursor.retreat();
    Ok(())
}

/// Clones the cursor of `src` into `dst`, then retreats `src`.
///
/// # Safety
///
/// The caller must ensure:
///
/// 1. `src` holds a live `I` placed by strategy `S`.
/// 2. `dst` is vacant.
unsafe fn post_retreat<'a, I: BidirectionalCursor<'a>, S: Strategy>(
    dst: &mut StorageCell,
    src: &mut StorageCell,
) -> Result<(), NullIterator> {
    // SAFETY:
    // 1. Guaranteed by the caller
    // 2. Guaranteed by the caller
    unsafe { forward::copy::<I, S>(dst, src) };
    // SAFETY:
    // 1. Guaranteed by the caller
    unsafe { retreat::<I, S>(src) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::ForwardCursor;

    #[derive(Clone, PartialEq)]
    struct Countdown(u32);

    impl ForwardCursor<'static> for Countdown {
        type Item = str;

        fn get(&self) -> &'static str {
            "tick"
        }

        fn advance(&mut self) {
            self.0 -= 1;
        }
    }

    impl BidirectionalCursor<'static> for Countdown {
        fn retreat(&mut self) {
            self.0 += 1;
        }
    }

    #[test]
    fn test_bidirectional_vtable_embeds_forward_table() {
        let vtable = BidirectionalVtable::<str>::of::<Countdown>();
        assert_eq!(
            vtable.forward().type_name(),
            Some(core::any::type_name::<Countdown>())
        );
        assert!(core::ptr::eq(
            vtable,
            BidirectionalVtable::<str>::of::<Countdown>()
        ));
    }

    #[test]
    fn test_bidirectional_vtable_post_retreat() {
        let vtable = BidirectionalVtable::<str>::of::<Countdown>();
        let mut cell = StorageCell::vacant();
        let mut copy = StorageCell::vacant();

        // SAFETY: `cell` is vacant.
        unsafe { crate::storage::store(&mut cell, Countdown(5)) };
        // SAFETY: `vtable` is the table of `cell`, `copy` is vacant.
        unsafe { vtable.post_retreat(&mut copy, &mut cell) }.unwrap();

        // SAFETY: `cell` holds an inline `Countdown`.
        assert_eq!(unsafe { Inline::get::<Countdown>(&cell) }.0, 6);
        // SAFETY: `copy` holds an inline `Countdown`.
        assert_eq!(unsafe { Inline::get::<Countdown>(&copy) }.0, 5);

        // SAFETY: `vtable` is the table of `cell`.
        unsafe { vtable.retreat(&mut cell) }.unwrap();
        // SAFETY: `cell` holds an inline `Countdown`.
        assert_eq!(unsafe { Inline::get::<Countdown>(&cell) }.0, 7);

        // SAFETY: `vtable` is the table of `copy`, which is not used again.
        unsafe { vtable.forward().destroy(&mut copy) };
        // SAFETY: `vtable` is the table of `cell`, which is not used again.
        unsafe { vtable.forward().destroy(&mut cell) };
    }
}
