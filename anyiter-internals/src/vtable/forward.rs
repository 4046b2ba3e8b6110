//! Operation table for forward cursors.
//!
//! This module encapsulates the fields of [`ForwardVtable`] so they cannot be
//! accessed directly. This visibility restriction guarantees the safety
//! invariant: **the functions in a table are instantiated with the cursor
//! type and storage strategy of the cell they are applied to**.
//!
//! # Safety Invariant
//!
//! Real tables are only created through [`ForwardVtable::of`], which pairs the
//! function pointers with one cursor type `I` and the strategy that
//! [`fits_inline`] selects for it. The null table is created in
//! [`null`](super::null) and never touches a cell.

use core::ptr::NonNull;

use crate::{
    cursor::ForwardCursor,
    error::NullIterator,
    storage::{Boxed, Inline, Storage, StorageCell, Strategy, fits_inline},
};

/// Operation table for erased forward cursors yielding `T`.
///
/// # Safety Invariant
///
/// Unless `storage` is [`Storage::Null`], every function pointer was
/// instantiated with the same cursor type `I: ForwardCursor<'_, Item = T>` and
/// the same strategy `S`, where `S::STORAGE == storage`.
pub struct ForwardVtable<T: ?Sized + 'static> {
    /// Returns the [`core::any::type_name`] of the cursor type.
    pub(super) type_name: fn() -> &'static str,
    /// How cells paired with this table hold their cursor.
    pub(super) storage: Storage,
    /// Clones the cursor of `src` into the vacant `dst`.
    pub(super) copy: unsafe fn(dst: &mut StorageCell, src: &StorageCell),
    /// Moves the cursor of `src` into the vacant `dst`.
    pub(super) relocate: unsafe fn(dst: &mut StorageCell, src: &mut StorageCell),
    /// Replaces the contents of `dst`, destroyed using the given table, with a
    /// clone of the cursor in `src`.
    pub(super) assign: unsafe fn(
        dst_vtable: &ForwardVtable<T>,
        dst: &mut StorageCell,
        src: &StorageCell,
    ),
    /// Drops the cursor in the cell.
    pub(super) destroy: unsafe fn(cell: &mut StorageCell),
    /// Dereferences the cursor in the cell.
    pub(super) get: unsafe fn(cell: &StorageCell) -> Result<NonNull<T>, NullIterator>,
    /// Advances the cursor in the cell.
    pub(super) advance: unsafe fn(cell: &mut StorageCell) -> Result<(), NullIterator>,
    /// Clones the cursor of `src` into the vacant `dst`, then advances `src`.
    pub(super) post_advance:
        unsafe fn(dst: &mut StorageCell, src: &mut StorageCell) -> Result<(), NullIterator>,
    /// Compares the cursors in two cells for equality.
    pub(super) eq: unsafe fn(lhs: &StorageCell, rhs: &StorageCell) -> Result<bool, NullIterator>,
}

impl<T: ?Sized + 'static> ForwardVtable<T> {
    /// Builds the table for cursor type `I` stored with strategy `S`.
    pub(super) const fn new<'a, I, S>() -> Self
    where
        I: ForwardCursor<'a, Item = T>,
        S: Strategy,
    {
        Self {
            type_name: core::any::type_name::<I>,
            storage: S::STORAGE,
            copy: copy::<I, S>,
            relocate: relocate::<I, S>,
            assign: assign::<T, I, S>,
            destroy: destroy::<I, S>,
            get: get::<I, S>,
            advance: advance::<I, S>,
            post_advance: post_advance::<I, S>,
            eq: eq::<I, S>,
        }
    }

    /// Returns the table for cursor type `I`.
    ///
    /// The table is a compile-time constant: every call with the same `T`
    /// and `I` in the same crate yields the same instance.
    pub(crate) fn of<'a, I>() -> &'static Self
    where
        I: ForwardCursor<'a, Item = T>,
    {
        const {
            if fits_inline::<I>() {
                &Self::new::<I, Inline>()
            } else {
                &Self::new::<I, Boxed>()
            }
        }
    }

    /// Returns the [`core::any::type_name`] of the cursor type, or [`None`]
    /// for the null table.
    #[inline]
    pub(crate) fn type_name(&self) -> Option<&'static str> {
        match self.storage {
            Storage::Null => None,
            Storage::Inline | Storage::Boxed => Some((self.type_name)()),
        }
    }

    /// Returns how cells paired with this table hold their cursor.
    #[inline]
    pub(crate) fn storage(&self) -> Storage {
        self.storage
    }

    /// Clones the cursor of `src` into `dst`.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. This table is the table of `src`.
    /// 2. `dst` is vacant.
    #[inline]
    pub(crate) unsafe fn copy(&self, dst: &mut StorageCell, src: &StorageCell) {
        // SAFETY: We know that `self.copy` points to `copy::<I, S>` below, or
        // to the null version which ignores its arguments. Its safety
        // requirements are upheld:
        // 1. Guaranteed by the caller
        // 2. Guaranteed by the caller
        unsafe { (self.copy)(dst, src) }
    }

    /// Moves the cursor of `src` into `dst`, leaving `src` vacant.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. This table is the table of `src`.
    /// 2. `dst` is vacant.
    /// 3. `src` is not used with this table afterwards.
    #[inline]
    pub(crate) unsafe fn relocate(&self, dst: &mut StorageCell, src: &mut StorageCell) {
        // SAFETY: We know that `self.relocate` points to `relocate::<I, S>`
        // below, or to the null version. Its safety requirements are upheld:
        // 1. Guaranteed by the caller
        // 2. Guaranteed by the caller
        // 3. Guaranteed by the caller
        unsafe { (self.relocate)(dst, src) }
    }

    /// Replaces the cursor of `dst` with a clone of the cursor of `src`.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. This table is the table of `src`.
    /// 2. `dst_vtable` is the table of `dst`.
    /// 3. Afterwards, this table is treated as the table of `dst`.
    #[inline]
    pub(crate) unsafe fn assign(
        &self,
        dst_vtable: &ForwardVtable<T>,
        dst: &mut StorageCell,
        src: &StorageCell,
    ) {
        // SAFETY: We know that `self.assign` points to `assign::<T, I, S>`
        // below, or to the null version. Its safety requirements are upheld:
        // 1. Guaranteed by the caller
        // 2. Guaranteed by the caller
        // 3. Guaranteed by the caller
        unsafe { (self.assign)(dst_vtable, dst, src) }
    }

    /// Drops the cursor of `cell`.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. This table is the table of `cell`.
    /// 2. `cell` is treated as vacant afterwards.
    #[inline]
    pub(crate) unsafe fn destroy(&self, cell: &mut StorageCell) {
        // SAFETY: We know that `self.destroy` points to `destroy::<I, S>`
        // below, or to the null version. Its safety requirements are upheld:
        // 1. Guaranteed by the caller
        // 2. Guaranteed by the caller
        unsafe { (self.destroy)(cell) }
    }

    /// Dereferences the cursor of `cell`.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. This table is the table of `cell`.
    #[inline]
    pub(crate) unsafe fn get(&self, cell: &StorageCell) -> Result<NonNull<T>, NullIterator> {
        // SAFETY: We know that `self.get` points to `get::<I, S>` below, or to
        // the null version. Its safety requirements are upheld:
        // 1. Guaranteed by the caller
        unsafe { (self.get)(cell) }
    }

    /// Advances the cursor of `cell`.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. This table is the table of `cell`.
    #[inline]
    pub(crate) unsafe fn advance(&self, cell: &mut StorageCell) -> Result<(), NullIterator> {
        // SAFETY: We know that `self.advance` points to `advance::<I, S>`
        // below, or to the null version. Its safety requirements are upheld:
        // 1. Guaranteed by the caller
        unsafe { (self.advance)(cell) }
    }

    /// Clones the cursor of `src` into `dst` and advances `src`.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. This table is the table of `src`.
    /// 2. `dst` is vacant. On success it holds a cursor of this table; on
    ///    failure it is still vacant.
    #[inline]
    pub(crate) unsafe fn post_advance(
        &self,
        dst: &mut StorageCell,
        src: &mut StorageCell,
    ) -> Result<(), NullIterator> {
        // SAFETY: We know that `self.post_advance` points to
        // `post_advance::<I, S>` below, or to the null version. Its safety
        // requirements are upheld:
        // 1. Guaranteed by the caller
        // 2. Guaranteed by the caller
        unsafe { (self.post_advance)(dst, src) }
    }

    /// Compares the cursors of `lhs` and `rhs` for equality.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. This table is the table of both `lhs` and `rhs`.
    #[inline]
    pub(crate) unsafe fn eq(&self, lhs: &StorageCell, rhs: &StorageCell) -> Result<bool, NullIterator> {
        // SAFETY: We know that `self.eq` points to `eq::<I, S>` below, or to
        // the null version. Its safety requirements are upheld:
        // 1. Guaranteed by the caller
        unsafe { (self.eq)(lhs, rhs) }
    }
}

/// Clones the cursor of `src` into `dst`.
///
/// # Safety
///
/// The caller must ensure:
///
/// 1. `src` holds a live `I` placed by strategy `S`.
/// 2. `dst` is vacant.
pub(super) unsafe fn copy<I: Clone, S: Strategy>(dst: &mut StorageCell, src: &StorageCell) {
    // SAFETY:
    // 1. Guaranteed by the caller
    let cursor: &I = unsafe { S::get::<I>(src) };
    let cloned = cursor.clone();
    // SAFETY:
    // 1. Guaranteed by the caller
    // 2. `S` is the strategy of `I`, as `src` was filled by it
    unsafe { S::store(dst, cloned) }
}

/// Moves the cursor of `src` into `dst`.
///
/// # Safety
///
/// The caller must ensure:
///
/// 1. `src` holds a live `I` placed by strategy `S`.
/// 2. `dst` is vacant.
/// 3. `src` is not read again.
pub(super) unsafe fn relocate<I, S: Strategy>(dst: &mut StorageCell, src: &mut StorageCell) {
    // SAFETY:
    // 1. Guaranteed by the caller
    // 2. Guaranteed by the caller
    // 3. Guaranteed by the caller
    unsafe { S::relocate::<I>(dst, src) }
}

/// Replaces the cursor of `dst` with a clone of the cursor of `src`.
///
/// The clone is made before `dst` is destroyed, so a panicking [`Clone`]
/// leaves `dst` untouched.
///
/// # Safety
///
/// The caller must ensure:
///
/// 1. `src` holds a live `I` placed by strategy `S`.
/// 2. `dst_vtable` is the table of `dst`.
pub(super) unsafe fn assign<T: ?Sized + 'static, I: Clone, S: Strategy>(
    dst_vtable: &ForwardVtable<T>,
    dst: &mut StorageCell,
    src: &StorageCell,
) {
    // SAFETY:
    // 1. Guaranteed by the caller
    let cloned = unsafe { S::get::<I>(src) }.clone();
    // SAFETY:
    // 1. Guaranteed by the caller
    // 2. `dst` is refilled right below
    unsafe { dst_vtable.destroy(dst) };
    // SAFETY:
    // 1. `dst` was just destroyed
    // 2. `S` is the strategy of `I`, as `src` was filled by it
    unsafe { S::store(dst, cloned) }
}

/// Drops the cursor in `cell`.
///
/// # Safety
///
/// The caller must ensure:
///
/// 1. `cell` holds a live `I` placed by strategy `S`.
/// 2. `cell` is treated as vacant afterwards.
pub(super) unsafe fn destroy<I, S: Strategy>(cell: &mut StorageCell) {
    // SAFETY:
    // 1. Guaranteed by the caller
    // 2. Guaranteed by the caller
    unsafe { S::destroy::<I>(cell) }
}

/// Dereferences the cursor in `cell`.
///
/// # Safety
///
/// The caller must ensure:
///
/// 1. `cell` holds a live `I` placed by strategy `S`.
pub(super) unsafe fn get<'a, I: ForwardCursor<'a>, S: Strategy>(
    cell: &StorageCell,
) -> Result<NonNull<I::Item>, NullIterator> {
    // SAFETY:
    // 1. Guaranteed by the caller
    let cursor: &I = unsafe { S::get::<I>(cell) };
    Ok(NonNull::from(cursor.get()))
}

/// Advances the cursor in `cell`.
///
/// # Safety
///
/// The caller must ensure:
///
/// 1. `cell` holds a live `I` placed by strategy `S`.
pub(super) unsafe fn advance<'a, I: ForwardCursor<'a>, S: Strategy>(
    cell: &mut StorageCell,
) -> Result<(), NullIterator> {
    // SAFETY:
    // 1. Guaranteed by the caller
    let cursor: &mut I = unsafe { S::get_mut::<I>(cell) };
    cursor.advance();
    Ok(())
}

/// Clones the cursor of `src` into `dst`, then advances `src`.
///
/// For boxed cursors the clone is a fresh heap allocation.
///
/// # Safety
///
/// The caller must ensure:
///
/// 1. `src` holds a live `I` placed by strategy `S`.
/// 2. `dst` is vacant.
pub(super) unsafe fn post_advance<'a, I: ForwardCursor<'a>, S: Strategy>(
    dst: &mut StorageCell,
    src: &mut StorageCell,
) -> Result<(), NullIterator> {
    // SAFETY:
    // 1. Guaranteed by the caller
    // 2. Guaranteed by the caller
    unsafe { copy::<I, S>(dst, src) };
    // SAFETY:
    // 1. Guaranteed by the caller
    unsafe { advance::<I, S>(src) }
}

/// Compares the cursors in `lhs` and `rhs`.
///
/// # Safety
///
/// The caller must ensure:
///
/// 1. Both cells hold a live `I` placed by strategy `S`.
pub(super) unsafe fn eq<I: PartialEq, S: Strategy>(
    lhs: &StorageCell,
    rhs: &StorageCell,
) -> Result<bool, NullIterator> {
    // SAFETY:
    // 1. Guaranteed by the caller
    let lhs: &I = unsafe { S::get::<I>(lhs) };
    // SAFETY:
    // 1. Guaranteed by the caller
    let rhs: &I = unsafe { S::get::<I>(rhs) };
    Ok(lhs == rhs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, PartialEq)]
    struct Position<'a> {
        items: &'a [i32],
        index: usize,
    }

    impl<'a> ForwardCursor<'a> for Position<'a> {
        type Item = i32;

        fn get(&self) -> &'a i32 {
            &self.items[self.index]
        }

        fn advance(&mut self) {
            self.index += 1;
        }
    }

    #[derive(Clone, PartialEq)]
    struct Word(u32);

    impl ForwardCursor<'static> for Word {
        type Item = u32;

        fn get(&self) -> &'static u32 {
            &7
        }

        fn advance(&mut self) {
            self.0 += 1;
        }
    }

    #[test]
    fn test_forward_vtable_is_shared() {
        let vtable1 = ForwardVtable::<i32>::of::<Position<'_>>();
        let vtable2 = ForwardVtable::<i32>::of::<Position<'_>>();

        // Both should be the exact same static instance
        assert!(core::ptr::eq(vtable1, vtable2));
    }

    #[test]
    fn test_forward_vtable_storage_selection() {
        assert_eq!(
            ForwardVtable::<i32>::of::<Position<'_>>().storage(),
            Storage::Boxed
        );
        assert_eq!(ForwardVtable::<u32>::of::<Word>().storage(), Storage::Inline);
    }

    #[test]
    fn test_forward_vtable_type_name() {
        let vtable = ForwardVtable::<u32>::of::<Word>();
        assert_eq!(vtable.type_name(), Some(core::any::type_name::<Word>()));
    }

    #[test]
    fn test_forward_vtable_ops_on_boxed_cell() {
        let items = [10, 20, 30];
        let vtable = ForwardVtable::<i32>::of::<Position<'_>>();
        let mut cell = StorageCell::vacant();
        let mut copy = StorageCell::vacant();

        // SAFETY: `cell` is vacant.
        unsafe { crate::storage::store(&mut cell, Position { items: &items, index: 0 }) };
        // SAFETY: `vtable` is the table of `cell`, `copy` is vacant.
        unsafe { vtable.post_advance(&mut copy, &mut cell) }.unwrap();

        // SAFETY: `vtable` is the table of `copy`.
        let first = unsafe { vtable.get(&copy) }.unwrap();
        // SAFETY: `vtable` is the table of `cell`.
        let second = unsafe { vtable.get(&cell) }.unwrap();
        // SAFETY: Both pointers point into `items`, which is still alive.
        assert_eq!(unsafe { *first.as_ref() }, 10);
        // SAFETY: Both pointers point into `items`, which is still alive.
        assert_eq!(unsafe { *second.as_ref() }, 20);
        // SAFETY: `vtable` is the table of both cells.
        assert!(!unsafe { vtable.eq(&copy, &cell) }.unwrap());

        // SAFETY: `vtable` is the table of `copy`, which is not used again.
        unsafe { vtable.destroy(&mut copy) };
        // SAFETY: `vtable` is the table of `cell`, which is not used again.
        unsafe { vtable.destroy(&mut cell) };
    }
}
