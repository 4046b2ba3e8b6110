//! The type-erased iterator.
//!
//! This module encapsulates the `vtable` and `cell` fields of
//! [`RawIterator`], ensuring they are only visible within this module. This
//! visibility restriction guarantees the safety invariant: **the table always
//! describes the contents of the cell**.
//!
//! # Safety Invariant
//!
//! A [`RawIterator`] is created either null, with the null table and a vacant
//! cell, or by [`RawIterator::new`], which takes the table of the cursor type
//! from [`Erasable::vtable`] and stores the cursor with the strategy that table
//! was built for. Every method below that changes the contents of the cell
//! updates the table in the same step, and the fields cannot be modified from
//! outside this module.
//!
//! # Lifetimes
//!
//! The lifetime `'a` is the lifetime of the references handed out by the
//! stored cursor. It is invariant, so iterators are only ever compared with,
//! or assigned from, iterators whose cursors share the exact same lifetime.

use core::{marker::PhantomData, mem};

use crate::{
    error::NullIterator,
    level::{BidirectionalLevel, Erasable, Level, NarrowTo, RandomAccess},
    storage::{self, Storage, StorageCell},
    vtable::ForwardVtable,
};

/// An owned, type-erased cursor yielding references to `T`, supporting the
/// operations of level `L`.
///
/// The cursor is stored in a single machine word when it fits, and boxed
/// otherwise. Which of the two happened can be queried with
/// [`storage`](RawIterator::storage).
pub struct RawIterator<'a, T: ?Sized + 'static, L: Level> {
    /// The operation table of the stored cursor.
    ///
    /// # Safety
    ///
    /// The following safety invariants are guaranteed to be upheld as long as
    /// this struct exists:
    ///
    /// 1. If the table is the null table of `L`, the cell is vacant.
    /// 2. Otherwise the cell holds a live cursor placed there by the strategy
    ///    the table was built for, of the cursor type the table was built
    ///    for, and that cursor implements `ForwardCursor<'a, Item = T>`.
    vtable: &'static L::Vtable<T>,
    /// The storage of the cursor.
    cell: StorageCell,
    /// Ties the iterator to the lifetime of its cursor.
    _lifetime: PhantomData<fn(&'a ()) -> &'a ()>,
}

impl<'a, T: ?Sized + 'static, L: Level> RawIterator<'a, T, L> {
    /// Creates an iterator in the null state.
    #[inline]
    pub fn null() -> Self {
        Self {
            vtable: L::null(),
            cell: StorageCell::vacant(),
            _lifetime: PhantomData,
        }
    }

    /// Erases `cursor` into a new iterator.
    #[inline]
    pub fn new<I>(cursor: I) -> Self
    where
        I: Erasable<'a, L, Item = T>,
    {
        let mut cell = StorageCell::vacant();
        // SAFETY:
        // 1. The cell was just created
        unsafe {
            storage::store(&mut cell, cursor);
        }
        Self {
            vtable: <I as Erasable<'a, L>>::vtable(),
            cell,
            _lifetime: PhantomData,
        }
    }

    /// Returns the forward part of the table.
    #[inline]
    fn forward_vtable(&self) -> &'static ForwardVtable<T> {
        L::forward(self.vtable)
    }

    /// Returns how the cursor is currently stored.
    #[inline]
    pub fn storage(&self) -> Storage {
        self.forward_vtable().storage()
    }

    /// Returns whether the iterator is in the null state.
    #[inline]
    pub fn is_null(&self) -> bool {
        self.storage() == Storage::Null
    }

    /// Returns the name of the stored cursor type, or [`None`] for a null
    /// iterator.
    #[inline]
    pub fn cursor_type_name(&self) -> Option<&'static str> {
        self.forward_vtable().type_name()
    }

    /// Returns whether both iterators use the same operation table.
    ///
    /// When this returns `true`, both iterators hold the same cursor type (or
    /// are both null), so the unchecked comparisons below may be used. The
    /// converse does not hold: the same cursor type erased at different
    /// levels has different tables.
    #[inline]
    pub fn same_table(&self, other: &Self) -> bool {
        core::ptr::eq(self.forward_vtable(), other.forward_vtable())
    }

    /// Moves the cursor out of `self` into a new iterator, leaving `self`
    /// null.
    pub fn take(&mut self) -> Self {
        let vtable = mem::replace(&mut self.vtable, L::null());
        let mut taken = Self::null();
        // SAFETY:
        // 1. `vtable` is the table of `self.cell`, by the invariants of this
        //    type
        // 2. `taken.cell` is vacant, as `taken` is null
        // 3. `self` is now null, so its cell is never read again
        unsafe {
            L::forward(vtable).relocate(&mut taken.cell, &mut self.cell);
        }
        taken.vtable = vtable;
        taken
    }

    /// Returns the element the cursor points at.
    #[inline]
    pub fn get(&self) -> Result<&'a T, NullIterator> {
        // SAFETY:
        // 1. `self.vtable` is the table of `self.cell`, by the invariants of
        //    this type
        let ptr = unsafe { self.forward_vtable().get(&self.cell) }?;
        // SAFETY: The pointer was created from a `&'a T` returned by the
        // stored cursor, which implements `ForwardCursor<'a, Item = T>`.
        // Such references do not borrow from the cursor, so they stay valid
        // for `'a` regardless of what happens to `self`.
        Ok(unsafe { ptr.as_ref() })
    }

    /// Advances the cursor by one position.
    #[inline]
    pub fn advance(&mut self) -> Result<(), NullIterator> {
        // SAFETY:
        // 1. `self.vtable` is the table of `self.cell`, by the invariants of
        //    this type
        unsafe { self.forward_vtable().advance(&mut self.cell) }
    }

    /// Advances the cursor by one position and returns a copy of its previous
    /// state.
    pub fn post_advance(&mut self) -> Result<Self, NullIterator> {
        let mut previous = Self::null();
        // SAFETY:
        // 1. `self.vtable` is the table of `self.cell`, by the invariants of
        //    this type
        // 2. `previous.cell` is vacant, as `previous` is null. It stays paired
        //    with the null table until the operation succeeds.
        unsafe { self.forward_vtable().post_advance(&mut previous.cell, &mut self.cell) }?;
        previous.vtable = self.vtable;
        Ok(previous)
    }

    /// Compares the cursors of both iterators for equality.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. [`same_table`](RawIterator::same_table) returns `true` for `self`
    ///    and `other`.
    #[inline]
    pub unsafe fn eq_unchecked(&self, other: &Self) -> Result<bool, NullIterator> {
        // SAFETY:
        // 1. `self.vtable` is the table of `self.cell` by the invariants of
        //    this type, and of `other.cell` since both iterators share it,
        //    guaranteed by the caller
        unsafe { self.forward_vtable().eq(&self.cell, &other.cell) }
    }

    /// Converts the iterator into one of a lower level, moving the cursor.
    pub fn narrow<M: Level>(mut self) -> RawIterator<'a, T, M>
    where
        L: NarrowTo<M>,
    {
        let vtable = mem::replace(&mut self.vtable, L::null());
        let mut narrowed = RawIterator::<'a, T, M>::null();
        // SAFETY:
        // 1. `vtable` is the table of `self.cell`, by the invariants of this
        //    type
        // 2. `narrowed.cell` is vacant, as `narrowed` is null
        // 3. `self` is now null, so its cell is never read again
        unsafe {
            L::forward(vtable).relocate(&mut narrowed.cell, &mut self.cell);
        }
        // The narrowed table embeds the same forward table, so it describes
        // the relocated cursor.
        narrowed.vtable = L::narrow(vtable);
        narrowed
    }
}

impl<'a, T: ?Sized + 'static, L: BidirectionalLevel> RawIterator<'a, T, L> {
    /// Moves the cursor back by one position.
    #[inline]
    pub fn retreat(&mut self) -> Result<(), NullIterator> {
        // SAFETY:
        // 1. `self.vtable` is the table of `self.cell`, by the invariants of
        //    this type
        unsafe { L::bidirectional(self.vtable).retreat(&mut self.cell) }
    }

    /// Moves the cursor back by one position and returns a copy of its
    /// previous state.
    pub fn post_retreat(&mut self) -> Result<Self, NullIterator> {
        let mut previous = Self::null();
        // SAFETY:
        // 1. `self.vtable` is the table of `self.cell`, by the invariants of
        //    this type
        // 2. `previous.cell` is vacant, as `previous` is null. It stays paired
        //    with the null table until the operation succeeds.
        unsafe { L::bidirectional(self.vtable).post_retreat(&mut previous.cell, &mut self.cell) }?;
        previous.vtable = self.vtable;
        Ok(previous)
    }
}

impl<'a, T: ?Sized + 'static> RawIterator<'a, T, RandomAccess> {
    /// Moves the cursor `n` positions forward.
    #[inline]
    pub fn advance_by(&mut self, n: usize) -> Result<(), NullIterator> {
        // SAFETY:
        // 1. `self.vtable` is the table of `self.cell`, by the invariants of
        //    this type
        unsafe { self.vtable.advance_by(&mut self.cell, n) }
    }

    /// Moves the cursor `n` positions backward.
    #[inline]
    pub fn retreat_by(&mut self, n: usize) -> Result<(), NullIterator> {
        // SAFETY:
        // 1. `self.vtable` is the table of `self.cell`, by the invariants of
        //    this type
        unsafe { self.vtable.retreat_by(&mut self.cell, n) }
    }

    /// Returns the signed number of positions from `origin` to `self`.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. [`same_table`](RawIterator::same_table) returns `true` for `self`
    ///    and `origin`.
    #[inline]
    pub unsafe fn distance_unchecked(&self, origin: &Self) -> Result<isize, NullIterator> {
        // SAFETY:
        // 1. `self.vtable` is the table of `self.cell` by the invariants of
        //    this type, and of `origin.cell` since both iterators share it,
        //    guaranteed by the caller
        unsafe { self.vtable.distance(&self.cell, &origin.cell) }
    }

    /// Returns whether the cursor of `self` is strictly before that of
    /// `other`.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. [`same_table`](RawIterator::same_table) returns `true` for `self`
    ///    and `other`.
    #[inline]
    pub unsafe fn lt_unchecked(&self, other: &Self) -> Result<bool, NullIterator> {
        // SAFETY:
        // 1. `self.vtable` is the table of `self.cell` by the invariants of
        //    this type, and of `other.cell` since both iterators share it,
        //    guaranteed by the caller
        unsafe { self.vtable.lt(&self.cell, &other.cell) }
    }
}

impl<T: ?Sized + 'static, L: Level> Default for RawIterator<'_, T, L> {
    #[inline]
    fn default() -> Self {
        Self::null()
    }
}

impl<T: ?Sized + 'static, L: Level> Clone for RawIterator<'_, T, L> {
    fn clone(&self) -> Self {
        let mut cell = StorageCell::vacant();
        // SAFETY:
        // 1. `self.vtable` is the table of `self.cell`, by the invariants of
        //    this type
        // 2. The cell was just created
        unsafe {
            self.forward_vtable().copy(&mut cell, &self.cell);
        }
        Self {
            vtable: self.vtable,
            cell,
            _lifetime: PhantomData,
        }
    }

    fn clone_from(&mut self, source: &Self) {
        // `self` is null while the clone runs, so a panicking `Clone` leaks
        // the old cursor instead of dropping it twice.
        let old = mem::replace(&mut self.vtable, L::null());
        // SAFETY:
        // 1. `source.vtable` is the table of `source.cell`, by the invariants
        //    of this type
        // 2. `old` is the table of `self.cell`, by the invariants of this type
        // 3. `source.vtable` becomes the table of `self.cell` right below
        unsafe {
            source
                .forward_vtable()
                .assign(L::forward(old), &mut self.cell, &source.cell);
        }
        self.vtable = source.vtable;
    }
}

impl<T: ?Sized + 'static, L: Level> Drop for RawIterator<'_, T, L> {
    #[inline]
    fn drop(&mut self) {
        // SAFETY:
        // 1. `self.vtable` is the table of `self.cell`, by the invariants of
        //    this type
        // 2. We are in the drop function, so the cell is never used again
        unsafe {
            self.forward_vtable().destroy(&mut self.cell);
        }
    }
}
