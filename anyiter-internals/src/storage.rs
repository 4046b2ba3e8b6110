//! The storage cell and the two strategies for placing a cursor in it.
//!
//! Every erased iterator owns exactly one [`StorageCell`]: a single machine
//! word with pointer alignment. A cursor is placed in the cell using one of
//! two strategies:
//!
//! - [`Inline`]: the cursor's bytes live directly in the cell. Used when the
//!   cursor is no larger and no more aligned than the cell.
//! - [`Boxed`]: the cursor lives in a [`Box`] and the cell holds the pointer.
//!
//! The cell carries no tag. Which strategy applies is decided once per cursor
//! type by [`fits_inline`], and baked into the operation table built for that
//! type. Every access to a cell goes through the functions of its current
//! table, so the table and the cell always agree.
//!
//! Rust moves are bitwise copies, so unlike in languages with move
//! constructors, every type can be relocated by copying its bytes. Size and
//! alignment are therefore the only criteria for inline storage.

use alloc::boxed::Box;
use core::{
    cell::UnsafeCell,
    mem::{MaybeUninit, align_of, size_of},
};

/// Size in bytes of the storage cell, and thus the largest cursor stored
/// inline.
pub const INLINE_SIZE: usize = size_of::<StorageCell>();

/// Alignment of the storage cell, and thus the largest alignment of a cursor
/// stored inline.
pub const INLINE_ALIGN: usize = align_of::<StorageCell>();

/// Returns whether cursors of type `I` are stored inline.
///
/// This is evaluated at compile time when the operation table of `I` is
/// built. Cursors that do not fit are boxed.
///
/// # Examples
///
/// ```
/// use anyiter_internals::fits_inline;
///
/// assert!(fits_inline::<usize>());
/// assert!(fits_inline::<Option<&u8>>());
/// assert!(!fits_inline::<(&[u8], usize)>());
/// ```
#[must_use]
pub const fn fits_inline<I>() -> bool {
    size_of::<I>() <= INLINE_SIZE && align_of::<I>() <= INLINE_ALIGN
}

/// How an erased iterator currently stores its cursor.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub enum Storage {
    /// The iterator is in the null state and holds no cursor.
    Null,
    /// The cursor's bytes live directly in the storage cell.
    Inline,
    /// The cursor lives on the heap and the cell holds the pointer.
    Boxed,
}

/// A single pointer-sized, pointer-aligned word holding either a cursor or a
/// pointer to a boxed cursor.
///
/// The cell is a plain bag of bytes. It does not know what it contains and
/// never drops its contents on its own; that is the job of the operation
/// table paired with it.
///
/// The word sits in an [`UnsafeCell`]: a cursor stored inline may have
/// interior mutability, and shared references to it are handed out through
/// shared references to the cell.
#[repr(transparent)]
pub(crate) struct StorageCell {
    /// The word itself. `*mut ()` rather than `usize` so that a stored box
    /// pointer keeps its provenance.
    word: UnsafeCell<MaybeUninit<*mut ()>>,
}

impl StorageCell {
    /// Creates a cell with no contents.
    #[inline]
    pub(crate) const fn vacant() -> Self {
        Self {
            word: UnsafeCell::new(MaybeUninit::uninit()),
        }
    }

    /// Returns a pointer to the start of the cell, typed as `U`.
    ///
    /// The pointer may be used to write to values with interior mutability.
    #[inline]
    fn as_ptr<U>(&self) -> *const U {
        self.word.get().cast::<U>().cast_const()
    }

    /// Returns a mutable pointer to the start of the cell, typed as `U`.
    #[inline]
    fn as_mut_ptr<U>(&mut self) -> *mut U {
        self.word.get().cast::<U>()
    }
}

/// A way of placing a cursor of type `I` in a [`StorageCell`].
///
/// The methods below only uphold their contracts for the strategy that
/// [`fits_inline`] selects for `I`: [`Inline`] must only be used with types
/// for which `fits_inline::<I>()` is `true`.
pub(crate) trait Strategy: 'static {
    /// The storage kind reported by tables using this strategy.
    const STORAGE: Storage;

    /// Moves `value` into `cell`.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. `cell` is vacant: it was never written, or its previous contents
    ///    were destroyed or relocated.
    /// 2. This strategy is the one selected for `I`.
    unsafe fn store<I>(cell: &mut StorageCell, value: I);

    /// Returns a reference to the cursor in `cell`.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. `cell` holds a live `I` placed there by this strategy.
    unsafe fn get<I>(cell: &StorageCell) -> &I;

    /// Returns a mutable reference to the cursor in `cell`.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. `cell` holds a live `I` placed there by this strategy.
    unsafe fn get_mut<I>(cell: &mut StorageCell) -> &mut I;

    /// Transfers the cursor in `src` to `dst`. Afterwards `src` is vacant.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. `src` holds a live `I` placed there by this strategy.
    /// 2. `dst` is vacant.
    /// 3. `src` is not read again until something new is stored in it.
    unsafe fn relocate<I>(dst: &mut StorageCell, src: &mut StorageCell);

    /// Drops the cursor in `cell` and frees its allocation, if any.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. `cell` holds a live `I` placed there by this strategy.
    /// 2. `cell` is treated as vacant afterwards.
    unsafe fn destroy<I>(cell: &mut StorageCell);
}

/// Stores the cursor's bytes directly in the cell.
pub(crate) struct Inline;

impl Strategy for Inline {
    const STORAGE: Storage = Storage::Inline;

    #[inline]
    unsafe fn store<I>(cell: &mut StorageCell, value: I) {
        debug_assert!(fits_inline::<I>());
        let ptr = cell.as_mut_ptr::<I>();
        // SAFETY:
        // 1. The cell is vacant, guaranteed by the caller, so nothing is
        //    overwritten without being dropped.
        // 2. `I` fits the size and alignment of the cell, guaranteed by the
        //    caller selecting this strategy only when `fits_inline::<I>()`.
        unsafe {
            ptr.write(value);
        }
    }

    #[inline]
    unsafe fn get<I>(cell: &StorageCell) -> &I {
        let ptr = cell.as_ptr::<I>();
        // SAFETY: The cell holds a live, properly aligned `I`, guaranteed by
        // the caller. The returned borrow is tied to the borrow of the cell.
        unsafe { &*ptr }
    }

    #[inline]
    unsafe fn get_mut<I>(cell: &mut StorageCell) -> &mut I {
        let ptr = cell.as_mut_ptr::<I>();
        // SAFETY: The cell holds a live, properly aligned `I`, guaranteed by
        // the caller. The returned borrow is tied to the exclusive borrow of
        // the cell.
        unsafe { &mut *ptr }
    }

    #[inline]
    unsafe fn relocate<I>(dst: &mut StorageCell, src: &mut StorageCell) {
        // SAFETY: `src` holds a live `I`, guaranteed by the caller. Reading
        // it out is a move; the caller guarantees `src` is not read again.
        let value = unsafe { src.as_mut_ptr::<I>().read() };
        // SAFETY:
        // 1. `dst` is vacant, guaranteed by the caller.
        // 2. This strategy was selected for `I`, as it was for `src`.
        unsafe {
            Self::store(dst, value);
        }
    }

    #[inline]
    unsafe fn destroy<I>(cell: &mut StorageCell) {
        let ptr = cell.as_mut_ptr::<I>();
        // SAFETY: The cell holds a live `I`, guaranteed by the caller, who
        // also guarantees the cell is considered vacant afterwards.
        unsafe {
            core::ptr::drop_in_place(ptr);
        }
    }
}

/// Stores the cursor in a [`Box`] and keeps the pointer in the cell.
pub(crate) struct Boxed;

impl Boxed {
    /// Reads the box pointer out of the cell.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. The cell holds a pointer written by [`Boxed::store`] for the same
    ///    `I`.
    #[inline]
    unsafe fn pointer<I>(cell: &StorageCell) -> *mut I {
        // SAFETY: The cell holds a `*mut I`, guaranteed by the caller. A
        // pointer always fits the cell.
        unsafe { cell.as_ptr::<*mut I>().read() }
    }
}

impl Strategy for Boxed {
    const STORAGE: Storage = Storage::Boxed;

    #[inline]
    unsafe fn store<I>(cell: &mut StorageCell, value: I) {
        let ptr: *mut I = Box::into_raw(Box::new(value));
        // SAFETY: The cell is vacant, guaranteed by the caller, and is
        // exactly large and aligned enough for a thin pointer.
        unsafe {
            cell.as_mut_ptr::<*mut I>().write(ptr);
        }
    }

    #[inline]
    unsafe fn get<I>(cell: &StorageCell) -> &I {
        // SAFETY:
        // 1. The cell holds a boxed `I`, guaranteed by the caller.
        let ptr = unsafe { Self::pointer::<I>(cell) };
        // SAFETY: The pointer came from `Box::into_raw` and the box is still
        // owned by the cell. The returned borrow is tied to the cell.
        unsafe { &*ptr }
    }

    #[inline]
    unsafe fn get_mut<I>(cell: &mut StorageCell) -> &mut I {
        // SAFETY:
        // 1. The cell holds a boxed `I`, guaranteed by the caller.
        let ptr = unsafe { Self::pointer::<I>(cell) };
        // SAFETY: The pointer came from `Box::into_raw` and the box is owned
        // exclusively by the cell, which we borrow mutably.
        unsafe { &mut *ptr }
    }

    #[inline]
    unsafe fn relocate<I>(dst: &mut StorageCell, src: &mut StorageCell) {
        // SAFETY:
        // 1. `src` holds a boxed `I`, guaranteed by the caller.
        let ptr = unsafe { Self::pointer::<I>(src) };
        // SAFETY: `dst` is vacant, guaranteed by the caller. Ownership of the
        // box moves with the pointer; `src` is not followed again.
        unsafe {
            dst.as_mut_ptr::<*mut I>().write(ptr);
        }
    }

    #[inline]
    unsafe fn destroy<I>(cell: &mut StorageCell) {
        // SAFETY:
        // 1. The cell holds a boxed `I`, guaranteed by the caller.
        let ptr = unsafe { Self::pointer::<I>(cell) };
        // SAFETY: The pointer came from `Box::into_raw` and has not been
        // freed, since the cell still owned it. The caller guarantees the cell
        // is considered vacant afterwards.
        let boxed = unsafe { Box::from_raw(ptr) };
        core::mem::drop(boxed);
    }
}

/// Stores `value` in `cell` using the strategy [`fits_inline`] selects for
/// `I`.
///
/// # Safety
///
/// The caller must ensure:
///
/// 1. `cell` is vacant.
#[inline]
pub(crate) unsafe fn store<I>(cell: &mut StorageCell, value: I) {
    if fits_inline::<I>() {
        // SAFETY:
        // 1. Guaranteed by the caller
        // 2. `I` fits inline
        unsafe { Inline::store(cell, value) }
    } else {
        // SAFETY:
        // 1. Guaranteed by the caller
        // 2. `I` does not fit inline, so it is boxed
        unsafe { Boxed::store(cell, value) }
    }
}
