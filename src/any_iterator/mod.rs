mod bidirectional;
mod random_access;

use anyiter_internals::{
    NullIterator, RawIterator, Storage,
    cursor::{BidirectionalCursor, ForwardCursor, RandomAccessCursor},
    level::{BidirectionalLevel, Erasable, Level, NarrowTo},
};

use crate::{
    Error, Operation,
    category::{Bidirectional, Forward, RandomAccess},
};

/// A type-erased iterator yielding references to `T`.
///
/// An [`AnyIterator`] holds any cursor type whose capabilities reach the level
/// `C`, behind a single concrete type. Generic code written against
/// `AnyIterator<'a, T, C>` works with every such cursor, without the cursor
/// types sharing a common base or knowing about each other.
///
/// # Levels
///
/// The level `C` selects the available operations:
///
/// - [`Forward`] (default): [`get`](AnyIterator::get),
///   [`advance`](AnyIterator::advance), equality
/// - [`Bidirectional`]: additionally [`retreat`](AnyIterator::retreat)
/// - [`RandomAccess`]: additionally jumps, distances, ordering and indexing
///
/// # Storage
///
/// Cursors no larger and no more aligned than a pointer are stored inline.
/// Larger cursors are boxed. Either way an [`AnyIterator`] is two words: a
/// pointer to a static operation table and the storage word.
///
/// # The null state
///
/// An iterator created with [`empty`](AnyIterator::empty), or left behind by
/// [`take`](AnyIterator::take), holds no cursor. It can be cloned, assigned
/// and dropped, but every other operation fails with [`Error::Empty`].
///
/// # Examples
///
/// ```
/// use anyiter::{AnyForwardIterator, SliceCursor};
///
/// let numbers = [1, 2, 3];
/// let mut iter = AnyForwardIterator::new(SliceCursor::begin(&numbers));
/// assert_eq!(iter.get(), Ok(&1));
/// iter.advance()?;
/// assert_eq!(iter.get(), Ok(&2));
/// # Ok::<(), anyiter::Error>(())
/// ```
#[repr(transparent)]
pub struct AnyIterator<'a, T: ?Sized + 'static, C: Level = Forward> {
    /// The erased cursor.
    raw: RawIterator<'a, T, C>,
}

/// Maps the error of the null table to the public error.
fn on_null(operation: Operation) -> impl FnOnce(NullIterator) -> Error {
    move |NullIterator| Error::empty(operation)
}

/// Unwraps the result of an operation that cannot report errors, panicking
/// with the error message.
fn or_panic<R>(result: Result<R, Error>) -> R {
    result.unwrap_or_else(|error| panic!("{error}"))
}

impl<'a, T: ?Sized + 'static, C: Level> AnyIterator<'a, T, C> {
    /// Creates an iterator in the null state.
    ///
    /// ```
    /// use anyiter::AnyForwardIterator;
    ///
    /// let iter = AnyForwardIterator::<str>::empty();
    /// assert!(iter.is_null());
    /// assert!(iter.get().is_err());
    /// ```
    #[must_use]
    pub fn empty() -> Self {
        Self {
            raw: RawIterator::null(),
        }
    }

    /// Erases `cursor` into a new iterator.
    ///
    /// The cursor must reach the level `C`. Erasing a forward-only cursor as
    /// a random-access iterator does not compile:
    ///
    /// ```compile_fail
    /// use anyiter::{AnyRandomAccessIterator, cursor::ForwardCursor};
    ///
    /// #[derive(Clone, PartialEq)]
    /// struct Once;
    ///
    /// impl ForwardCursor<'static> for Once {
    ///     type Item = u8;
    ///     fn get(&self) -> &'static u8 {
    ///         &0
    ///     }
    ///     fn advance(&mut self) {}
    /// }
    ///
    /// let iter = AnyRandomAccessIterator::new(Once);
    /// ```
    pub fn new<I>(cursor: I) -> Self
    where
        I: Erasable<'a, C, Item = T>,
    {
        let raw = RawIterator::new(cursor);
        tracing::trace!(
            cursor = core::any::type_name::<I>(),
            level = C::NAME,
            storage = ?raw.storage(),
            "erased cursor"
        );
        Self { raw }
    }

    /// Creates an [`AnyIterator`] from a [`RawIterator`].
    pub(crate) fn from_raw(raw: RawIterator<'a, T, C>) -> Self {
        Self { raw }
    }

    /// Consumes the [`AnyIterator`] and returns the inner [`RawIterator`].
    pub(crate) fn into_raw(self) -> RawIterator<'a, T, C> {
        self.raw
    }

    /// Returns whether the iterator is in the null state.
    #[must_use]
    pub fn is_null(&self) -> bool {
        self.raw.is_null()
    }

    /// Returns how the cursor is stored.
    ///
    /// ```
    /// use anyiter::{AnyForwardIterator, SliceCursor, Storage};
    ///
    /// let numbers = [1, 2, 3];
    /// let iter = AnyForwardIterator::new(SliceCursor::begin(&numbers));
    /// assert_eq!(iter.storage(), Storage::Boxed);
    /// assert_eq!(AnyForwardIterator::<u8>::empty().storage(), Storage::Null);
    /// ```
    #[must_use]
    pub fn storage(&self) -> Storage {
        self.raw.storage()
    }

    /// Returns the name of the erased cursor type, or [`None`] in the null
    /// state.
    #[must_use]
    pub fn cursor_type_name(&self) -> Option<&'static str> {
        self.raw.cursor_type_name()
    }

    /// Returns the element at the current position.
    ///
    /// The reference is not tied to the borrow of `self`: it stays valid
    /// after the iterator moves or is dropped.
    pub fn get(&self) -> Result<&'a T, Error> {
        self.raw.get().map_err(on_null(Operation::Dereference))
    }

    /// Moves to the next position.
    ///
    /// Returns `self` to allow chaining. On failure the iterator is left
    /// unchanged.
    pub fn advance(&mut self) -> Result<&mut Self, Error> {
        self.raw.advance().map_err(on_null(Operation::Advance))?;
        Ok(self)
    }

    /// Moves to the next position and returns a copy of the iterator from
    /// before the move.
    ///
    /// ```
    /// use anyiter::{AnyForwardIterator, SliceCursor};
    ///
    /// let numbers = [1, 2];
    /// let mut iter = AnyForwardIterator::new(SliceCursor::begin(&numbers));
    /// let previous = iter.post_advance()?;
    /// assert_eq!((previous.get()?, iter.get()?), (&1, &2));
    /// # Ok::<(), anyiter::Error>(())
    /// ```
    pub fn post_advance(&mut self) -> Result<Self, Error> {
        self.raw
            .post_advance()
            .map(Self::from_raw)
            .map_err(on_null(Operation::Advance))
    }

    /// Checks that both iterators hold a cursor of the same type.
    ///
    /// A null operand is reported as [`Error::Empty`] before the cursor types
    /// are compared.
    pub(crate) fn check_comparable(&self, other: &Self, operation: Operation) -> Result<(), Error> {
        if self.raw.is_null() || other.raw.is_null() {
            return Err(Error::empty(operation));
        }
        if !self.raw.same_table(&other.raw) {
            return Err(Error::mismatched(
                operation,
                self.cursor_type_name().unwrap_or_default(),
                other.cursor_type_name().unwrap_or_default(),
            ));
        }
        Ok(())
    }

    /// Returns whether both iterators are at the same position.
    ///
    /// Fails with [`Error::Empty`] if either iterator is null, and with
    /// [`Error::Mismatched`] if they hold different cursor types.
    pub fn try_eq(&self, other: &Self) -> Result<bool, Error> {
        self.check_comparable(other, Operation::Equality)?;
        // SAFETY:
        // 1. `check_comparable` verified that both iterators share a table
        unsafe { self.raw.eq_unchecked(&other.raw) }.map_err(on_null(Operation::Equality))
    }

    /// Moves the cursor out into a new iterator, leaving `self` null.
    ///
    /// A plain Rust move needs no such call. This is for taking the cursor
    /// out from behind a mutable reference.
    ///
    /// ```
    /// use anyiter::{AnyForwardIterator, SliceCursor};
    ///
    /// let numbers = [1];
    /// let mut iter = AnyForwardIterator::new(SliceCursor::begin(&numbers));
    /// let taken = iter.take();
    /// assert!(iter.is_null());
    /// assert_eq!(taken.get(), Ok(&1));
    /// ```
    #[must_use]
    pub fn take(&mut self) -> Self {
        Self::from_raw(self.raw.take())
    }

    /// Converts into an iterator of a lower level, keeping the cursor.
    ///
    /// ```
    /// use anyiter::{AnyForwardIterator, AnyRandomAccessIterator, SliceCursor, category::Forward};
    ///
    /// let numbers = [1, 2];
    /// let iter = AnyRandomAccessIterator::new(SliceCursor::at(&numbers, 1));
    /// let forward: AnyForwardIterator<'_, i32> = iter.narrow::<Forward>();
    /// assert_eq!(forward.get(), Ok(&2));
    /// ```
    ///
    /// Widening does not compile:
    ///
    /// ```compile_fail
    /// use anyiter::{AnyForwardIterator, SliceCursor, category::RandomAccess};
    ///
    /// let numbers = [1, 2];
    /// let iter = AnyForwardIterator::new(SliceCursor::begin(&numbers));
    /// let widened = iter.narrow::<RandomAccess>();
    /// ```
    #[must_use]
    pub fn narrow<D: Level>(self) -> AnyIterator<'a, T, D>
    where
        C: NarrowTo<D>,
    {
        tracing::trace!(from = C::NAME, to = D::NAME, "narrowed erased iterator");
        AnyIterator::from_raw(self.into_raw().narrow())
    }

    /// Returns a copy of the iterator converted to a lower level.
    #[must_use]
    pub fn narrowed<D: Level>(&self) -> AnyIterator<'a, T, D>
    where
        C: NarrowTo<D>,
    {
        self.clone().narrow()
    }
}

impl<T: ?Sized + 'static, C: Level> Default for AnyIterator<'_, T, C> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: ?Sized + 'static, C: Level> Clone for AnyIterator<'_, T, C> {
    fn clone(&self) -> Self {
        Self::from_raw(self.raw.clone())
    }

    fn clone_from(&mut self, source: &Self) {
        self.raw.clone_from(&source.raw);
    }
}

/// # Panics
///
/// Comparing fails, and `==` panics, if either iterator is null or if the two
/// iterators hold different cursor types. Use
/// [`try_eq`](AnyIterator::try_eq) to handle those cases.
impl<T: ?Sized + 'static, C: Level> PartialEq for AnyIterator<'_, T, C> {
    fn eq(&self, other: &Self) -> bool {
        or_panic(self.try_eq(other))
    }
}

impl<T: ?Sized + 'static, C: Level> core::fmt::Debug for AnyIterator<'_, T, C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AnyIterator")
            .field("level", &C::NAME)
            .field("storage", &self.storage())
            .field("cursor", &self.cursor_type_name())
            .finish()
    }
}

/// Erased iterators are cursors themselves, so they can be wrapped by cursor
/// adapters such as [`Reversed`](crate::Reversed).
///
/// # Panics
///
/// The cursor methods panic where the corresponding fallible method would
/// return an error.
impl<'a, T: ?Sized + 'static, C: Level> ForwardCursor<'a> for AnyIterator<'a, T, C> {
    type Item = T;

    fn get(&self) -> &'a T {
        or_panic(AnyIterator::get(self))
    }

    fn advance(&mut self) {
        or_panic(AnyIterator::advance(self).map(drop));
    }
}

impl<'a, T: ?Sized + 'static, C: BidirectionalLevel> BidirectionalCursor<'a>
    for AnyIterator<'a, T, C>
{
    fn retreat(&mut self) {
        or_panic(AnyIterator::retreat(self).map(drop));
    }
}

impl<'a, T: ?Sized + 'static> RandomAccessCursor<'a> for AnyIterator<'a, T, RandomAccess> {
    fn advance_by(&mut self, n: usize) {
        or_panic(AnyIterator::advance_by(self, n).map(drop));
    }

    fn retreat_by(&mut self, n: usize) {
        or_panic(AnyIterator::retreat_by(self, n).map(drop));
    }

    fn distance_from(&self, origin: &Self) -> isize {
        or_panic(AnyIterator::distance_from(self, origin))
    }
}

impl<'a, T: ?Sized + 'static> From<AnyIterator<'a, T, RandomAccess>>
    for AnyIterator<'a, T, Bidirectional>
{
    fn from(iter: AnyIterator<'a, T, RandomAccess>) -> Self {
        iter.narrow()
    }
}

impl<'a, T: ?Sized + 'static> From<AnyIterator<'a, T, RandomAccess>> for AnyIterator<'a, T, Forward> {
    fn from(iter: AnyIterator<'a, T, RandomAccess>) -> Self {
        iter.narrow()
    }
}

impl<'a, T: ?Sized + 'static> From<AnyIterator<'a, T, Bidirectional>> for AnyIterator<'a, T, Forward> {
    fn from(iter: AnyIterator<'a, T, Bidirectional>) -> Self {
        iter.narrow()
    }
}
