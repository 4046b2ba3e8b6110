use core::cmp::Ordering;

use anyiter_internals::cursor::{BidirectionalCursor, ForwardCursor, RandomAccessCursor};

/// A random-access cursor over a slice.
///
/// Valid positions range from `0` (the first element) to `slice.len()` (one
/// past the last element). Dereferencing the past-the-end position panics,
/// like indexing a slice out of bounds.
///
/// Two cursors compare equal when they point into the same slice at the same
/// position. Cursors into different slices are unordered.
///
/// # Examples
///
/// ```
/// use anyiter::{SliceCursor, cursor::ForwardCursor};
///
/// let letters = ['a', 'b'];
/// let mut cursor = SliceCursor::begin(&letters);
/// assert_eq!(cursor.get(), &'a');
/// cursor.advance();
/// assert_eq!(cursor.get(), &'b');
/// cursor.advance();
/// assert!(cursor == SliceCursor::end(&letters));
/// ```
pub struct SliceCursor<'a, T> {
    /// The slice the cursor points into.
    slice: &'a [T],
    /// The index of the current element.
    position: usize,
}

impl<'a, T> SliceCursor<'a, T> {
    /// Returns a cursor at the first element of `slice`.
    #[must_use]
    pub fn begin(slice: &'a [T]) -> Self {
        Self { slice, position: 0 }
    }

    /// Returns a cursor one past the last element of `slice`.
    #[must_use]
    pub fn end(slice: &'a [T]) -> Self {
        Self {
            slice,
            position: slice.len(),
        }
    }

    /// Returns a cursor at index `position` of `slice`.
    ///
    /// # Panics
    ///
    /// Panics if `position` is greater than `slice.len()`.
    #[must_use]
    pub fn at(slice: &'a [T], position: usize) -> Self {
        assert!(
            position <= slice.len(),
            "cursor position {position} is out of bounds for a slice of length {}",
            slice.len()
        );
        Self { slice, position }
    }

    /// Returns the index the cursor points at.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Returns the whole slice the cursor points into.
    #[must_use]
    pub fn as_slice(&self) -> &'a [T] {
        self.slice
    }

    /// Returns whether both cursors point into the same slice.
    fn same_slice(&self, other: &Self) -> bool {
        core::ptr::eq(self.slice, other.slice)
    }
}

impl<T> Clone for SliceCursor<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for SliceCursor<'_, T> {}

impl<T> PartialEq for SliceCursor<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.same_slice(other) && self.position == other.position
    }
}

impl<T> PartialOrd for SliceCursor<'_, T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.same_slice(other) {
            self.position.partial_cmp(&other.position)
        } else {
            None
        }
    }
}

impl<T> core::fmt::Debug for SliceCursor<'_, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SliceCursor")
            .field("position", &self.position)
            .field("len", &self.slice.len())
            .finish()
    }
}

impl<'a, T: 'a> ForwardCursor<'a> for SliceCursor<'a, T> {
    type Item = T;

    #[inline]
    fn get(&self) -> &'a T {
        &self.slice[self.position]
    }

    #[inline]
    fn advance(&mut self) {
        self.position += 1;
    }
}

impl<'a, T: 'a> BidirectionalCursor<'a> for SliceCursor<'a, T> {
    #[inline]
    fn retreat(&mut self) {
        self.position -= 1;
    }
}

impl<'a, T: 'a> RandomAccessCursor<'a> for SliceCursor<'a, T> {
    #[inline]
    fn advance_by(&mut self, n: usize) {
        self.position += n;
    }

    #[inline]
    fn retreat_by(&mut self, n: usize) {
        self.position -= n;
    }

    #[inline]
    fn distance_from(&self, origin: &Self) -> isize {
        self.position.wrapping_sub(origin.position) as isize
    }
}
