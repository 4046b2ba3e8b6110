use core::cmp::Ordering;

use anyiter_internals::cursor::{BidirectionalCursor, ForwardCursor, RandomAccessCursor};

/// A cursor walking a bidirectional cursor's sequence backward.
///
/// A reversed cursor with base position `p` points at the element before
/// `p`. Reversing the end of a sequence therefore gives a cursor at its last
/// element, and reversing the beginning gives the past-the-end cursor of the
/// reversed sequence.
///
/// Reversed cursors are random-access when their base is.
///
/// # Examples
///
/// ```
/// use anyiter::{AnyForwardIterator, AnyRange, Reversed, SliceCursor};
///
/// let numbers = [1, 2, 3];
/// let range = AnyRange::new(
///     AnyForwardIterator::new(Reversed::new(SliceCursor::end(&numbers))),
///     AnyForwardIterator::new(Reversed::new(SliceCursor::begin(&numbers))),
/// )?;
/// assert!(range.copied().eq([3, 2, 1]));
/// # Ok::<(), anyiter::Error>(())
/// ```
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, Hash)]
pub struct Reversed<I> {
    /// The position one past the element this cursor points at.
    base: I,
}

impl<I> Reversed<I> {
    /// Creates a cursor pointing at the element before `base`.
    #[must_use]
    pub fn new(base: I) -> Self {
        Self { base }
    }

    /// Returns the underlying cursor.
    #[must_use]
    pub fn base(&self) -> &I {
        &self.base
    }

    /// Consumes the reversed cursor and returns the underlying cursor.
    #[must_use]
    pub fn into_base(self) -> I {
        self.base
    }
}

impl<I: PartialOrd> PartialOrd for Reversed<I> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        other.base.partial_cmp(&self.base)
    }
}

impl<'a, I: BidirectionalCursor<'a>> ForwardCursor<'a> for Reversed<I> {
    type Item = I::Item;

    fn get(&self) -> &'a I::Item {
        let mut previous = self.base.clone();
        previous.retreat();
        previous.get()
    }

    #[inline]
    fn advance(&mut self) {
        self.base.retreat();
    }
}

impl<'a, I: BidirectionalCursor<'a>> BidirectionalCursor<'a> for Reversed<I> {
    #[inline]
    fn retreat(&mut self) {
        self.base.advance();
    }
}

impl<'a, I: RandomAccessCursor<'a>> RandomAccessCursor<'a> for Reversed<I> {
    #[inline]
    fn advance_by(&mut self, n: usize) {
        self.base.retreat_by(n);
    }

    #[inline]
    fn retreat_by(&mut self, n: usize) {
        self.base.advance_by(n);
    }

    #[inline]
    fn distance_from(&self, origin: &Self) -> isize {
        origin.base.distance_from(&self.base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SliceCursor;

    #[test]
    fn test_reversed_walk() {
        let numbers = [1, 2, 3];
        let mut cursor = Reversed::new(SliceCursor::end(&numbers));
        let end = Reversed::new(SliceCursor::begin(&numbers));
        let mut seen = [0; 3];
        for slot in &mut seen {
            assert!(cursor != end);
            *slot = *cursor.get();
            cursor.advance();
        }
        assert!(cursor == end);
        assert_eq!(seen, [3, 2, 1]);
        assert_eq!(cursor.into_base().position(), 0);
    }

    #[test]
    fn test_reversed_is_mirrored() {
        let numbers = [1, 2, 3, 4];
        let rbegin = Reversed::new(SliceCursor::end(&numbers));
        let rend = Reversed::new(SliceCursor::begin(&numbers));
        assert_eq!(rend.distance_from(&rbegin), 4);
        assert!(rbegin < rend);

        let mut cursor = rbegin;
        cursor.advance_by(2);
        assert_eq!(cursor.get(), &2);
        cursor.retreat_by(1);
        assert_eq!(cursor.get(), &3);
        cursor.retreat();
        assert_eq!(cursor.get(), &4);
        assert_eq!(cursor.base().position(), 4);
    }
}
