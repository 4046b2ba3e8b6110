use core::iter::FusedIterator;

use anyiter_internals::level::{BidirectionalLevel, Level};

use crate::{AnyIterator, Error, category::Forward, category::RandomAccess};

/// A pair of erased iterators used as a Rust [`Iterator`].
///
/// The range yields the elements from `begin` up to, but not including,
/// `end`. With a bidirectional level it can also be consumed from the back.
///
/// # Examples
///
/// ```
/// use anyiter::{AnyBidirectionalIterator, AnyRange, SliceCursor};
///
/// let numbers = [1, 2, 3, 4];
/// let mut range = AnyRange::new(
///     AnyBidirectionalIterator::new(SliceCursor::begin(&numbers)),
///     AnyBidirectionalIterator::new(SliceCursor::end(&numbers)),
/// )?;
/// assert_eq!(range.next(), Some(&1));
/// assert_eq!(range.next_back(), Some(&4));
/// assert!(range.eq([&2, &3]));
/// # Ok::<(), anyiter::Error>(())
/// ```
pub struct AnyRange<'a, T: ?Sized + 'static, C: Level = Forward> {
    /// The next element to yield from the front.
    front: AnyIterator<'a, T, C>,
    /// One past the next element to yield from the back.
    back: AnyIterator<'a, T, C>,
}

impl<'a, T: ?Sized + 'static, C: Level> AnyRange<'a, T, C> {
    /// Creates a range from its two bounds.
    ///
    /// Fails if either bound is null, or if the bounds hold different cursor
    /// types.
    pub fn new(begin: AnyIterator<'a, T, C>, end: AnyIterator<'a, T, C>) -> Result<Self, Error> {
        begin.try_eq(&end)?;
        Ok(Self {
            front: begin,
            back: end,
        })
    }

    /// Returns whether no elements remain.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.front.try_eq(&self.back).unwrap_or(true)
    }

    /// Consumes the range and returns its current bounds.
    #[must_use]
    pub fn into_bounds(self) -> (AnyIterator<'a, T, C>, AnyIterator<'a, T, C>) {
        (self.front, self.back)
    }
}

impl<T: ?Sized + 'static> AnyRange<'_, T, RandomAccess> {
    /// Returns the number of remaining elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.back
            .distance_from(&self.front)
            .ok()
            .and_then(|distance| usize::try_from(distance).ok())
            .unwrap_or(0)
    }
}

impl<T: ?Sized + 'static, C: Level> Clone for AnyRange<'_, T, C> {
    fn clone(&self) -> Self {
        Self {
            front: self.front.clone(),
            back: self.back.clone(),
        }
    }
}

impl<T: ?Sized + 'static, C: Level> core::fmt::Debug for AnyRange<'_, T, C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AnyRange")
            .field("front", &self.front)
            .field("back", &self.back)
            .finish()
    }
}

impl<'a, T: ?Sized + 'static, C: Level> Iterator for AnyRange<'a, T, C> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.is_empty() {
            return None;
        }
        let item = self.front.get().ok()?;
        self.front.advance().ok()?;
        Some(item)
    }
}

impl<T: ?Sized + 'static, C: BidirectionalLevel> DoubleEndedIterator for AnyRange<'_, T, C> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.is_empty() {
            return None;
        }
        self.back.retreat().ok()?;
        self.back.get().ok()
    }
}

impl<T: ?Sized + 'static, C: Level> FusedIterator for AnyRange<'_, T, C> {}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;
    use crate::{
        AnyForwardIterator, AnyRandomAccessIterator, Operation,
        cursors::{Reversed, SliceCursor},
    };

    #[test]
    fn test_forward_range() {
        let words = ["x", "y", "z"];
        let range = AnyRange::new(
            AnyForwardIterator::new(SliceCursor::begin(&words)),
            AnyForwardIterator::new(SliceCursor::end(&words)),
        )
        .unwrap();
        assert_eq!(range.copied().collect::<Vec<_>>(), ["x", "y", "z"]);
    }

    #[test]
    fn test_random_access_len() {
        let numbers = [1, 2, 3, 4, 5];
        let mut range = AnyRange::new(
            AnyRandomAccessIterator::new(SliceCursor::begin(&numbers)),
            AnyRandomAccessIterator::new(SliceCursor::end(&numbers)),
        )
        .unwrap();
        assert_eq!(range.len(), 5);
        range.next();
        range.next_back();
        assert_eq!(range.len(), 3);

        let (front, back) = range.into_bounds();
        assert_eq!(front.get(), Ok(&2));
        assert_eq!(&back - &front, 3);
    }

    #[test]
    fn test_meeting_in_the_middle() {
        let numbers = [1, 2, 3];
        let mut range = AnyRange::new(
            AnyRandomAccessIterator::new(SliceCursor::begin(&numbers)),
            AnyRandomAccessIterator::new(SliceCursor::end(&numbers)),
        )
        .unwrap();
        assert_eq!(range.next_back(), Some(&3));
        assert_eq!(range.next(), Some(&1));
        assert_eq!(range.next_back(), Some(&2));
        assert!(range.is_empty());
        assert_eq!(range.next(), None);
        assert_eq!(range.next_back(), None);
    }

    #[test]
    fn test_invalid_bounds() {
        let numbers = [1, 2];
        let begin = AnyForwardIterator::new(SliceCursor::begin(&numbers));
        let reversed = AnyForwardIterator::new(Reversed::new(SliceCursor::end(&numbers)));

        assert_eq!(
            AnyRange::new(begin.clone(), AnyForwardIterator::empty()).map(|_| ()),
            Err(Error::Empty {
                operation: Operation::Equality
            })
        );
        assert!(matches!(
            AnyRange::new(begin, reversed),
            Err(Error::Mismatched { .. })
        ));
    }
}
