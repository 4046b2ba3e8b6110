use core::{
    cmp::Ordering,
    ops::{Add, AddAssign, Index, Sub, SubAssign},
};

use super::{AnyIterator, on_null, or_panic};
use crate::{Error, Operation, category::RandomAccess};

impl<'a, T: ?Sized + 'static> AnyIterator<'a, T, RandomAccess> {
    /// Moves `n` positions forward.
    pub fn advance_by(&mut self, n: usize) -> Result<&mut Self, Error> {
        self.raw.advance_by(n).map_err(on_null(Operation::Jump))?;
        Ok(self)
    }

    /// Moves `n` positions backward.
    pub fn retreat_by(&mut self, n: usize) -> Result<&mut Self, Error> {
        self.raw.retreat_by(n).map_err(on_null(Operation::Jump))?;
        Ok(self)
    }

    /// Moves by a signed number of positions: forward when `offset` is
    /// positive, backward when it is negative.
    pub fn offset_by(&mut self, offset: isize) -> Result<&mut Self, Error> {
        if offset >= 0 {
            self.advance_by(offset.unsigned_abs())
        } else {
            self.retreat_by(offset.unsigned_abs())
        }
    }

    /// Returns the signed number of positions from `origin` to `self`.
    ///
    /// Advancing `origin` by the result yields an iterator equal to `self`.
    ///
    /// ```
    /// use anyiter::{AnyRandomAccessIterator, SliceCursor};
    ///
    /// let numbers = [1, 2, 3, 4];
    /// let begin = AnyRandomAccessIterator::new(SliceCursor::begin(&numbers));
    /// let end = AnyRandomAccessIterator::new(SliceCursor::end(&numbers));
    /// assert_eq!(end.distance_from(&begin), Ok(4));
    /// assert_eq!(begin.distance_from(&end), Ok(-4));
    /// assert_eq!(&end - &begin, 4);
    /// ```
    pub fn distance_from(&self, origin: &Self) -> Result<isize, Error> {
        self.check_comparable(origin, Operation::Distance)?;
        // SAFETY:
        // 1. `check_comparable` verified that both iterators share a table
        unsafe { self.raw.distance_unchecked(&origin.raw) }.map_err(on_null(Operation::Distance))
    }

    /// Returns whether `self` is at an earlier position than `other`.
    pub fn try_lt(&self, other: &Self) -> Result<bool, Error> {
        self.check_comparable(other, Operation::Ordering)?;
        // SAFETY:
        // 1. `check_comparable` verified that both iterators share a table
        unsafe { self.raw.lt_unchecked(&other.raw) }.map_err(on_null(Operation::Ordering))
    }

    /// Compares the positions of both iterators.
    ///
    /// The ordering is derived from [`try_lt`](AnyIterator::try_lt) alone:
    /// positions that are not before each other in either direction compare
    /// equal.
    pub fn try_cmp(&self, other: &Self) -> Result<Ordering, Error> {
        if self.try_lt(other)? {
            Ok(Ordering::Less)
        } else if other.try_lt(self)? {
            Ok(Ordering::Greater)
        } else {
            Ok(Ordering::Equal)
        }
    }

    /// Returns the element `offset` positions away, without moving `self`.
    ///
    /// ```
    /// use anyiter::{AnyRandomAccessIterator, SliceCursor};
    ///
    /// let numbers = [10, 20, 30];
    /// let middle = AnyRandomAccessIterator::new(SliceCursor::at(&numbers, 1));
    /// assert_eq!(middle.at(-1), Ok(&10));
    /// assert_eq!(middle.at(1), Ok(&30));
    /// assert_eq!(middle[0], 20);
    /// ```
    pub fn at(&self, offset: isize) -> Result<&'a T, Error> {
        let mut moved = self.clone();
        moved.offset_by(offset)?;
        moved.get()
    }

    /// Returns the element `n` positions ahead, without moving `self`.
    fn ahead(&self, n: usize) -> Result<&'a T, Error> {
        let mut moved = self.clone();
        moved.advance_by(n)?;
        moved.get()
    }
}

impl<T: ?Sized + 'static> AddAssign<usize> for AnyIterator<'_, T, RandomAccess> {
    fn add_assign(&mut self, n: usize) {
        or_panic(self.advance_by(n));
    }
}

impl<T: ?Sized + 'static> SubAssign<usize> for AnyIterator<'_, T, RandomAccess> {
    fn sub_assign(&mut self, n: usize) {
        or_panic(self.retreat_by(n));
    }
}

impl<T: ?Sized + 'static> Add<usize> for AnyIterator<'_, T, RandomAccess> {
    type Output = Self;

    fn add(mut self, n: usize) -> Self {
        self += n;
        self
    }
}

impl<'a, T: ?Sized + 'static> Add<usize> for &AnyIterator<'a, T, RandomAccess> {
    type Output = AnyIterator<'a, T, RandomAccess>;

    fn add(self, n: usize) -> Self::Output {
        self.clone() + n
    }
}

impl<'a, T: ?Sized + 'static> Add<AnyIterator<'a, T, RandomAccess>> for usize {
    type Output = AnyIterator<'a, T, RandomAccess>;

    fn add(self, iter: AnyIterator<'a, T, RandomAccess>) -> Self::Output {
        iter + self
    }
}

impl<T: ?Sized + 'static> Sub<usize> for AnyIterator<'_, T, RandomAccess> {
    type Output = Self;

    fn sub(mut self, n: usize) -> Self {
        self -= n;
        self
    }
}

impl<'a, T: ?Sized + 'static> Sub<usize> for &AnyIterator<'a, T, RandomAccess> {
    type Output = AnyIterator<'a, T, RandomAccess>;

    fn sub(self, n: usize) -> Self::Output {
        self.clone() - n
    }
}

impl<T: ?Sized + 'static> Sub for &AnyIterator<'_, T, RandomAccess> {
    type Output = isize;

    fn sub(self, origin: Self) -> isize {
        or_panic(self.distance_from(origin))
    }
}

/// # Panics
///
/// Every comparison panics if either iterator is null or if the two
/// iterators hold different cursor types. Use
/// [`try_cmp`](AnyIterator::try_cmp) to handle those cases.
impl<T: ?Sized + 'static> PartialOrd for AnyIterator<'_, T, RandomAccess> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(or_panic(self.try_cmp(other)))
    }

    fn lt(&self, other: &Self) -> bool {
        or_panic(self.try_lt(other))
    }

    fn le(&self, other: &Self) -> bool {
        !or_panic(other.try_lt(self))
    }

    fn gt(&self, other: &Self) -> bool {
        or_panic(other.try_lt(self))
    }

    fn ge(&self, other: &Self) -> bool {
        !or_panic(self.try_lt(other))
    }
}

impl<T: ?Sized + 'static> Index<usize> for AnyIterator<'_, T, RandomAccess> {
    type Output = T;

    fn index(&self, n: usize) -> &T {
        or_panic(self.ahead(n))
    }
}

#[cfg(test)]
mod tests {
    use crate::{AnyRandomAccessIterator, Error, Operation, SliceCursor, cursors::Reversed};

    #[test]
    fn test_arithmetic() {
        let numbers = [0, 1, 2, 3, 4, 5];
        let begin = AnyRandomAccessIterator::new(SliceCursor::begin(&numbers));

        let third = &begin + 3;
        assert_eq!(third.get(), Ok(&3));
        assert_eq!((2_usize + third.clone()).get(), Ok(&5));
        assert_eq!((&third - 2_usize).get(), Ok(&1));
        assert_eq!(&third - &begin, 3);
        assert_eq!(&begin - &third, -3);

        let mut iter = begin.clone();
        iter += 4;
        iter -= 1;
        assert_eq!(iter, third);
        iter.offset_by(-3).unwrap();
        assert_eq!(iter, begin);
    }

    #[test]
    fn test_ordering() {
        let numbers = [1, 2, 3];
        let first = AnyRandomAccessIterator::new(SliceCursor::at(&numbers, 0));
        let second = AnyRandomAccessIterator::new(SliceCursor::at(&numbers, 1));

        assert!(first < second);
        assert!(first <= second);
        assert!(second > first);
        assert!(second >= first);
        assert!(first <= first.clone());
        assert!(first >= first.clone());
        assert_eq!(first.try_cmp(&second), Ok(core::cmp::Ordering::Less));
        assert_eq!(second.try_cmp(&first), Ok(core::cmp::Ordering::Greater));
        assert_eq!(first.try_cmp(&first), Ok(core::cmp::Ordering::Equal));
    }

    #[test]
    fn test_subscript() {
        let numbers = [5, 6, 7, 8];
        let iter = AnyRandomAccessIterator::new(SliceCursor::at(&numbers, 1));
        assert_eq!(iter[0], 6);
        assert_eq!(iter[2], 8);
        assert_eq!(iter.at(-1), Ok(&5));
        assert_eq!(iter.get(), Ok(&6));
    }

    #[test]
    fn test_reversed_random_access() {
        let numbers = [1, 2, 3, 4];
        let rbegin = AnyRandomAccessIterator::new(Reversed::new(SliceCursor::end(&numbers)));
        let rend = AnyRandomAccessIterator::new(Reversed::new(SliceCursor::begin(&numbers)));
        assert_eq!(&rend - &rbegin, 4);
        assert!(rbegin < rend);
        assert_eq!(rbegin[1], 3);
    }

    #[test]
    fn test_empty_and_mismatched_fail() {
        let numbers = [1, 2];
        let slice = AnyRandomAccessIterator::new(SliceCursor::begin(&numbers));
        let reversed = AnyRandomAccessIterator::new(Reversed::new(SliceCursor::end(&numbers)));
        let empty = AnyRandomAccessIterator::<i32>::empty();

        assert_eq!(
            slice.distance_from(&empty),
            Err(Error::Empty {
                operation: Operation::Distance
            })
        );
        assert!(matches!(
            slice.try_lt(&reversed),
            Err(Error::Mismatched {
                operation: Operation::Ordering,
                ..
            })
        ));
        assert_eq!(
            empty.at(0),
            Err(Error::Empty {
                operation: Operation::Jump
            })
        );
    }

    #[test]
    #[should_panic(expected = "bad any_iterator: ordering comparison on an empty iterator")]
    fn test_comparing_empty_panics() {
        let empty = AnyRandomAccessIterator::<i32>::empty();
        let _ = empty < AnyRandomAccessIterator::empty();
    }
}
