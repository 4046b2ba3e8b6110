use anyiter_internals::level::BidirectionalLevel;

use super::{AnyIterator, on_null};
use crate::{Error, Operation};

impl<T: ?Sized + 'static, C: BidirectionalLevel> AnyIterator<'_, T, C> {
    /// Moves to the previous position.
    ///
    /// Returns `self` to allow chaining. On failure the iterator is left
    /// unchanged.
    ///
    /// ```
    /// use anyiter::{AnyBidirectionalIterator, SliceCursor};
    ///
    /// let numbers = [1, 2, 3];
    /// let mut iter = AnyBidirectionalIterator::new(SliceCursor::end(&numbers));
    /// assert_eq!(iter.retreat()?.get(), Ok(&3));
    /// # Ok::<(), anyiter::Error>(())
    /// ```
    pub fn retreat(&mut self) -> Result<&mut Self, Error> {
        self.raw.retreat().map_err(on_null(Operation::Retreat))?;
        Ok(self)
    }

    /// Moves to the previous position and returns a copy of the iterator
    /// from before the move.
    pub fn post_retreat(&mut self) -> Result<Self, Error> {
        self.raw
            .post_retreat()
            .map(Self::from_raw)
            .map_err(on_null(Operation::Retreat))
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        AnyBidirectionalIterator, Error, Operation,
        cursors::{Reversed, SliceCursor},
    };

    #[test]
    fn test_round_trip() {
        let words = ["a", "b", "c"];
        let begin = AnyBidirectionalIterator::new(SliceCursor::at(&words, 1));
        let mut iter = begin.clone();
        iter.advance().unwrap().retreat().unwrap();
        assert_eq!(iter, begin);

        let previous = iter.post_retreat().unwrap();
        assert_eq!(previous, begin);
        assert_eq!(iter.get(), Ok(&"a"));
    }

    #[test]
    fn test_reversed_walks_backward() {
        let numbers = [1, 2, 3];
        let mut iter = AnyBidirectionalIterator::new(Reversed::new(SliceCursor::end(&numbers)));
        assert_eq!(iter.get(), Ok(&3));
        iter.advance().unwrap();
        assert_eq!(iter.get(), Ok(&2));
        iter.retreat().unwrap();
        assert_eq!(iter.get(), Ok(&3));
    }

    #[test]
    fn test_empty_retreat_fails() {
        let mut iter = AnyBidirectionalIterator::<u8>::empty();
        assert_eq!(
            iter.retreat().map(|_| ()),
            Err(Error::Empty {
                operation: Operation::Retreat
            })
        );
        assert!(iter.post_retreat().is_err());
        assert!(iter.is_null());
    }
}
