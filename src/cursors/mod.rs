//! Ready-made cursors.
//!
//! [`SliceCursor`] walks a slice and reaches the random-access level.
//! [`Reversed`] walks any bidirectional cursor's sequence backward, keeping
//! the level of the cursor it wraps.

mod reversed;
mod slice;

pub use self::{reversed::Reversed, slice::SliceCursor};

/// Returns cursors at the beginning and one past the end of `slice`.
///
/// ```
/// use anyiter::{AnyRandomAccessIterator, slice_bounds};
///
/// let numbers = [1, 2, 3];
/// let (begin, end) = slice_bounds(&numbers);
/// let begin = AnyRandomAccessIterator::new(begin);
/// let end = AnyRandomAccessIterator::new(end);
/// assert_eq!(&end - &begin, 3);
/// ```
#[must_use]
pub fn slice_bounds<T>(slice: &[T]) -> (SliceCursor<'_, T>, SliceCursor<'_, T>) {
    (SliceCursor::begin(slice), SliceCursor::end(slice))
}
