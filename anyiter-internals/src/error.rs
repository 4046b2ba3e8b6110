//! The error reported by operations on a null iterator.

/// Returned when dereferencing, moving or comparing a [`RawIterator`] that
/// is in the null state.
///
/// Null iterators are produced by [`RawIterator::null`] and by moving out of
/// an iterator with [`RawIterator::take`]. Copying, moving, assigning and
/// dropping a null iterator always succeed; every other operation returns
/// this error.
///
/// [`RawIterator`]: crate::RawIterator
/// [`RawIterator::null`]: crate::RawIterator::null
/// [`RawIterator::take`]: crate::RawIterator::take
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash, Default)]
pub struct NullIterator;

impl core::fmt::Display for NullIterator {
    fn fmt(&self, formatter: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        formatter.write_str("bad any_iterator")
    }
}

impl core::error::Error for NullIterator {}
