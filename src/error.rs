//! Errors reported by erased iterators.
//!
//! Every fallible operation on an [`AnyIterator`](crate::AnyIterator) returns
//! an [`Error`] describing which [`Operation`] failed and why. The operator
//! implementations (`==`, `<`, `+`, `-`, `[]`) cannot return a [`Result`], so
//! they panic with the [`Display`](core::fmt::Display) form of the same error.

use derive_more::Display;

/// An operation of an erased iterator that can fail.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash, Display)]
pub enum Operation {
    /// Reading the element at the current position.
    #[display("dereference")]
    Dereference,
    /// Moving one position forward.
    #[display("advance")]
    Advance,
    /// Moving one position backward.
    #[display("retreat")]
    Retreat,
    /// Moving several positions at once.
    #[display("jump")]
    Jump,
    /// Comparing two positions for equality.
    #[display("equality comparison")]
    Equality,
    /// Comparing the order of two positions.
    #[display("ordering comparison")]
    Ordering,
    /// Measuring the distance between two positions.
    #[display("distance")]
    Distance,
}

/// The error returned by fallible operations on erased iterators.
///
/// # Examples
///
/// ```
/// use anyiter::{AnyForwardIterator, Error, Operation};
///
/// let empty = AnyForwardIterator::<u8>::empty();
/// let error = empty.get().unwrap_err();
/// assert_eq!(
///     error,
///     Error::Empty {
///         operation: Operation::Dereference
///     }
/// );
/// assert_eq!(
///     error.to_string(),
///     "bad any_iterator: dereference on an empty iterator"
/// );
/// ```
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash, thiserror::Error)]
pub enum Error {
    /// The operation was attempted on an iterator in the null state.
    #[error("bad any_iterator: {operation} on an empty iterator")]
    Empty {
        /// The operation that was attempted.
        operation: Operation,
    },
    /// The operation needs two iterators holding the same cursor type, but
    /// the operands hold different ones.
    #[error(
        "bad any_iterator: {operation} between different cursor types `{left}` and `{right}`"
    )]
    Mismatched {
        /// The operation that was attempted.
        operation: Operation,
        /// The cursor type of the left operand.
        left: &'static str,
        /// The cursor type of the right operand.
        right: &'static str,
    },
}

impl Error {
    /// Creates an [`Error::Empty`] and logs it.
    pub(crate) fn empty(operation: Operation) -> Self {
        let error = Self::Empty { operation };
        tracing::debug!(%error, "erased iterator operation failed");
        error
    }

    /// Creates an [`Error::Mismatched`] and logs it.
    pub(crate) fn mismatched(operation: Operation, left: &'static str, right: &'static str) -> Self {
        let error = Self::Mismatched {
            operation,
            left,
            right,
        };
        tracing::debug!(%error, "erased iterator operation failed");
        error
    }

    /// Returns the operation that failed.
    ///
    /// ```
    /// use anyiter::{AnyForwardIterator, Operation};
    ///
    /// let mut empty = AnyForwardIterator::<u8>::empty();
    /// let error = empty.advance().unwrap_err();
    /// assert_eq!(error.operation(), Operation::Advance);
    /// ```
    #[must_use]
    pub fn operation(&self) -> Operation {
        match *self {
            Self::Empty { operation } | Self::Mismatched { operation, .. } => operation,
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            Error::Empty {
                operation: Operation::Advance
            }
            .to_string(),
            "bad any_iterator: advance on an empty iterator"
        );
        assert_eq!(
            Error::Mismatched {
                operation: Operation::Distance,
                left: "a::Left",
                right: "b::Right",
            }
            .to_string(),
            "bad any_iterator: distance between different cursor types `a::Left` and `b::Right`"
        );
    }

    #[test]
    fn test_operation_accessor() {
        assert_eq!(Error::empty(Operation::Retreat).operation(), Operation::Retreat);
        assert_eq!(
            Error::mismatched(Operation::Ordering, "x", "y").operation(),
            Operation::Ordering
        );
    }

    #[test]
    fn test_error_is_small() {
        static_assertions::assert_impl_all!(Error: Copy, Send, Sync, core::error::Error);
        assert!(core::mem::size_of::<Error>() <= 5 * core::mem::size_of::<usize>());
    }
}
