//! Capability contracts implemented by concrete cursor types.
//!
//! A cursor is a position into some sequence. Unlike [`Iterator`], a cursor
//! is not consumed by reading it: it can be dereferenced any number of times,
//! copied with [`Clone`], and compared with other cursors into the same
//! sequence with [`PartialEq`].
//!
//! The three traits in this module form a strict hierarchy:
//!
//! - [`ForwardCursor`]: dereference and advance
//! - [`BidirectionalCursor`]: additionally retreat
//! - [`RandomAccessCursor`]: additionally jump by an offset, measure the
//!   distance between two cursors and order them
//!
//! The erasure layer only relies on these traits. It does not check that an
//! implementation obeys the laws of its level (for example that `retreat`
//! undoes `advance`); that is the implementation's responsibility.
//!
//! [`Iterator`]: core::iter::Iterator

/// A cursor that can be dereferenced and moved forward.
///
/// The lifetime `'a` is the lifetime of the references handed out by
/// [`get`](ForwardCursor::get). It is not tied to the borrow of the cursor
/// itself, mirroring how a position into a container stays valid while the
/// cursor is copied around or moved forward.
///
/// # Equality
///
/// Two cursors compare equal when they denote the same position. Comparing
/// cursors into different sequences is allowed to return any answer, but must
/// not panic or misbehave.
///
/// # Examples
///
/// ```
/// use anyiter_internals::cursor::ForwardCursor;
///
/// #[derive(Clone, PartialEq)]
/// struct Chars<'a> {
///     text: &'a [u8],
///     position: usize,
/// }
///
/// impl<'a> ForwardCursor<'a> for Chars<'a> {
///     type Item = u8;
///
///     fn get(&self) -> &'a u8 {
///         &self.text[self.position]
///     }
///
///     fn advance(&mut self) {
///         self.position += 1;
///     }
/// }
///
/// let mut cursor = Chars { text: b"ab", position: 0 };
/// let first = cursor.get();
/// cursor.advance();
/// assert_eq!((*first, *cursor.get()), (b'a', b'b'));
/// ```
pub trait ForwardCursor<'a>: Clone + PartialEq {
    /// The type of the elements the cursor points at.
    type Item: ?Sized + 'a;

    /// Returns a reference to the element at the current position.
    ///
    /// Calling this on a past-the-end cursor is a logic error; the
    /// implementation may panic.
    fn get(&self) -> &'a Self::Item;

    /// Moves the cursor to the next position.
    fn advance(&mut self);
}

/// A cursor that can also move backward.
///
/// For any cursor `c` that is not at the beginning of its sequence,
/// `c.retreat(); c.advance();` must leave `c` equal to its original value,
/// and the other way around.
pub trait BidirectionalCursor<'a>: ForwardCursor<'a> {
    /// Moves the cursor to the previous position.
    fn retreat(&mut self);
}

/// A cursor with constant-time jumps, distances and ordering.
///
/// The [`PartialOrd`] implementation must order cursors into the same
/// sequence by position, consistently with
/// [`distance_from`](RandomAccessCursor::distance_from).
pub trait RandomAccessCursor<'a>: BidirectionalCursor<'a> + PartialOrd {
    /// Moves the cursor `n` positions forward.
    fn advance_by(&mut self, n: usize);

    /// Moves the cursor `n` positions backward.
    fn retreat_by(&mut self, n: usize);

    /// Returns the signed number of positions from `origin` to `self`.
    ///
    /// `a.distance_from(&b)` is the value `d` such that advancing `b` by `d`
    /// yields `a`.
    fn distance_from(&self, origin: &Self) -> isize;
}
