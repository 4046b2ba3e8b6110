//! Capability levels and the traits connecting them to operation tables.
//!
//! A level is a zero-sized marker type selecting which operations an erased
//! iterator supports:
//!
//! - [`Forward`]: dereference, advance, equality
//! - [`Bidirectional`]: additionally retreat
//! - [`RandomAccess`]: additionally jumps, distance and ordering
//!
//! Each level names its operation table type through [`Level::Vtable`]. A
//! cursor can be erased at a level when it implements the matching cursor
//! trait, which is expressed by [`Erasable`]. An erased iterator can be
//! narrowed to any lower level through [`NarrowTo`]; the reverse direction has
//! no implementation, so widening does not compile.

use crate::{
    cursor::{BidirectionalCursor, ForwardCursor, RandomAccessCursor},
    vtable::{BidirectionalVtable, ForwardVtable, RandomAccessVtable},
};

/// Marker for erased iterators that can only move forward.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Default, Hash)]
pub struct Forward;

/// Marker for erased iterators that can move forward and backward.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Default, Hash)]
pub struct Bidirectional;

/// Marker for erased iterators supporting constant-time jumps, distances and
/// ordering.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Default, Hash)]
pub struct RandomAccess;

mod sealed_level {
    use super::*;

    pub trait Sealed: 'static {}

    impl Sealed for Forward {}
    impl Sealed for Bidirectional {}
    impl Sealed for RandomAccess {}
}

/// A capability level of an erased iterator.
///
/// This trait is sealed and implemented for [`Forward`], [`Bidirectional`] and
/// [`RandomAccess`].
pub trait Level: sealed_level::Sealed {
    /// Human-readable name of the level, used in diagnostics.
    const NAME: &'static str;

    /// The operation table of erased iterators at this level.
    type Vtable<T: ?Sized + 'static>: 'static;

    /// Returns the table of the null state.
    #[doc(hidden)]
    fn null<T: ?Sized + 'static>() -> &'static Self::Vtable<T>;

    /// Returns the forward part of a table.
    #[doc(hidden)]
    fn forward<T: ?Sized + 'static>(vtable: &'static Self::Vtable<T>) -> &'static ForwardVtable<T>;
}

impl Level for Forward {
    const NAME: &'static str = "forward";

    type Vtable<T: ?Sized + 'static> = ForwardVtable<T>;

    #[inline]
    fn null<T: ?Sized + 'static>() -> &'static ForwardVtable<T> {
        ForwardVtable::null()
    }

    #[inline]
    fn forward<T: ?Sized + 'static>(vtable: &'static ForwardVtable<T>) -> &'static ForwardVtable<T> {
        vtable
    }
}

impl Level for Bidirectional {
    const NAME: &'static str = "bidirectional";

    type Vtable<T: ?Sized + 'static> = BidirectionalVtable<T>;

    #[inline]
    fn null<T: ?Sized + 'static>() -> &'static BidirectionalVtable<T> {
        BidirectionalVtable::null()
    }

    #[inline]
    fn forward<T: ?Sized + 'static>(
        vtable: &'static BidirectionalVtable<T>,
    ) -> &'static ForwardVtable<T> {
        vtable.forward()
    }
}

impl Level for RandomAccess {
    const NAME: &'static str = "random access";

    type Vtable<T: ?Sized + 'static> = RandomAccessVtable<T>;

    #[inline]
    fn null<T: ?Sized + 'static>() -> &'static RandomAccessVtable<T> {
        RandomAccessVtable::null()
    }

    #[inline]
    fn forward<T: ?Sized + 'static>(
        vtable: &'static RandomAccessVtable<T>,
    ) -> &'static ForwardVtable<T> {
        vtable.bidirectional().forward()
    }
}

/// Levels that include the ability to retreat.
///
/// Implemented for [`Bidirectional`] and [`RandomAccess`].
pub trait BidirectionalLevel: Level {
    /// Returns the bidirectional part of a table.
    #[doc(hidden)]
    fn bidirectional<T: ?Sized + 'static>(
        vtable: &'static Self::Vtable<T>,
    ) -> &'static BidirectionalVtable<T>;
}

impl BidirectionalLevel for Bidirectional {
    #[inline]
    fn bidirectional<T: ?Sized + 'static>(
        vtable: &'static BidirectionalVtable<T>,
    ) -> &'static BidirectionalVtable<T> {
        vtable
    }
}

impl BidirectionalLevel for RandomAccess {
    #[inline]
    fn bidirectional<T: ?Sized + 'static>(
        vtable: &'static RandomAccessVtable<T>,
    ) -> &'static BidirectionalVtable<T> {
        vtable.bidirectional()
    }
}

/// Cursor types that can be erased at level `L`.
///
/// This is implemented automatically: every [`ForwardCursor`] is erasable at
/// [`Forward`], every [`BidirectionalCursor`] at [`Bidirectional`], and every
/// [`RandomAccessCursor`] at [`RandomAccess`]. The element type must be
/// `'static` so the operation table can be shared by all lifetimes of the
/// cursor.
pub trait Erasable<'a, L: Level>: ForwardCursor<'a, Item: 'static> + 'a {
    /// Returns the operation table of this cursor type at level `L`.
    #[doc(hidden)]
    fn vtable() -> &'static L::Vtable<Self::Item>;
}

impl<'a, I> Erasable<'a, Forward> for I
where
    I: ForwardCursor<'a, Item: 'static> + 'a,
{
    fn vtable() -> &'static ForwardVtable<I::Item> {
        ForwardVtable::of::<I>()
    }
}

impl<'a, I> Erasable<'a, Bidirectional> for I
where
    I: BidirectionalCursor<'a, Item: 'static> + 'a,
{
    fn vtable() -> &'static BidirectionalVtable<I::Item> {
        BidirectionalVtable::of::<I>()
    }
}

impl<'a, I> Erasable<'a, RandomAccess> for I
where
    I: RandomAccessCursor<'a, Item: 'static> + 'a,
{
    fn vtable() -> &'static RandomAccessVtable<I::Item> {
        RandomAccessVtable::of::<I>()
    }
}

/// Levels that can be narrowed to level `M`.
///
/// Implemented for every pair where `M` is the same as or lower than `Self`.
pub trait NarrowTo<M: Level>: Level {
    /// Returns the part of `vtable` that is a table of level `M`.
    #[doc(hidden)]
    fn narrow<T: ?Sized + 'static>(vtable: &'static Self::Vtable<T>) -> &'static M::Vtable<T>;
}

impl NarrowTo<RandomAccess> for RandomAccess {
    #[inline]
    fn narrow<T: ?Sized + 'static>(
        vtable: &'static RandomAccessVtable<T>,
    ) -> &'static RandomAccessVtable<T> {
        vtable
    }
}

impl NarrowTo<Bidirectional> for RandomAccess {
    #[inline]
    fn narrow<T: ?Sized + 'static>(
        vtable: &'static RandomAccessVtable<T>,
    ) -> &'static BidirectionalVtable<T> {
        vtable.bidirectional()
    }
}

impl NarrowTo<Forward> for RandomAccess {
    #[inline]
    fn narrow<T: ?Sized + 'static>(
        vtable: &'static RandomAccessVtable<T>,
    ) -> &'static ForwardVtable<T> {
        vtable.bidirectional().forward()
    }
}

impl NarrowTo<Bidirectional> for Bidirectional {
    #[inline]
    fn narrow<T: ?Sized + 'static>(
        vtable: &'static BidirectionalVtable<T>,
    ) -> &'static BidirectionalVtable<T> {
        vtable
    }
}

impl NarrowTo<Forward> for Bidirectional {
    #[inline]
    fn narrow<T: ?Sized + 'static>(
        vtable: &'static BidirectionalVtable<T>,
    ) -> &'static ForwardVtable<T> {
        vtable.forward()
    }
}

impl NarrowTo<Forward> for Forward {
    #[inline]
    fn narrow<T: ?Sized + 'static>(vtable: &'static ForwardVtable<T>) -> &'static ForwardVtable<T> {
        vtable
    }
}
