#![allow(dead_code)]

use std::cell::Cell;

use anyiter::{
    AnyRandomAccessIterator,
    cursor::{BidirectionalCursor, ForwardCursor, RandomAccessCursor},
};

/// Installs a fmt subscriber writing through the test harness.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

struct ListNode<T> {
    value: T,
    next: Option<Box<ListNode<T>>>,
}

/// A singly linked list.
pub struct ForwardList<T> {
    head: Option<Box<ListNode<T>>>,
}

impl<T> ForwardList<T> {
    pub fn new() -> Self {
        Self { head: None }
    }

    pub fn push_front(&mut self, value: T) {
        let next = self.head.take();
        self.head = Some(Box::new(ListNode { value, next }));
    }

    pub fn begin(&self) -> ListCursor<'_, T> {
        ListCursor {
            node: self.head.as_deref(),
        }
    }

    pub fn end(&self) -> ListCursor<'_, T> {
        ListCursor { node: None }
    }

    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        let mut values = Vec::new();
        let mut cursor = self.begin();
        while cursor != self.end() {
            values.push(cursor.get().clone());
            cursor.advance();
        }
        values
    }
}

impl<T> FromIterator<T> for ForwardList<T> {
    fn from_iter<It: IntoIterator<Item = T>>(iter: It) -> Self {
        let values: Vec<T> = iter.into_iter().collect();
        let mut list = Self::new();
        for value in values.into_iter().rev() {
            list.push_front(value);
        }
        list
    }
}

/// A one-word forward cursor into a [`ForwardList`].
pub struct ListCursor<'a, T> {
    node: Option<&'a ListNode<T>>,
}

impl<T> Clone for ListCursor<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ListCursor<'_, T> {}

impl<T> PartialEq for ListCursor<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        match (self.node, other.node) {
            (Some(lhs), Some(rhs)) => std::ptr::eq(lhs, rhs),
            (None, None) => true,
            _ => false,
        }
    }
}

impl<'a, T: 'a> ForwardCursor<'a> for ListCursor<'a, T> {
    type Item = T;

    fn get(&self) -> &'a T {
        &self.node.expect("dereferenced the end of a list").value
    }

    fn advance(&mut self) {
        self.node = self.node.and_then(|node| node.next.as_deref());
    }
}

struct ArenaNode<T> {
    value: Option<T>,
    prev: usize,
    next: usize,
}

/// A doubly linked list whose nodes live in a vector. Node 0 is a sentinel
/// marking both ends.
pub struct ArenaList<T> {
    nodes: Vec<ArenaNode<T>>,
}

impl<T> ArenaList<T> {
    pub fn new() -> Self {
        Self {
            nodes: vec![ArenaNode {
                value: None,
                prev: 0,
                next: 0,
            }],
        }
    }

    fn insert_before(&mut self, position: usize, value: T) {
        let index = self.nodes.len();
        let prev = self.nodes[position].prev;
        self.nodes.push(ArenaNode {
            value: Some(value),
            prev,
            next: position,
        });
        self.nodes[prev].next = index;
        self.nodes[position].prev = index;
    }

    pub fn push_back(&mut self, value: T) {
        self.insert_before(0, value);
    }

    pub fn push_front(&mut self, value: T) {
        let first = self.nodes[0].next;
        self.insert_before(first, value);
    }

    pub fn begin(&self) -> ArenaCursor<'_, T> {
        ArenaCursor {
            list: self,
            index: self.nodes[0].next,
        }
    }

    pub fn end(&self) -> ArenaCursor<'_, T> {
        ArenaCursor {
            list: self,
            index: 0,
        }
    }

    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        let mut values = Vec::new();
        let mut index = self.nodes[0].next;
        while index != 0 {
            values.extend(self.nodes[index].value.clone());
            index = self.nodes[index].next;
        }
        values
    }
}

impl<T> FromIterator<T> for ArenaList<T> {
    fn from_iter<It: IntoIterator<Item = T>>(iter: It) -> Self {
        let mut list = Self::new();
        for value in iter {
            list.push_back(value);
        }
        list
    }
}

/// A two-word bidirectional cursor into an [`ArenaList`].
pub struct ArenaCursor<'a, T> {
    list: &'a ArenaList<T>,
    index: usize,
}

impl<T> Clone for ArenaCursor<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ArenaCursor<'_, T> {}

impl<T> PartialEq for ArenaCursor<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.list, other.list) && self.index == other.index
    }
}

impl<'a, T: 'a> ForwardCursor<'a> for ArenaCursor<'a, T> {
    type Item = T;

    fn get(&self) -> &'a T {
        self.list.nodes[self.index]
            .value
            .as_ref()
            .expect("dereferenced the end of a list")
    }

    fn advance(&mut self) {
        self.index = self.list.nodes[self.index].next;
    }
}

impl<'a, T: 'a> BidirectionalCursor<'a> for ArenaCursor<'a, T> {
    fn retreat(&mut self) {
        self.index = self.list.nodes[self.index].prev;
    }
}

thread_local! {
    static LIVE_INSTANCES: Cell<isize> = const { Cell::new(0) };
}

/// Returns the number of [`InstanceCounted`] values alive on this thread.
pub fn live_instances() -> isize {
    LIVE_INSTANCES.with(Cell::get)
}

/// A cursor wrapper counting its live instances.
#[derive(PartialEq, PartialOrd)]
pub struct InstanceCounted<I> {
    inner: I,
}

impl<I> InstanceCounted<I> {
    pub fn new(inner: I) -> Self {
        LIVE_INSTANCES.with(|live| live.set(live.get() + 1));
        Self { inner }
    }
}

impl<I: Clone> Clone for InstanceCounted<I> {
    fn clone(&self) -> Self {
        Self::new(self.inner.clone())
    }
}

impl<I> Drop for InstanceCounted<I> {
    fn drop(&mut self) {
        LIVE_INSTANCES.with(|live| live.set(live.get() - 1));
    }
}

impl<'a, I: ForwardCursor<'a>> ForwardCursor<'a> for InstanceCounted<I> {
    type Item = I::Item;

    fn get(&self) -> &'a I::Item {
        self.inner.get()
    }

    fn advance(&mut self) {
        self.inner.advance();
    }
}

impl<'a, I: BidirectionalCursor<'a>> BidirectionalCursor<'a> for InstanceCounted<I> {
    fn retreat(&mut self) {
        self.inner.retreat();
    }
}

impl<'a, I: RandomAccessCursor<'a>> RandomAccessCursor<'a> for InstanceCounted<I> {
    fn advance_by(&mut self, n: usize) {
        self.inner.advance_by(n);
    }

    fn retreat_by(&mut self, n: usize) {
        self.inner.retreat_by(n);
    }

    fn distance_from(&self, origin: &Self) -> isize {
        self.inner.distance_from(&origin.inner)
    }
}

/// Sorts the cells between `begin` and `end` using only erased operations.
pub fn insertion_sort<'a, T: Ord + Copy + 'static>(
    begin: &AnyRandomAccessIterator<'a, Cell<T>>,
    end: &AnyRandomAccessIterator<'a, Cell<T>>,
) {
    if end - begin < 2 {
        return;
    }
    let mut next = begin + 1;
    while next < *end {
        let mut slot = next.clone();
        while slot > *begin {
            let current = slot.get().unwrap();
            let previous = slot.at(-1).unwrap();
            if previous.get() <= current.get() {
                break;
            }
            current.swap(previous);
            slot -= 1;
        }
        next += 1;
    }
}
