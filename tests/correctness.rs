mod common;

use std::cell::Cell;

use anyiter::{
    AnyBidirectionalIterator, AnyForwardIterator, AnyRandomAccessIterator, AnyRange, Reversed,
    SliceCursor, Storage,
};
use common::{ArenaList, ForwardList, init_tracing, insertion_sort};

#[test]
fn empty() {
    let _forward = AnyForwardIterator::<i32>::empty();
    let _bidirectional = AnyBidirectionalIterator::<i32>::empty();
    let _random_access = AnyRandomAccessIterator::<i32>::empty();
}

#[test]
fn empty_copy() {
    let forward = AnyForwardIterator::<i32>::empty();
    assert!(forward.clone().is_null());
    let bidirectional = AnyBidirectionalIterator::<i32>::empty();
    assert!(bidirectional.clone().is_null());
    let random_access = AnyRandomAccessIterator::<i32>::empty();
    assert!(random_access.clone().is_null());
}

#[test]
fn empty_move() {
    let mut forward = AnyForwardIterator::<i32>::empty();
    assert!(forward.take().is_null());
    let mut bidirectional = AnyBidirectionalIterator::<i32>::empty();
    assert!(bidirectional.take().is_null());
    let mut random_access = AnyRandomAccessIterator::<i32>::empty();
    assert!(random_access.take().is_null());
}

#[test]
fn assign() {
    let mut a = AnyForwardIterator::<i32>::empty();
    let b = AnyForwardIterator::<i32>::empty();
    a.clone_from(&b);
    assert!(a.is_null());
}

#[test]
fn postinc_1() {
    init_tracing();
    let list: ArenaList<i32> = [1, 2, 3].into_iter().collect();

    let mut i = AnyBidirectionalIterator::new(list.begin());
    assert_eq!(i.storage(), Storage::Boxed);
    assert_eq!(i.post_advance().unwrap().get(), Ok(&1));
    assert_eq!(i.post_advance().unwrap().get(), Ok(&2));
    assert_eq!(i.post_advance().unwrap().get(), Ok(&3));
    assert!(i == AnyBidirectionalIterator::new(list.end()));
}

#[test]
fn list_1() {
    init_tracing();
    let a: ForwardList<i32> = [1, 2, 3, 4, 5].into_iter().collect();

    let begin = AnyForwardIterator::new(a.begin());
    assert_eq!(begin.storage(), Storage::Inline);
    let range = AnyRange::new(begin, AnyForwardIterator::new(a.end())).unwrap();
    let mut b = ForwardList::new();
    for value in range {
        b.push_front(*value);
    }

    assert_eq!(b.to_vec(), [5, 4, 3, 2, 1]);
}

#[test]
fn list_2() {
    let a: ArenaList<i32> = [1, 2, 3, 4, 5].into_iter().collect();

    let range = AnyRange::new(
        AnyForwardIterator::new(a.begin()),
        AnyForwardIterator::new(a.end()),
    )
    .unwrap();
    let mut b = ArenaList::new();
    for value in range {
        b.push_back(*value);
    }

    assert_eq!(a.to_vec(), b.to_vec());
}

#[test]
fn list_3() {
    let a: ArenaList<i32> = [1, 2, 3, 4, 5].into_iter().collect();

    let rbegin = Reversed::new(AnyBidirectionalIterator::new(a.end()));
    let rend = Reversed::new(AnyBidirectionalIterator::new(a.begin()));
    let range = AnyRange::new(
        AnyForwardIterator::new(rbegin),
        AnyForwardIterator::new(rend),
    )
    .unwrap();
    let mut b = ArenaList::new();
    for value in range {
        b.push_front(*value);
    }

    assert_eq!(a.to_vec(), b.to_vec());
}

#[test]
fn vector_1() {
    init_tracing();
    let a = [5, 3, 2, 4, 1].map(Cell::new);
    insertion_sort(
        &AnyRandomAccessIterator::new(SliceCursor::begin(&a)),
        &AnyRandomAccessIterator::new(SliceCursor::end(&a)),
    );

    assert_eq!(a.map(Cell::into_inner), [1, 2, 3, 4, 5]);
}

#[test]
fn vector_2() {
    let a = vec![1, 2, 3, 4, 5];
    let i = AnyRandomAccessIterator::new(SliceCursor::begin(&a));
    assert_eq!(i[0], 1);
    assert_eq!(i[1], 2);
    assert_eq!(i[2], 3);
    assert_eq!(i[3], 4);
    assert_eq!(i[4], 5);
}
