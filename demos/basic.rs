//! Basic introduction to type-erased iterators.
//!
//! This example demonstrates the fundamental concepts:
//! 1. Writing a cursor for your own container
//! 2. Passing unrelated cursor types through one erased type
//! 3. Narrowing a random-access iterator to a lower level
//! 4. Handling the errors of empty and mismatched iterators

use anyiter::{
    AnyForwardIterator, AnyRandomAccessIterator, AnyRange, Reversed, SliceCursor,
    category::Forward, cursor::ForwardCursor,
};
use tracing_subscriber::{Registry, layer::SubscriberExt};

/// A cursor over a static table of squares.
#[derive(Clone, PartialEq)]
struct Squares {
    index: usize,
}

static SQUARES: [u64; 8] = [0, 1, 4, 9, 16, 25, 36, 49];

impl ForwardCursor<'static> for Squares {
    type Item = u64;

    fn get(&self) -> &'static u64 {
        &SQUARES[self.index]
    }

    fn advance(&mut self) {
        self.index += 1;
    }
}

/// Works with any forward iterator over `u64`, whatever the cursor type.
fn sum<'a>(begin: AnyForwardIterator<'a, u64>, end: AnyForwardIterator<'a, u64>) -> u64 {
    match AnyRange::new(begin, end) {
        Ok(range) => range.sum(),
        Err(error) => {
            println!("cannot sum: {error}");
            0
        }
    }
}

fn main() {
    let subscriber = Registry::default().with(tracing_subscriber::fmt::layer());
    tracing::subscriber::set_global_default(subscriber).expect("failed to set default subscriber");

    println!("=== Unrelated cursors, one type ===\n");

    let squares = sum(
        AnyForwardIterator::new(Squares { index: 1 }),
        AnyForwardIterator::new(Squares { index: 4 }),
    );
    println!("1 + 4 + 9 = {squares}");

    let numbers = [10, 20, 30, 40];
    let slice = sum(
        AnyForwardIterator::new(SliceCursor::begin(&numbers)),
        AnyForwardIterator::new(SliceCursor::end(&numbers)),
    );
    println!("sum of {numbers:?} = {slice}");
    println!();

    println!("=== Random access and narrowing ===\n");

    let begin = AnyRandomAccessIterator::new(Reversed::new(SliceCursor::end(&numbers)));
    let end = AnyRandomAccessIterator::new(Reversed::new(SliceCursor::begin(&numbers)));
    println!("reversed length: {}", &end - &begin);
    println!("reversed[1]: {}", begin[1]);
    let total = sum(begin.narrow::<Forward>(), end.narrow::<Forward>());
    println!("reversed sum: {total}");
    println!();

    println!("=== Errors ===\n");

    let empty = AnyForwardIterator::<u64>::empty();
    if let Err(error) = empty.get() {
        println!("{error}");
    }
    sum(
        AnyForwardIterator::new(Squares { index: 0 }),
        AnyForwardIterator::new(SliceCursor::end(&SQUARES)),
    );
}
