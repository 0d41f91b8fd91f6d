//! One-in, one-out transforms.

use crate::sequence::{channel, Sequence};

/// Apply `f` to every value, preserving order and count.
pub fn map<T, R, F>(mut input: Sequence<T>, mut f: F) -> Sequence<R>
where
    T: Send + 'static,
    R: Send + 'static,
    F: FnMut(T) -> R + Send + 'static,
{
    let (tx, rx) = channel();

    tokio::spawn(async move {
        while let Some(value) = input.recv().await {
            if tx.send(f(value)).await.is_err() {
                break;
            }
        }
    });

    rx
}

/// Same-typed [`map`].
pub fn apply<T, F>(input: Sequence<T>, f: F) -> Sequence<T>
where
    T: Send + 'static,
    F: FnMut(T) -> T + Send + 'static,
{
    map(input, f)
}

/// Forward only the values accepted by `predicate`.
pub fn filter<T, P>(mut input: Sequence<T>, mut predicate: P) -> Sequence<T>
where
    T: Send + 'static,
    P: FnMut(&T) -> bool + Send + 'static,
{
    let (tx, rx) = channel();

    tokio::spawn(async move {
        while let Some(value) = input.recv().await {
            if predicate(&value) && tx.send(value).await.is_err() {
                break;
            }
        }
    });

    rx
}

/// Running fold that emits every intermediate accumulator.
///
/// For each value `acc = f(&acc, value)` is computed and emitted, starting
/// from `seed`.
pub fn map_with_previous<T, R, F>(input: Sequence<T>, mut f: F, seed: R) -> Sequence<R>
where
    T: Send + 'static,
    R: Clone + Send + 'static,
    F: FnMut(&R, T) -> R + Send + 'static,
{
    let mut previous = seed;
    map(input, move |value| {
        previous = f(&previous, value);
        previous.clone()
    })
}
