//! Combinators driven by position in the sequence.

use tokio::sync::mpsc;

use crate::lifecycle::drain;
use crate::ring::Ring;
use crate::sequence::{channel, pipe, Sequence, CHANNEL_CAPACITY};
use crate::transform::map;

/// Discard the first `count` values and forward the rest.
pub fn skip<T>(mut input: Sequence<T>, count: usize) -> Sequence<T>
where
    T: Send + 'static,
{
    let (tx, rx) = channel();

    tokio::spawn(async move {
        for _ in 0..count {
            if input.recv().await.is_none() {
                return;
            }
        }
        pipe(&mut input, &tx).await;
    });

    rx
}

/// Forward the first `count` values, then release the input.
///
/// Dropping the input lets its producer stop early. Use [`first`] when the
/// producer has to run to completion.
pub fn head<T>(mut input: Sequence<T>, count: usize) -> Sequence<T>
where
    T: Send + 'static,
{
    let (tx, rx) = channel();

    tokio::spawn(async move {
        for _ in 0..count {
            let Some(value) = input.recv().await else { return };
            if tx.send(value).await.is_err() {
                return;
            }
        }
    });

    rx
}

/// Forward the first `count` values, then drain the remainder.
pub fn first<T>(mut input: Sequence<T>, count: usize) -> Sequence<T>
where
    T: Send + 'static,
{
    let (tx, rx) = channel();

    tokio::spawn(async move {
        for _ in 0..count {
            let Some(value) = input.recv().await else { return };
            if tx.send(value).await.is_err() {
                return;
            }
        }
        drop(tx);
        drain(input).await;
    });

    rx
}

/// Emit only the final `count` values, once the input has terminated.
pub fn last<T>(mut input: Sequence<T>, count: usize) -> Sequence<T>
where
    T: Send + 'static,
{
    let (tx, rx) = channel();

    tokio::spawn(async move {
        let mut memory = Ring::new(count);
        while let Some(value) = input.recv().await {
            memory.put(value);
        }

        while let Some(value) = memory.get() {
            if tx.send(value).await.is_err() {
                return;
            }
        }
    });

    rx
}

/// Prepend `count` copies of `fill` to the input.
///
/// The fill values are queued up front, so the input is read right away
/// and a sibling fork of the same broadcast is not held back.
pub fn shift<T>(mut input: Sequence<T>, count: usize, fill: T) -> Sequence<T>
where
    T: Clone + Send + 'static,
{
    let (tx, rx) = mpsc::channel(count + CHANNEL_CAPACITY);

    tokio::spawn(async move {
        for _ in 0..count {
            if tx.send(fill.clone()).await.is_err() {
                return;
            }
        }
        pipe(&mut input, &tx).await;
    });

    rx
}

/// Forward the input unchanged, then replay its last `last` values `count`
/// more times once it terminates.
pub fn echo<T>(mut input: Sequence<T>, last: usize, count: usize) -> Sequence<T>
where
    T: Clone + Send + 'static,
{
    let (tx, rx) = channel();

    tokio::spawn(async move {
        let mut memory = Ring::new(last);
        while let Some(value) = input.recv().await {
            memory.put(value.clone());
            if tx.send(value).await.is_err() {
                return;
            }
        }

        for _ in 0..count {
            for i in 0..memory.len() {
                let Some(value) = memory.at(i).cloned() else { break };
                if tx.send(value).await.is_err() {
                    return;
                }
            }
        }
    });

    rx
}

/// For every value, how many consecutive values before it were equal to it.
pub fn since<T>(input: Sequence<T>) -> Sequence<usize>
where
    T: PartialEq + Send + 'static,
{
    let mut previous: Option<T> = None;
    let mut run = 0;

    map(input, move |value| {
        if previous.as_ref() == Some(&value) {
            run += 1;
        } else {
            previous = Some(value);
            run = 0;
        }
        run
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence::{from_iter, from_vec, to_vec};

    #[tokio::test]
    async fn test_skip() {
        let output = skip(from_vec(vec![1, 2, 3, 4, 5]), 2);
        assert_eq!(to_vec(output).await, vec![3, 4, 5]);

        let output = skip(from_vec(vec![1, 2]), 5);
        assert!(to_vec(output).await.is_empty());
    }

    #[tokio::test]
    async fn test_head_stops_unbounded_producer() {
        let output = head(from_iter(0u64..), 4);
        assert_eq!(to_vec(output).await, vec![0, 1, 2, 3]);
    }

    #[tokio::test]
    async fn test_head_shorter_input() {
        let output = head(from_vec(vec![1, 2]), 4);
        assert_eq!(to_vec(output).await, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_first_drains_remainder() {
        let (tx, rx) = mpsc::channel::<i32>(1);
        let producer = tokio::spawn(async move {
            let mut sent = 0;
            for i in 0..10 {
                if tx.send(i).await.is_err() {
                    break;
                }
                sent += 1;
            }
            sent
        });

        let output = first(rx, 3);
        assert_eq!(to_vec(output).await, vec![0, 1, 2]);
        assert_eq!(producer.await.unwrap(), 10);
    }

    #[tokio::test]
    async fn test_last() {
        let output = last(from_vec(vec![1, 2, 3, 4, 5]), 2);
        assert_eq!(to_vec(output).await, vec![4, 5]);

        let output = last(from_vec(vec![1]), 3);
        assert_eq!(to_vec(output).await, vec![1]);

        let output = last(from_vec(vec![1, 2]), 0);
        assert!(to_vec(output).await.is_empty());
    }

    #[tokio::test]
    async fn test_shift() {
        let output = shift(from_vec(vec![1, 2, 3]), 2, 0);
        assert_eq!(to_vec(output).await, vec![0, 0, 1, 2, 3]);
    }

    #[tokio::test]
    async fn test_echo() {
        let output = echo(from_vec(vec![1, 2, 3, 4]), 2, 3);
        assert_eq!(
            to_vec(output).await,
            vec![1, 2, 3, 4, 3, 4, 3, 4, 3, 4]
        );
    }

    #[tokio::test]
    async fn test_echo_single_step() {
        let output = echo(from_vec(vec![0.0, 0.5, 0.25]), 1, 1);
        assert_eq!(to_vec(output).await, vec![0.0, 0.5, 0.25, 0.25]);
    }

    #[tokio::test]
    async fn test_since() {
        let output = since(from_vec(vec![1, 1, 2, 2, 2, 1]));
        assert_eq!(to_vec(output).await, vec![0, 1, 0, 1, 2, 0]);
    }
}
