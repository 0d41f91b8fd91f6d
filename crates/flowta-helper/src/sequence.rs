//! Sequences and the conversions at their boundary.

use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tokio_stream::{Stream, StreamExt};

/// Capacity of the channels created by the combinators.
pub const CHANNEL_CAPACITY: usize = 1;

/// An ordered, possibly unbounded series of values produced by one task.
///
/// The sequence terminates once every sender is dropped. Receiving from a
/// terminated sequence returns `None` immediately.
pub type Sequence<T> = mpsc::Receiver<T>;

/// Sending half of a [`Sequence`].
pub type Sink<T> = mpsc::Sender<T>;

/// Create a bounded channel with the engine capacity.
pub fn channel<T>() -> (Sink<T>, Sequence<T>) {
    mpsc::channel(CHANNEL_CAPACITY)
}

/// A sequence that is already terminated.
pub fn closed<T>() -> Sequence<T> {
    let (_, rx) = channel();
    rx
}

/// Emit every element of the vector in order, then terminate.
pub fn from_vec<T>(values: Vec<T>) -> Sequence<T>
where
    T: Send + 'static,
{
    from_iter(values)
}

/// Emit every element of the iterator in order, then terminate.
pub fn from_iter<I>(values: I) -> Sequence<I::Item>
where
    I: IntoIterator + Send + 'static,
    I::IntoIter: Send,
    I::Item: Send + 'static,
{
    let (tx, rx) = channel();

    tokio::spawn(async move {
        for value in values {
            if tx.send(value).await.is_err() {
                break;
            }
        }
    });

    rx
}

/// Relay an async stream into a sequence.
pub fn from_stream<S>(stream: S) -> Sequence<S::Item>
where
    S: Stream + Send + 'static,
    S::Item: Send + 'static,
{
    let (tx, rx) = channel();

    tokio::spawn(async move {
        let mut stream = Box::pin(stream);
        while let Some(value) = stream.next().await {
            if tx.send(value).await.is_err() {
                break;
            }
        }
    });

    rx
}

/// View a sequence as an async stream.
pub fn into_stream<T>(input: Sequence<T>) -> ReceiverStream<T> {
    ReceiverStream::new(input)
}

/// Collect a sequence until it terminates.
///
/// Only use this on sequences known to be finite.
pub async fn to_vec<T>(mut input: Sequence<T>) -> Vec<T> {
    let mut values = Vec::new();
    while let Some(value) = input.recv().await {
        values.push(value);
    }
    values
}

/// Forward every value of `input` to `output` until either side ends.
///
/// Returns `false` when the consumer went away.
pub(crate) async fn pipe<T>(input: &mut Sequence<T>, output: &Sink<T>) -> bool {
    while let Some(value) = input.recv().await {
        if output.send(value).await.is_err() {
            return false;
        }
    }
    true
}
