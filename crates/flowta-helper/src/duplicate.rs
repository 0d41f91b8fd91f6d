//! Fan-out.

use crate::lifecycle::spawn_drain;
use crate::sequence::{channel, Sequence, Sink};

/// Broadcast one sequence to `count` independent forks.
///
/// A single task reads each value once and sends it to every fork before
/// reading the next one, so all forks see the same values in the same order
/// and the slowest consumer sets the pace. All forks terminate together.
///
/// Every fork has to be consumed concurrently. A fork that is never read
/// blocks the broadcast once its channel is full; dropping the fork releases
/// it instead.
pub fn duplicate<T>(mut input: Sequence<T>, count: usize) -> Vec<Sequence<T>>
where
    T: Clone + Send + 'static,
{
    if count == 0 {
        spawn_drain(input);
        return Vec::new();
    }

    let (senders, receivers): (Vec<Sink<T>>, Vec<Sequence<T>>) =
        (0..count).map(|_| channel()).unzip();

    tokio::spawn(async move {
        let mut outputs: Vec<Option<Sink<T>>> = senders.into_iter().map(Some).collect();

        while let Some(value) = input.recv().await {
            for slot in outputs.iter_mut() {
                let dropped = match slot {
                    Some(output) => output.send(value.clone()).await.is_err(),
                    None => false,
                };
                if dropped {
                    *slot = None;
                }
            }

            if outputs.iter().all(Option::is_none) {
                return;
            }
        }
    });

    receivers
}
