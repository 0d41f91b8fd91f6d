//! N-ary zips.
//!
//! Each zip reads one value from every input per step and stops as soon as
//! any input terminates. The remaining inputs are then drained concurrently
//! before the output is closed, so no upstream producer is left blocked on a
//! send nobody will receive.

use tokio::task::JoinSet;

use crate::lifecycle::drain;
use crate::sequence::{channel, Sequence};

/// Zip two sequences with `f`.
pub fn operate<A, B, R, F>(mut a: Sequence<A>, mut b: Sequence<B>, mut f: F) -> Sequence<R>
where
    A: Send + 'static,
    B: Send + 'static,
    R: Send + 'static,
    F: FnMut(A, B) -> R + Send + 'static,
{
    let (tx, rx) = channel();

    tokio::spawn(async move {
        loop {
            let Some(va) = a.recv().await else { break };
            let Some(vb) = b.recv().await else { break };
            if tx.send(f(va, vb)).await.is_err() {
                return;
            }
        }

        tokio::join!(drain(a), drain(b));
    });

    rx
}

/// Zip three sequences with `f`.
pub fn operate3<A, B, C, R, F>(
    mut a: Sequence<A>,
    mut b: Sequence<B>,
    mut c: Sequence<C>,
    mut f: F,
) -> Sequence<R>
where
    A: Send + 'static,
    B: Send + 'static,
    C: Send + 'static,
    R: Send + 'static,
    F: FnMut(A, B, C) -> R + Send + 'static,
{
    let (tx, rx) = channel();

    tokio::spawn(async move {
        loop {
            let Some(va) = a.recv().await else { break };
            let Some(vb) = b.recv().await else { break };
            let Some(vc) = c.recv().await else { break };
            if tx.send(f(va, vb, vc)).await.is_err() {
                return;
            }
        }

        tokio::join!(drain(a), drain(b), drain(c));
    });

    rx
}

/// Zip four sequences with `f`.
pub fn operate4<A, B, C, D, R, F>(
    mut a: Sequence<A>,
    mut b: Sequence<B>,
    mut c: Sequence<C>,
    mut d: Sequence<D>,
    mut f: F,
) -> Sequence<R>
where
    A: Send + 'static,
    B: Send + 'static,
    C: Send + 'static,
    D: Send + 'static,
    R: Send + 'static,
    F: FnMut(A, B, C, D) -> R + Send + 'static,
{
    let (tx, rx) = channel();

    tokio::spawn(async move {
        loop {
            let Some(va) = a.recv().await else { break };
            let Some(vb) = b.recv().await else { break };
            let Some(vc) = c.recv().await else { break };
            let Some(vd) = d.recv().await else { break };
            if tx.send(f(va, vb, vc, vd)).await.is_err() {
                return;
            }
        }

        tokio::join!(drain(a), drain(b), drain(c), drain(d));
    });

    rx
}

/// Zip five sequences with `f`.
pub fn operate5<A, B, C, D, E, R, F>(
    mut a: Sequence<A>,
    mut b: Sequence<B>,
    mut c: Sequence<C>,
    mut d: Sequence<D>,
    mut e: Sequence<E>,
    mut f: F,
) -> Sequence<R>
where
    A: Send + 'static,
    B: Send + 'static,
    C: Send + 'static,
    D: Send + 'static,
    E: Send + 'static,
    R: Send + 'static,
    F: FnMut(A, B, C, D, E) -> R + Send + 'static,
{
    let (tx, rx) = channel();

    tokio::spawn(async move {
        loop {
            let Some(va) = a.recv().await else { break };
            let Some(vb) = b.recv().await else { break };
            let Some(vc) = c.recv().await else { break };
            let Some(vd) = d.recv().await else { break };
            let Some(ve) = e.recv().await else { break };
            if tx.send(f(va, vb, vc, vd, ve)).await.is_err() {
                return;
            }
        }

        tokio::join!(drain(a), drain(b), drain(c), drain(d), drain(e));
    });

    rx
}

/// Zip any number of same-typed sequences.
///
/// `f` receives one value per input, in input order. An empty input list
/// yields a terminated sequence.
pub fn operate_all<T, R, F>(mut inputs: Vec<Sequence<T>>, mut f: F) -> Sequence<R>
where
    T: Send + 'static,
    R: Send + 'static,
    F: FnMut(Vec<T>) -> R + Send + 'static,
{
    let (tx, rx) = channel();

    if inputs.is_empty() {
        return rx;
    }

    tokio::spawn(async move {
        'steps: loop {
            let mut values = Vec::with_capacity(inputs.len());
            for input in inputs.iter_mut() {
                match input.recv().await {
                    Some(value) => values.push(value),
                    None => break 'steps,
                }
            }
            if tx.send(f(values)).await.is_err() {
                return;
            }
        }

        let mut drains = JoinSet::new();
        for input in inputs {
            drains.spawn(drain(input));
        }
        while drains.join_next().await.is_some() {}
    });

    rx
}
