//! Sliding windows.

use num_traits::Num;

use crate::duplicate::duplicate;
use crate::operate::operate;
use crate::sequence::{channel, closed, Sequence};
use crate::slice::{shift, skip};

/// Evaluate `f` over a sliding window of the last `size` values.
///
/// `f` receives the window buffer and the index of the oldest value in it.
/// The buffer is reused circularly, so it is only in chronological order
/// starting from that index. While the window fills up, the buffer holds
/// the values seen so far and the start index is 0.
///
/// A `size` of zero yields a terminated sequence.
pub fn window<T, R, F>(mut input: Sequence<T>, mut f: F, size: usize) -> Sequence<R>
where
    T: Send + 'static,
    R: Send + 'static,
    F: FnMut(&[T], usize) -> R + Send + 'static,
{
    if size == 0 {
        return closed();
    }

    let (tx, rx) = channel();

    tokio::spawn(async move {
        let mut buffer: Vec<T> = Vec::with_capacity(size);
        let mut start = 0;

        while let Some(value) = input.recv().await {
            if buffer.len() < size {
                buffer.push(value);
            } else {
                buffer[start] = value;
                start = (start + 1) % size;
            }

            if tx.send(f(&buffer, start)).await.is_err() {
                break;
            }
        }
    });

    rx
}

/// Highest value within the window.
pub fn highest<T>(input: Sequence<T>, size: usize) -> Sequence<T>
where
    T: PartialOrd + Copy + Send + 'static,
{
    window(input, |w, _| extreme(w, |a, b| a > b), size)
}

/// Lowest value within the window.
pub fn lowest<T>(input: Sequence<T>, size: usize) -> Sequence<T>
where
    T: PartialOrd + Copy + Send + 'static,
{
    window(input, |w, _| extreme(w, |a, b| a < b), size)
}

/// Number of steps back from the current value to the window's maximum.
pub fn max_since<T>(input: Sequence<T>, size: usize) -> Sequence<usize>
where
    T: PartialOrd + Send + 'static,
{
    window(input, |w, start| steps_since(w, start, |a, b| a >= b), size)
}

/// Number of steps back from the current value to the window's minimum.
pub fn min_since<T>(input: Sequence<T>, size: usize) -> Sequence<usize>
where
    T: PartialOrd + Send + 'static,
{
    window(input, |w, start| steps_since(w, start, |a, b| a <= b), size)
}

/// Sum of the last `period` values.
///
/// The first `period - 1` values only fill the window and produce no
/// output.
pub fn moving_sum<T>(input: Sequence<T>, period: usize) -> Sequence<T>
where
    T: Num + Copy + Send + 'static,
{
    if period == 0 {
        return closed();
    }

    let mut forks = duplicate(input, 2);
    let leaving = shift(forks.pop().unwrap_or_else(closed), period, T::zero());
    let entering = forks.pop().unwrap_or_else(closed);

    let mut sum = T::zero();
    let sums = operate(entering, leaving, move |value, old| {
        sum = sum + value - old;
        sum
    });

    skip(sums, period - 1)
}

fn extreme<T: Copy>(w: &[T], better: impl Fn(&T, &T) -> bool) -> T {
    let mut best = w[0];
    for value in &w[1..] {
        if better(value, &best) {
            best = *value;
        }
    }
    best
}

/// Walk backward from the newest value, wrapping around the buffer, and
/// return how far back the extreme sits. `at_least(candidate, current)`
/// moves the match further back on ties.
fn steps_since<T>(w: &[T], start: usize, at_least: impl Fn(&T, &T) -> bool) -> usize {
    let len = w.len();
    let newest = (start + len - 1) % len;

    let mut best = &w[newest];
    let mut since = 0;

    for back in 1..len {
        let candidate = &w[(newest + len - back) % len];
        if at_least(candidate, best) {
            best = candidate;
            since = back;
        }
    }

    since
}
