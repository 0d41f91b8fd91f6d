//! Channel-based streaming combinators.
//!
//! Every computation in flowta is a pipeline of small tasks connected by
//! bounded channels. This crate provides the building blocks:
//! - Boundary conversions between collections, streams and [`Sequence`]s
//! - One-to-one and N-ary transforms (`map`, `filter`, `operate*`)
//! - Fan-out (`duplicate`), windowing (`window`, `max_since`, ...)
//! - Position based slicing (`skip`, `head`, `last`, `shift`, `echo`, `since`)
//! - Task lifecycle helpers (`buffered`, `waitable`, `drain`)
//!
//! All combinators spawn onto the current tokio runtime and must be called
//! from within one.
//!
//! Two rules keep pipelines from leaking blocked tasks:
//! - A combinator reading several inputs stops as soon as any input ends and
//!   then drains every other input before closing its output.
//! - A stage whose consumer dropped its receiver stops and drops its own
//!   inputs, so termination cascades upstream.

mod duplicate;
mod lifecycle;
mod numeric;
mod operate;
mod period;
mod ring;
mod sequence;
mod slice;
mod transform;
mod window;

pub use duplicate::duplicate;
pub use lifecycle::{
    buffered, close_and_log_error, drain, spawn_drain, waitable, WaitGroup, WaitGuard,
};
pub use numeric::{
    abs, add, add_by, change, change_percent, change_ratio, count, divide, divide_by,
    keep_negatives, keep_positives, multiply, multiply_by, pow, round_digits, sign, sqrt,
    subtract,
};
pub use operate::{operate, operate3, operate4, operate5, operate_all};
pub use period::{common_period, sync_period};
pub use ring::Ring;
pub use sequence::{
    channel, closed, from_iter, from_stream, from_vec, into_stream, to_vec, Sequence, Sink,
    CHANNEL_CAPACITY,
};
pub use slice::{echo, first, head, last, shift, since, skip};
pub use transform::{apply, filter, map, map_with_previous};
pub use window::{highest, lowest, max_since, min_since, moving_sum, window};
