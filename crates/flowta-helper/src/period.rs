//! Aligning sequences with different warm-up periods.

use crate::sequence::Sequence;
use crate::slice::skip;

/// The longest of the given idle periods.
pub fn common_period(periods: &[usize]) -> usize {
    periods.iter().copied().max().unwrap_or(0)
}

/// Skip the values of a sequence with idle period `period` so that its first
/// value lines up with sequences idling for `common`.
pub fn sync_period<T>(common: usize, period: usize, input: Sequence<T>) -> Sequence<T>
where
    T: Send + 'static,
{
    skip(input, common.saturating_sub(period))
}
