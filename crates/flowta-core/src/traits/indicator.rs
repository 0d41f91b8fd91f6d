//! Indicator trait definitions.

use flowta_helper::Sequence;

use crate::types::Snapshot;

/// Trait for technical indicators over a single price sequence.
///
/// An indicator consumes `idle_period()` values before it emits its first
/// result; after that it emits one result per input value.
pub trait Indicator: Send + Sync {
    /// The output type of the indicator.
    type Output;

    /// Build the indicator pipeline over the given values.
    fn compute(&self, input: Sequence<f64>) -> Sequence<Self::Output>;

    /// Number of leading input values that produce no output.
    fn idle_period(&self) -> usize;

    /// Get the name of the indicator.
    fn name(&self) -> &str;
}

/// Indicator that uses whole snapshots (not just one price).
pub trait SnapshotIndicator: Send + Sync {
    /// The output type of the indicator.
    type Output;

    /// Build the indicator pipeline over the given snapshots.
    fn compute(&self, snapshots: Sequence<Snapshot>) -> Sequence<Self::Output>;

    /// Number of leading snapshots that produce no output.
    fn idle_period(&self) -> usize;

    /// Get the name of the indicator.
    fn name(&self) -> &str;
}
