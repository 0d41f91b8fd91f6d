//! Laws over action sequences and the outcome simulation.

use flowta_core::traits::Strategy;
use flowta_core::types::{closings, Action, Snapshot};
use flowta_helper::{closed, duplicate, map, operate, shift, Sequence};

/// Collapse repeated signals: a Buy or Sell equal to the previous non-Hold
/// action becomes Hold. The first signal is taken only if it is a Buy.
pub fn normalize_actions(actions: Sequence<Action>) -> Sequence<Action> {
    let mut last = Action::Sell;
    map(actions, move |action| {
        if action == Action::Hold {
            return Action::Hold;
        }
        if action == last {
            Action::Hold
        } else {
            last = action;
            action
        }
    })
}

/// Repeat the last Buy or Sell over the Holds that follow it.
pub fn denormalize_actions(actions: Sequence<Action>) -> Sequence<Action> {
    let mut last = Action::Hold;
    map(actions, move |action| {
        if action != Action::Hold {
            last = action;
        }
        last
    })
}

/// Running number of transactions a normalized version of the actions
/// would carry out.
pub fn count_transactions(actions: Sequence<Action>) -> Sequence<usize> {
    let mut last = Action::Sell;
    let mut transactions = 0;
    map(actions, move |action| {
        if action != Action::Hold && action != last {
            last = action;
            transactions += 1;
        }
        transactions
    })
}

/// Simulate trading one unit of capital against `values`.
///
/// A Buy converts the whole balance to shares at the current value, a Sell
/// converts all shares back. Each step emits the portfolio value minus the
/// initial capital, so the sequence starts at zero.
pub fn outcome(values: Sequence<f64>, actions: Sequence<Action>) -> Sequence<f64> {
    let mut balance = 1.0;
    let mut shares = 0.0;

    operate(values, actions, move |value, action| {
        match action {
            Action::Buy if balance > 0.0 => {
                shares = balance / value;
                balance = 0.0;
            }
            Action::Sell if shares > 0.0 => {
                balance = shares * value;
                shares = 0.0;
            }
            _ => {}
        }

        balance + shares * value - 1.0
    })
}

/// Line up the actions of an indicator based strategy with its input by
/// holding through the indicator's idle period.
///
/// The output is zipped against the snapshots, so a history shorter than
/// the idle period still yields exactly one Hold per snapshot.
pub(crate) fn hold_through_idle<F>(
    snapshots: Sequence<Snapshot>,
    idle_period: usize,
    compute: F,
) -> Sequence<Action>
where
    F: FnOnce(Sequence<Snapshot>) -> Sequence<Action>,
{
    let mut forks = duplicate(snapshots, 2);
    let for_length = forks.pop().unwrap_or_else(closed);
    let actions = compute(forks.pop().unwrap_or_else(closed));

    operate(
        for_length,
        shift(actions, idle_period, Action::Hold),
        |_, action| action,
    )
}

/// Run a strategy and simulate its outcome over the closing prices.
///
/// Both returned sequences must be consumed concurrently.
pub fn compute_with_outcome(
    strategy: &dyn Strategy,
    snapshots: Sequence<Snapshot>,
) -> (Sequence<Action>, Sequence<f64>) {
    let mut forks = duplicate(snapshots, 2);
    let (Some(for_closings), Some(for_strategy)) = (forks.pop(), forks.pop()) else {
        return (closed(), closed());
    };

    let mut actions = duplicate(strategy.compute(for_strategy), 2);
    let (Some(for_outcome), Some(actions)) = (actions.pop(), actions.pop()) else {
        return (closed(), closed());
    };

    let outcomes = outcome(closings(for_closings), for_outcome);
    (actions, outcomes)
}
