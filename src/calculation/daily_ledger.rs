//! Daily ledger calculation.
//!
//! This module aggregates the matched intervals of one day into totals,
//! applies the break-deduction policy, and computes the day's delta and
//! the new running balance of the flextime account.

use crate::config::BreakRuleTable;
use crate::models::{Interval, IntervalKind};

/// The result of one day's ledger calculation.
///
/// All quantities may be negative: a day with insufficient work shows up
/// as a negative delta and pushes the balance down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyLedgerResult {
    /// Total worked time in seconds (sum of work intervals).
    pub total_worked_seconds: i64,
    /// Break time actually checked in seconds (sum of break intervals).
    pub checked_break_seconds: i64,
    /// Break time deducted in seconds.
    pub break_deducted_seconds: i64,
    /// The day's change of the flextime account in hours.
    pub delta_hours: f64,
    /// The new running balance in hours.
    pub balance_hours: f64,
}

/// Calculates the daily ledger values from the day's intervals.
///
/// The break deduction is tiered:
/// - if no break was checked at all although a mandatory minimum applies,
///   the schedule's forced deduction is applied,
/// - if a break was checked but falls short of the minimum, the shortfall
///   is deducted,
/// - otherwise nothing is deducted.
///
/// `delta_hours = (total_worked - break_deducted - target) / 3600.0` and
/// `balance_hours = previous_balance_hours + delta_hours`.
///
/// # Example
///
/// ```
/// use flextime_engine::calculation::calculate_daily_ledger;
/// use flextime_engine::config::BreakRuleTable;
///
/// let result = calculate_daily_ledger(&[], &BreakRuleTable::default(), 3600, false, 28800, 1.5);
/// assert_eq!(result.delta_hours, -8.0);
/// assert_eq!(result.balance_hours, -6.5);
/// ```
pub fn calculate_daily_ledger(
    intervals: &[Interval],
    rules: &BreakRuleTable,
    forced_deduction_on_missing_break: i64,
    is_minor: bool,
    target_worked_seconds: i64,
    previous_balance_hours: f64,
) -> DailyLedgerResult {
    let mut total_worked_seconds = 0;
    let mut checked_break_seconds = 0;
    let mut break_found = false;

    for interval in intervals {
        match interval.kind {
            IntervalKind::Work => total_worked_seconds += interval.total_seconds,
            IntervalKind::Break => {
                checked_break_seconds += interval.total_seconds;
                break_found = true;
            }
        }
    }

    let min_break_seconds = rules.lookup(total_worked_seconds, is_minor);

    let break_deducted_seconds = if !break_found && min_break_seconds > 0 {
        forced_deduction_on_missing_break
    } else if min_break_seconds > checked_break_seconds {
        min_break_seconds - checked_break_seconds
    } else {
        0
    };

    let delta_hours = (total_worked_seconds - break_deducted_seconds - target_worked_seconds)
        as f64
        / 3600.0;

    DailyLedgerResult {
        total_worked_seconds,
        checked_break_seconds,
        break_deducted_seconds,
        delta_hours,
        balance_hours: previous_balance_hours + delta_hours,
    }
}
