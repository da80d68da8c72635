//! Ledger entry model.
//!
//! A [`LedgerEntry`] is the immutable, once-per-employee-per-day accounting
//! record of the flextime account. It is created exactly once by the
//! reconciliation loop, never updated or deleted, and is the sole source
//! for the next day's balance carry-forward.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Interval, IntervalKind, WorklogRef};

/// The permanent accounting record for one employee and one date.
///
/// Invariants:
/// - `delta_hours = (total_worked_seconds - break_deducted_seconds -
///   target_worked_seconds) / 3600.0`
/// - `balance_hours = previous day's balance + delta_hours`, with a
///   balance of `0.0` before the first entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Unique identifier of the entry.
    pub id: Uuid,
    /// The employee the entry belongs to.
    pub employee_id: String,
    /// The reconciled date.
    pub date: NaiveDate,
    /// Total worked time in seconds (sum of work intervals).
    pub total_worked_seconds: i64,
    /// Break time deducted in seconds (missing or insufficient breaks).
    pub break_deducted_seconds: i64,
    /// Target working time for the day in seconds.
    pub target_worked_seconds: i64,
    /// The day's change of the flextime account in hours.
    pub delta_hours: f64,
    /// The cumulative flextime balance in hours as of this date.
    pub balance_hours: f64,
    /// The matched work/break intervals the totals were derived from.
    pub intervals: Vec<Interval>,
    /// Worklogs attached for audit; they do not affect the calculation.
    #[serde(default)]
    pub worklogs: Vec<WorklogRef>,
}

impl LedgerEntry {
    /// Re-derives the worked seconds from the stored intervals.
    ///
    /// Feeding an entry's intervals back through the totals calculation
    /// must reproduce `total_worked_seconds`; tests use this to check
    /// idempotence of the daily calculation.
    pub fn worked_seconds_from_intervals(&self) -> i64 {
        self.intervals
            .iter()
            .filter(|i| i.kind == IntervalKind::Work)
            .map(|i| i.total_seconds)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn make_interval(start_h: u32, end_h: u32, kind: IntervalKind) -> Interval {
        Interval::new(
            NaiveTime::from_hms_opt(start_h, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(end_h, 0, 0).unwrap(),
            kind,
            "first".to_string(),
            "second".to_string(),
        )
    }

    fn make_entry() -> LedgerEntry {
        LedgerEntry {
            id: Uuid::new_v4(),
            employee_id: "emp_001".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
            total_worked_seconds: 25200,
            break_deducted_seconds: 0,
            target_worked_seconds: 28800,
            delta_hours: -1.0,
            balance_hours: -1.0,
            intervals: vec![
                make_interval(9, 12, IntervalKind::Work),
                make_interval(12, 13, IntervalKind::Break),
                make_interval(13, 17, IntervalKind::Work),
            ],
            worklogs: vec![],
        }
    }

    #[test]
    fn test_worked_seconds_from_intervals_sums_work_only() {
        let entry = make_entry();
        assert_eq!(entry.worked_seconds_from_intervals(), 25200);
    }

    #[test]
    fn test_ledger_entry_round_trip() {
        let entry = make_entry();
        let json = serde_json::to_string(&entry).unwrap();
        let deserialized: LedgerEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(entry, deserialized);
    }
}
