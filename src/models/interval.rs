//! Work/break interval model.
//!
//! An [`Interval`] is a continuous work or break span derived from two
//! paired punch events. Intervals are computed per day and discarded after
//! the day's ledger entry is persisted; they are stored only as children of
//! that entry.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use super::RawEvent;

/// The kind of a matched interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntervalKind {
    /// A working span, opened by a check-in.
    Work,
    /// A break span, opened by a break-flagged check-out.
    Break,
}

/// A continuous work or break span within a single day.
///
/// Invariant: `total_seconds == end - start` and is never negative; the
/// intervals of one day are chronologically ordered and non-overlapping.
///
/// # Example
///
/// ```
/// use flextime_engine::models::{Interval, IntervalKind};
/// use chrono::NaiveTime;
///
/// let interval = Interval::new(
///     NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
///     NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
///     IntervalKind::Work,
///     "evt_001".to_string(),
///     "evt_002".to_string(),
/// );
/// assert_eq!(interval.total_seconds, 10800);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    /// Start of the span (time of day).
    pub start: NaiveTime,
    /// End of the span (time of day).
    pub end: NaiveTime,
    /// Whether the span is work or break time.
    pub kind: IntervalKind,
    /// Duration of the span in seconds.
    pub total_seconds: i64,
    /// ID of the event opening the span.
    pub first_event_id: String,
    /// ID of the event closing the span.
    pub second_event_id: String,
}

impl Interval {
    /// Creates an interval from its bounds, computing `total_seconds`.
    pub fn new(
        start: NaiveTime,
        end: NaiveTime,
        kind: IntervalKind,
        first_event_id: String,
        second_event_id: String,
    ) -> Self {
        Self {
            start,
            end,
            kind,
            total_seconds: (end - start).num_seconds(),
            first_event_id,
            second_event_id,
        }
    }

    /// Builds an interval from two paired punch events.
    ///
    /// The interval is a break span if the opening event is break-flagged
    /// (a break starts with a break-flagged check-out), a work span
    /// otherwise.
    pub fn from_events(first: &RawEvent, second: &RawEvent) -> Self {
        let kind = if first.is_break {
            IntervalKind::Break
        } else {
            IntervalKind::Work
        };

        Self::new(
            first.timestamp.time(),
            second.timestamp.time(),
            kind,
            first.id.clone(),
            second.id.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PunchDirection;
    use chrono::NaiveDateTime;

    fn make_event(id: &str, time: &str, direction: PunchDirection, is_break: bool) -> RawEvent {
        RawEvent {
            id: id.to_string(),
            timestamp: NaiveDateTime::parse_from_str(
                &format!("2026-01-15 {}", time),
                "%Y-%m-%d %H:%M:%S",
            )
            .unwrap(),
            direction,
            is_break,
        }
    }

    #[test]
    fn test_work_interval_from_events() {
        let first = make_event("evt_001", "09:00:00", PunchDirection::In, false);
        let second = make_event("evt_002", "12:00:00", PunchDirection::Out, false);

        let interval = Interval::from_events(&first, &second);

        assert_eq!(interval.kind, IntervalKind::Work);
        assert_eq!(interval.total_seconds, 10800);
        assert_eq!(interval.first_event_id, "evt_001");
        assert_eq!(interval.second_event_id, "evt_002");
    }

    #[test]
    fn test_break_interval_from_break_flagged_opener() {
        let first = make_event("evt_002", "12:00:00", PunchDirection::Out, true);
        let second = make_event("evt_003", "12:30:00", PunchDirection::In, false);

        let interval = Interval::from_events(&first, &second);

        assert_eq!(interval.kind, IntervalKind::Break);
        assert_eq!(interval.total_seconds, 1800);
    }

    #[test]
    fn test_zero_length_interval() {
        let time = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
        let interval = Interval::new(
            time,
            time,
            IntervalKind::Work,
            "a".to_string(),
            "b".to_string(),
        );
        assert_eq!(interval.total_seconds, 0);
    }

    #[test]
    fn test_interval_kind_serialization() {
        assert_eq!(
            serde_json::to_string(&IntervalKind::Work).unwrap(),
            "\"work\""
        );
        assert_eq!(
            serde_json::to_string(&IntervalKind::Break).unwrap(),
            "\"break\""
        );
    }

    #[test]
    fn test_interval_round_trip() {
        let interval = Interval::new(
            NaiveTime::from_hms_opt(12, 30, 0).unwrap(),
            NaiveTime::from_hms_opt(15, 0, 0).unwrap(),
            IntervalKind::Work,
            "evt_003".to_string(),
            "evt_004".to_string(),
        );

        let json = serde_json::to_string(&interval).unwrap();
        let deserialized: Interval = serde_json::from_str(&json).unwrap();
        assert_eq!(interval, deserialized);
    }
}
