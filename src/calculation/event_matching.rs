//! Punch event matching.
//!
//! This module pairs the ordered punch events of one employee-day into
//! typed work/break [`Interval`]s using a single-pass state machine that
//! holds at most one pending event:
//!
//! - a pending IN is closed by the next OUT into a work interval; a
//!   break-flagged OUT then becomes the new pending event (break start),
//! - a pending break-flagged OUT is closed by the next IN into a break
//!   interval; the IN becomes the new pending event,
//! - a pending non-break OUT cannot open a measurable span and is dropped
//!   as an orphan,
//! - duplicate check-ins and double break checkouts drop the *new* event,
//! - whatever is left pending at end of input yields no interval.
//!
//! None of these cases is an error; orphans are logged and dropped.

use chrono::NaiveDateTime;
use tracing::info;

use crate::models::{Interval, PunchDirection, RawEvent};

/// ID assigned to virtual closing events created by
/// [`EventList::close_open_span`].
pub const VIRTUAL_EVENT_ID: &str = "virtual_close";

/// The live check-in state derived from the latest punch of a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckinState {
    /// No open span; the employee is checked out.
    Out,
    /// The employee is checked in and working.
    In,
    /// The employee is on a break.
    Break,
}

/// The ordered punch events of one employee-day.
///
/// # Example
///
/// ```
/// use flextime_engine::calculation::EventList;
/// use flextime_engine::models::{IntervalKind, PunchDirection, RawEvent};
/// use chrono::NaiveDateTime;
///
/// let ts = |s| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap();
/// let events = EventList::new(vec![
///     RawEvent { id: "a".into(), timestamp: ts("2026-01-15 09:00:00"), direction: PunchDirection::In, is_break: false },
///     RawEvent { id: "b".into(), timestamp: ts("2026-01-15 12:00:00"), direction: PunchDirection::Out, is_break: false },
/// ]);
///
/// let intervals = events.intervals();
/// assert_eq!(intervals.len(), 1);
/// assert_eq!(intervals[0].kind, IntervalKind::Work);
/// assert_eq!(intervals[0].total_seconds, 10800);
/// ```
#[derive(Debug, Clone, Default)]
pub struct EventList {
    events: Vec<RawEvent>,
}

impl EventList {
    /// Wraps an ordered-by-time list of punch events.
    pub fn new(events: Vec<RawEvent>) -> Self {
        Self { events }
    }

    /// Returns true if the day has no punch events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Returns the last punch event of the day, if any.
    pub fn latest(&self) -> Option<&RawEvent> {
        self.events.last()
    }

    /// Returns true if any event of the day is break-flagged.
    pub fn has_break(&self) -> bool {
        self.events.iter().any(|e| e.is_break)
    }

    /// Classifies the live check-in state from the latest event.
    pub fn current_state(&self) -> CheckinState {
        match self.latest() {
            None => CheckinState::Out,
            Some(event) if event.is_in() => CheckinState::In,
            Some(event) if event.is_break => CheckinState::Break,
            Some(_) => CheckinState::Out,
        }
    }

    /// Matches the events into ordered work/break intervals.
    pub fn intervals(&self) -> Vec<Interval> {
        self.scan().0
    }

    /// Appends a virtual closing event if a span is still open.
    ///
    /// The virtual event carries the given timestamp and the
    /// opposite-of-pending direction: an open work span is closed by a
    /// checkout, an open break by a check-in. Used only for live
    /// "current duration" queries; the virtual event is never persisted.
    pub fn close_open_span(&mut self, now: NaiveDateTime) {
        let Some(pending) = self.scan().1 else {
            return;
        };

        let direction = if pending.is_in() {
            PunchDirection::Out
        } else if pending.is_break {
            PunchDirection::In
        } else {
            // A dangling orphan checkout opens nothing worth closing.
            return;
        };

        self.events.push(RawEvent {
            id: VIRTUAL_EVENT_ID.to_string(),
            timestamp: now,
            direction,
            is_break: false,
        });
    }

    /// Single pass over the events; returns the matched intervals and the
    /// event still pending at end of input.
    fn scan(&self) -> (Vec<Interval>, Option<&RawEvent>) {
        let mut intervals = Vec::new();
        let mut pending: Option<&RawEvent> = None;

        for event in &self.events {
            let Some(current) = pending else {
                pending = Some(event);
                continue;
            };

            // Cannot start a measurable span with a non-break OUT event.
            if current.is_out() && !current.is_break {
                info!(event = %current.id, "unable to match orphan checkout event");
                pending = Some(event);
                continue;
            }

            // Matching OUT event to the pending IN event.
            if current.is_in() {
                if event.is_out() {
                    intervals.push(Interval::from_events(current, event));
                    pending = if event.is_break { Some(event) } else { None };
                } else {
                    info!(event = %event.id, "skipping double checkin event");
                }
                continue;
            }

            // Currently in a break, searching for the closing IN event.
            if event.is_in() {
                intervals.push(Interval::from_events(current, event));
                pending = Some(event);
            }
            // A second break checkout is dropped; the break stays pending.
        }

        (intervals, pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::IntervalKind;
    use chrono::NaiveTime;

    fn ts(time: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("2026-01-15 {}", time), "%Y-%m-%d %H:%M:%S")
            .unwrap()
    }

    fn event(id: &str, time: &str, direction: PunchDirection, is_break: bool) -> RawEvent {
        RawEvent {
            id: id.to_string(),
            timestamp: ts(time),
            direction,
            is_break,
        }
    }

    fn checkin(id: &str, time: &str) -> RawEvent {
        event(id, time, PunchDirection::In, false)
    }

    fn checkout(id: &str, time: &str) -> RawEvent {
        event(id, time, PunchDirection::Out, false)
    }

    fn break_checkout(id: &str, time: &str) -> RawEvent {
        event(id, time, PunchDirection::Out, true)
    }

    /// EM-001: work, break, work
    #[test]
    fn test_work_break_work() {
        let events = EventList::new(vec![
            checkin("a", "09:00:00"),
            break_checkout("b", "12:00:00"),
            checkin("c", "12:30:00"),
            checkout("d", "15:00:00"),
        ]);

        let intervals = events.intervals();
        assert_eq!(intervals.len(), 3);

        assert_eq!(intervals[0].kind, IntervalKind::Work);
        assert_eq!(intervals[0].total_seconds, 10800);
        assert_eq!(intervals[0].start, NaiveTime::from_hms_opt(9, 0, 0).unwrap());
        assert_eq!(intervals[0].end, NaiveTime::from_hms_opt(12, 0, 0).unwrap());

        assert_eq!(intervals[1].kind, IntervalKind::Break);
        assert_eq!(intervals[1].total_seconds, 1800);

        assert_eq!(intervals[2].kind, IntervalKind::Work);
        assert_eq!(intervals[2].total_seconds, 9000);
        assert_eq!(intervals[2].first_event_id, "c");
        assert_eq!(intervals[2].second_event_id, "d");
    }

    /// EM-002: double check-in keeps the first IN
    #[test]
    fn test_double_checkin_keeps_original() {
        let events = EventList::new(vec![
            checkin("a", "09:00:00"),
            checkin("b", "09:00:00"),
            checkout("c", "12:00:00"),
        ]);

        let intervals = events.intervals();
        assert_eq!(intervals.len(), 1);
        assert_eq!(intervals[0].kind, IntervalKind::Work);
        assert_eq!(intervals[0].total_seconds, 10800);
        assert_eq!(intervals[0].first_event_id, "a");
    }

    /// EM-003: a leading non-break OUT is discarded as an orphan
    #[test]
    fn test_leading_orphan_checkout_discarded() {
        let events = EventList::new(vec![
            checkout("a", "08:00:00"),
            checkin("b", "09:00:00"),
            checkout("c", "12:00:00"),
        ]);

        let intervals = events.intervals();
        assert_eq!(intervals.len(), 1);
        assert_eq!(intervals[0].total_seconds, 10800);
        assert_eq!(intervals[0].first_event_id, "b");
    }

    /// EM-004: a trailing unmatched IN yields no interval
    #[test]
    fn test_unmatched_trailing_event_dropped() {
        let events = EventList::new(vec![
            checkin("a", "09:00:00"),
            checkout("b", "12:00:00"),
            checkin("c", "13:00:00"),
        ]);

        let intervals = events.intervals();
        assert_eq!(intervals.len(), 1);
    }

    /// EM-005: a double break checkout keeps the break pending
    #[test]
    fn test_double_break_checkout_dropped() {
        let events = EventList::new(vec![
            checkin("a", "09:00:00"),
            break_checkout("b", "12:00:00"),
            break_checkout("c", "12:10:00"),
            checkin("d", "12:30:00"),
            checkout("e", "15:00:00"),
        ]);

        let intervals = events.intervals();
        assert_eq!(intervals.len(), 3);
        assert_eq!(intervals[1].kind, IntervalKind::Break);
        assert_eq!(intervals[1].total_seconds, 1800);
        assert_eq!(intervals[1].first_event_id, "b");
        assert_eq!(intervals[1].second_event_id, "d");
    }

    /// EM-006: no events produce no intervals
    #[test]
    fn test_empty_event_list() {
        let events = EventList::new(vec![]);
        assert!(events.intervals().is_empty());
        assert!(events.is_empty());
        assert!(events.latest().is_none());
    }

    /// EM-007: close_open_span closes an open work span
    #[test]
    fn test_close_open_work_span() {
        let mut events = EventList::new(vec![checkin("a", "09:00:00")]);
        events.close_open_span(ts("11:00:00"));

        let intervals = events.intervals();
        assert_eq!(intervals.len(), 1);
        assert_eq!(intervals[0].kind, IntervalKind::Work);
        assert_eq!(intervals[0].total_seconds, 7200);
        assert_eq!(intervals[0].second_event_id, VIRTUAL_EVENT_ID);
    }

    /// EM-008: close_open_span closes an open break span
    #[test]
    fn test_close_open_break_span() {
        let mut events = EventList::new(vec![
            checkin("a", "09:00:00"),
            break_checkout("b", "12:00:00"),
        ]);
        events.close_open_span(ts("12:20:00"));

        let intervals = events.intervals();
        assert_eq!(intervals.len(), 2);
        assert_eq!(intervals[1].kind, IntervalKind::Break);
        assert_eq!(intervals[1].total_seconds, 1200);
    }

    /// EM-009: close_open_span is a no-op for a closed day
    #[test]
    fn test_close_open_span_noop_when_closed() {
        let mut events = EventList::new(vec![
            checkin("a", "09:00:00"),
            checkout("b", "12:00:00"),
        ]);
        events.close_open_span(ts("13:00:00"));

        assert_eq!(events.intervals().len(), 1);
        assert_eq!(events.latest().unwrap().id, "b");
    }

    /// EM-010: close_open_span ignores a lone orphan checkout
    #[test]
    fn test_close_open_span_noop_for_orphan_checkout() {
        let mut events = EventList::new(vec![checkout("a", "08:00:00")]);
        events.close_open_span(ts("09:00:00"));

        assert!(events.intervals().is_empty());
        assert_eq!(events.latest().unwrap().id, "a");
    }

    #[test]
    fn test_has_break() {
        let with_break = EventList::new(vec![
            checkin("a", "09:00:00"),
            break_checkout("b", "12:00:00"),
        ]);
        assert!(with_break.has_break());

        let without_break = EventList::new(vec![
            checkin("a", "09:00:00"),
            checkout("b", "12:00:00"),
        ]);
        assert!(!without_break.has_break());
    }

    #[test]
    fn test_current_state() {
        assert_eq!(EventList::new(vec![]).current_state(), CheckinState::Out);
        assert_eq!(
            EventList::new(vec![checkin("a", "09:00:00")]).current_state(),
            CheckinState::In
        );
        assert_eq!(
            EventList::new(vec![checkin("a", "09:00:00"), break_checkout("b", "12:00:00")])
                .current_state(),
            CheckinState::Break
        );
        assert_eq!(
            EventList::new(vec![checkin("a", "09:00:00"), checkout("b", "12:00:00")])
                .current_state(),
            CheckinState::Out
        );
    }
}
