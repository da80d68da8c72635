//! Punch event model.
//!
//! This module defines the [`RawEvent`] struct and [`PunchDirection`] enum
//! representing the immutable, externally recorded check-in/check-out punches
//! that the engine consumes.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// The direction of a punch event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PunchDirection {
    /// The employee checked in (start of a work span).
    In,
    /// The employee checked out (end of a work span, or start of a break
    /// when the event is break-flagged).
    Out,
}

/// A single raw punch event for one employee.
///
/// Raw events are created externally and are read-only input to the engine.
/// An OUT event with `is_break` set marks the start of a break rather than
/// the end of the working day.
///
/// # Example
///
/// ```
/// use flextime_engine::models::{PunchDirection, RawEvent};
/// use chrono::NaiveDateTime;
///
/// let event = RawEvent {
///     id: "evt_001".to_string(),
///     timestamp: NaiveDateTime::parse_from_str("2026-01-15 09:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
///     direction: PunchDirection::In,
///     is_break: false,
/// };
/// assert!(event.is_in());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawEvent {
    /// Unique identifier of the punch record.
    pub id: String,
    /// Timestamp of the punch (naive local time).
    pub timestamp: NaiveDateTime,
    /// Whether the punch is a check-in or a check-out.
    pub direction: PunchDirection,
    /// True if the event is break-flagged.
    #[serde(default)]
    pub is_break: bool,
}

impl RawEvent {
    /// Returns true if this is a check-in event.
    pub fn is_in(&self) -> bool {
        self.direction == PunchDirection::In
    }

    /// Returns true if this is a check-out event.
    pub fn is_out(&self) -> bool {
        self.direction == PunchDirection::Out
    }
}
