//! Core data models for the flextime reconciliation engine.
//!
//! This module contains all the domain models used throughout the engine.

mod attendance;
mod employee;
mod event;
mod interval;
mod ledger;
mod worklog;

pub use attendance::{AttendanceRecord, AttendanceStatus, LeaveType, VacationRequest};
pub use employee::{EmployeeContext, TimeModel};
pub use event::{PunchDirection, RawEvent};
pub use interval::{Interval, IntervalKind};
pub use ledger::LedgerEntry;
pub use worklog::WorklogRef;
