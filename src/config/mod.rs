//! Rule configuration for the flextime reconciliation engine.
//!
//! This module contains the break rule table, the per-grade weekday
//! schedules, and the YAML [`ConfigLoader`] that reads both.

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{BreakRule, BreakRuleTable, Schedule, ScheduleDay};
