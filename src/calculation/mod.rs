//! Calculation logic for the flextime reconciliation engine.
//!
//! This module contains the punch-event matching state machine that turns
//! raw punches into typed work/break intervals, and the daily ledger
//! calculation that aggregates those intervals into the day's totals,
//! break deduction, delta, and running balance.

mod daily_ledger;
mod event_matching;

pub use daily_ledger::{DailyLedgerResult, calculate_daily_ledger};
pub use event_matching::{CheckinState, EventList, VIRTUAL_EVENT_ID};
