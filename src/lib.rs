//! Flexible working time reconciliation engine.
//!
//! This crate turns raw, timestamped presence punches into typed
//! work/break intervals, applies tiered break-compliance rules, and
//! maintains a per-employee, day-by-day cumulative time-bank balance,
//! reconciling holidays, approved leave, and half-day vacations against a
//! per-weekday target working time.
//!
//! Persistence, transport, and scheduling are external collaborators
//! behind the traits in [`providers`]; the engine itself is synchronous
//! and works in naive local time.

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod providers;
pub mod reconciliation;
pub mod stats;
