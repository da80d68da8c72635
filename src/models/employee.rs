//! Employee model and related types.
//!
//! This module defines the [`EmployeeContext`] struct and [`TimeModel`] enum
//! for representing workers subject to flextime reconciliation.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// The working time model assigned to an employee.
///
/// Only employees on the [`TimeModel::Flextime`] model are reconciled;
/// everyone else is skipped by the backfill run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeModel {
    /// No flextime account is kept for this employee.
    Undefined,
    /// Worked time is reconciled against a flextime account.
    Flextime,
}

/// Represents an employee subject to flextime reconciliation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeContext {
    /// Unique identifier for the employee.
    pub id: String,
    /// The grade linking the employee to a flextime schedule.
    pub grade: String,
    /// The assigned working time model.
    pub time_model: TimeModel,
    /// The employee's date of birth.
    pub birth_date: NaiveDate,
    /// The date the employee joined the company.
    pub join_date: NaiveDate,
}

impl EmployeeContext {
    /// Returns true if the employee is under 18 years of age on the given
    /// date.
    ///
    /// The 18th birthday is computed with plain calendar arithmetic; a
    /// Feb-29 birth date is clamped to Feb 28 in non-leap target years.
    ///
    /// # Example
    ///
    /// ```
    /// use flextime_engine::models::{EmployeeContext, TimeModel};
    /// use chrono::NaiveDate;
    ///
    /// let employee = EmployeeContext {
    ///     id: "emp_001".to_string(),
    ///     grade: "Staff".to_string(),
    ///     time_model: TimeModel::Flextime,
    ///     birth_date: NaiveDate::from_ymd_opt(2008, 6, 15).unwrap(),
    ///     join_date: NaiveDate::from_ymd_opt(2024, 8, 1).unwrap(),
    /// };
    /// assert!(employee.is_minor(NaiveDate::from_ymd_opt(2026, 6, 14).unwrap()));
    /// assert!(!employee.is_minor(NaiveDate::from_ymd_opt(2026, 6, 15).unwrap()));
    /// ```
    pub fn is_minor(&self, as_of: NaiveDate) -> bool {
        let year = self.birth_date.year() + 18;

        // Feb 29 has no equivalent in non-leap years; clamp to the 28th.
        let eighteenth_birthday =
            NaiveDate::from_ymd_opt(year, self.birth_date.month(), self.birth_date.day())
                .unwrap_or_else(|| {
                    NaiveDate::from_ymd_opt(year, self.birth_date.month(), 28)
                        .unwrap_or_default()
                });

        as_of < eighteenth_birthday
    }

    /// Returns true if the employee is on the flextime model.
    pub fn uses_flextime(&self) -> bool {
        self.time_model == TimeModel::Flextime
    }
}
