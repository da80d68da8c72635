//! Rule-table types for break compliance and weekday schedules.
//!
//! This module defines the [`BreakRuleTable`] consulted by the daily ledger
//! calculation and the per-grade [`Schedule`] that fixes the target working
//! time for every weekday.

use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{EngineError, EngineResult};

/// A single break rule tier.
///
/// The rule applies once the total worked time of a day reaches
/// `min_worked_seconds`; `break_seconds` is the minimum mandatory break.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakRule {
    /// Minimum total worked time (seconds) for this tier to apply.
    pub min_worked_seconds: i64,
    /// Mandatory minimum break duration (seconds) at this tier.
    pub break_seconds: i64,
}

/// A tiered lookup table of mandatory break durations.
///
/// The table holds two ascending-sorted rule lists: the regular tiers and
/// the stricter tiers that apply to minors only.
///
/// # Example
///
/// ```
/// use flextime_engine::config::{BreakRule, BreakRuleTable};
///
/// let mut table = BreakRuleTable::default();
/// table.insert(BreakRule { min_worked_seconds: 21600, break_seconds: 1800 }, false);
/// table.insert(BreakRule { min_worked_seconds: 32400, break_seconds: 2700 }, false);
///
/// assert_eq!(table.lookup(20000, false), 0);
/// assert_eq!(table.lookup(30600, false), 1800);
/// assert_eq!(table.lookup(36000, false), 2700);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakRuleTable {
    regular: Vec<BreakRule>,
    minors: Vec<BreakRule>,
}

impl BreakRuleTable {
    /// Inserts a rule, keeping the target list sorted by threshold.
    pub fn insert(&mut self, rule: BreakRule, minors_only: bool) {
        let list = if minors_only {
            &mut self.minors
        } else {
            &mut self.regular
        };

        list.push(rule);
        list.sort_by_key(|r| r.min_worked_seconds);
    }

    /// Returns the mandatory break duration in seconds for the given total
    /// worked time.
    ///
    /// The minors list is used when `is_minor` is set and the list is
    /// non-empty; otherwise the regular list applies. The result is the
    /// `break_seconds` of the last tier whose threshold is reached, or 0
    /// when no tier qualifies (below-minimum, not an error).
    pub fn lookup(&self, total_worked_seconds: i64, is_minor: bool) -> i64 {
        if is_minor && !self.minors.is_empty() {
            return Self::search(&self.minors, total_worked_seconds);
        }

        Self::search(&self.regular, total_worked_seconds)
    }

    fn search(rules: &[BreakRule], total_worked_seconds: i64) -> i64 {
        let mut break_seconds = 0;

        for rule in rules {
            if total_worked_seconds < rule.min_worked_seconds {
                break;
            }

            break_seconds = rule.break_seconds;
        }

        break_seconds
    }
}

/// The schedule of a single weekday.
///
/// Core time is carried through for reporting but is not consumed by the
/// ledger calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduleDay {
    /// The weekday this definition applies to.
    pub weekday: Weekday,
    /// Regular (target) working time in seconds.
    pub target_worked_seconds: i64,
    /// Start of core time.
    pub core_time_start: NaiveTime,
    /// End of core time.
    pub core_time_end: NaiveTime,
}

/// The flextime schedule of one employee grade.
///
/// Maps every weekday to a [`ScheduleDay`] and carries the deduction
/// applied when a mandatory break was not taken at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    /// Deduction in seconds applied when no break was checked although a
    /// mandatory minimum break applies.
    pub forced_deduction_on_missing_break: i64,
    // Indexed by Weekday::num_days_from_monday; always seven entries.
    days: Vec<ScheduleDay>,
}

impl Schedule {
    /// Builds a schedule from exactly one [`ScheduleDay`] per weekday.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidSchedule`] when a weekday is missing
    /// or duplicated. The `grade` is only used for the error message.
    pub fn new(
        grade: &str,
        forced_deduction_on_missing_break: i64,
        days: Vec<ScheduleDay>,
    ) -> EngineResult<Self> {
        let mut slots: Vec<Option<ScheduleDay>> = vec![None; 7];

        for day in days {
            let index = day.weekday.num_days_from_monday() as usize;
            if slots[index].is_some() {
                return Err(EngineError::InvalidSchedule {
                    grade: grade.to_string(),
                    message: format!("duplicate weekday {}", day.weekday),
                });
            }
            slots[index] = Some(day);
        }

        let days = slots
            .into_iter()
            .enumerate()
            .map(|(index, slot)| {
                slot.ok_or_else(|| EngineError::InvalidSchedule {
                    grade: grade.to_string(),
                    message: format!("missing weekday at offset {index} from monday"),
                })
            })
            .collect::<EngineResult<Vec<_>>>()?;

        Ok(Self {
            forced_deduction_on_missing_break,
            days,
        })
    }

    /// Returns the schedule of the given weekday.
    pub fn day_for(&self, weekday: Weekday) -> &ScheduleDay {
        &self.days[weekday.num_days_from_monday() as usize]
    }
}

/// Raw YAML shape of the break rule file.
#[derive(Debug, Deserialize)]
pub(crate) struct BreakRulesFile {
    pub rules: Vec<BreakRuleEntry>,
}

/// One entry of the break rule file.
#[derive(Debug, Deserialize)]
pub(crate) struct BreakRuleEntry {
    pub min_worked_seconds: i64,
    pub break_seconds: i64,
    #[serde(default)]
    pub minors_only: bool,
}

/// Raw YAML shape of the schedules file.
#[derive(Debug, Deserialize)]
pub(crate) struct SchedulesFile {
    pub schedules: HashMap<String, ScheduleEntry>,
}

/// One per-grade schedule in the schedules file.
#[derive(Debug, Deserialize)]
pub(crate) struct ScheduleEntry {
    pub forced_deduction_on_missing_break: i64,
    pub days: HashMap<String, ScheduleDayEntry>,
}

/// One weekday definition in the schedules file.
#[derive(Debug, Deserialize)]
pub(crate) struct ScheduleDayEntry {
    pub target_worked_seconds: i64,
    pub core_time_start: NaiveTime,
    pub core_time_end: NaiveTime,
}
