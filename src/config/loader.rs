//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading break rules
//! and per-grade flextime schedules from YAML files.

use chrono::Weekday;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};
use crate::providers::{BreakRuleProvider, ScheduleProvider};

use super::types::{
    BreakRule, BreakRuleTable, BreakRulesFile, Schedule, ScheduleDay, SchedulesFile,
};

/// Loads and provides access to the flextime rule configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory and
/// acts as the [`ScheduleProvider`] and [`BreakRuleProvider`] for a
/// reconciliation run.
///
/// # Directory Structure
///
/// ```text
/// config/flextime/
/// ├── break_rules.yaml  # Tiered mandatory break durations
/// └── schedules.yaml    # Per-grade weekday schedules
/// ```
///
/// # Example
///
/// ```no_run
/// use flextime_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/flextime").unwrap();
/// let schedule = loader.schedule("Staff").unwrap();
/// println!("Forced deduction: {}s", schedule.forced_deduction_on_missing_break);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    break_rules: BreakRuleTable,
    schedules: HashMap<String, Schedule>,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Errors
    ///
    /// Returns an error if a required file is missing, contains invalid
    /// YAML, or a schedule does not cover all seven weekdays.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let rules_file = Self::load_yaml::<BreakRulesFile>(&path.join("break_rules.yaml"))?;
        let schedules_file = Self::load_yaml::<SchedulesFile>(&path.join("schedules.yaml"))?;

        let mut break_rules = BreakRuleTable::default();
        for entry in rules_file.rules {
            break_rules.insert(
                BreakRule {
                    min_worked_seconds: entry.min_worked_seconds,
                    break_seconds: entry.break_seconds,
                },
                entry.minors_only,
            );
        }

        let mut schedules = HashMap::new();
        for (grade, entry) in schedules_file.schedules {
            let mut days = Vec::with_capacity(7);

            for (name, day) in &entry.days {
                days.push(ScheduleDay {
                    weekday: weekday_from_name(&grade, name)?,
                    target_worked_seconds: day.target_worked_seconds,
                    core_time_start: day.core_time_start,
                    core_time_end: day.core_time_end,
                });
            }

            let schedule = Schedule::new(&grade, entry.forced_deduction_on_missing_break, days)?;
            schedules.insert(grade, schedule);
        }

        Ok(Self {
            break_rules,
            schedules,
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParse {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the loaded break rule table.
    pub fn break_rules(&self) -> &BreakRuleTable {
        &self.break_rules
    }

    /// Returns the schedule configured for the given grade, if any.
    pub fn schedule(&self, grade: &str) -> Option<&Schedule> {
        self.schedules.get(grade)
    }
}

impl ScheduleProvider for ConfigLoader {
    fn get_by_grade(&self, grade: &str) -> EngineResult<Option<Schedule>> {
        Ok(self.schedules.get(grade).cloned())
    }
}

impl BreakRuleProvider for ConfigLoader {
    fn get_definitions(&self) -> EngineResult<BreakRuleTable> {
        Ok(self.break_rules.clone())
    }
}

fn weekday_from_name(grade: &str, name: &str) -> EngineResult<Weekday> {
    match name.to_lowercase().as_str() {
        "monday" => Ok(Weekday::Mon),
        "tuesday" => Ok(Weekday::Tue),
        "wednesday" => Ok(Weekday::Wed),
        "thursday" => Ok(Weekday::Thu),
        "friday" => Ok(Weekday::Fri),
        "saturday" => Ok(Weekday::Sat),
        "sunday" => Ok(Weekday::Sun),
        other => Err(EngineError::InvalidSchedule {
            grade: grade.to_string(),
            message: format!("unknown weekday '{other}'"),
        }),
    }
}
