//! Abstract providers consumed by the engine.
//!
//! The engine never talks to a database or an HTTP service directly; all
//! I/O goes through the traits in this module. Implementations (SQL
//! store, in-memory cache, ...) live outside the engine; the
//! [`memory`] submodule ships in-memory reference implementations used by
//! the tests.

pub mod memory;

use chrono::{Local, NaiveDate, NaiveDateTime};
use std::cell::RefCell;
use std::collections::HashMap;

use crate::config::{BreakRuleTable, Schedule};
use crate::error::EngineResult;
use crate::models::{
    AttendanceRecord, EmployeeContext, LedgerEntry, RawEvent, VacationRequest, WorklogRef,
};

/// Source of the current date and time.
///
/// All times are naive local time; the engine does no timezone handling.
pub trait Clock {
    /// Returns today's date.
    fn today(&self) -> NaiveDate;
    /// Returns the current date and time.
    fn now(&self) -> NaiveDateTime;
}

/// A [`Clock`] backed by the system's local time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Directory of employees known to the system.
pub trait EmployeeDirectory {
    /// Returns all employees.
    fn get_all(&self) -> EngineResult<Vec<EmployeeContext>>;
    /// Returns the employee linked to the current session user, if any.
    fn get_current(&self) -> EngineResult<Option<EmployeeContext>>;
}

/// Provides the flextime schedule of an employee grade.
pub trait ScheduleProvider {
    /// Returns the schedule for the grade, or `None` if the grade has no
    /// flextime schedule configured.
    fn get_by_grade(&self, grade: &str) -> EngineResult<Option<Schedule>>;
}

/// Provides the break rule table.
pub trait BreakRuleProvider {
    /// Returns the configured break rule tiers.
    fn get_definitions(&self) -> EngineResult<BreakRuleTable>;
}

/// Answers whether a date is a public holiday.
pub trait HolidayOracle {
    /// Returns true if the date is a holiday.
    fn is_holiday(&self, date: NaiveDate) -> EngineResult<bool>;
}

/// Looks up approved vacation requests.
pub trait VacationOracle {
    /// Returns the approved vacation request covering the date, if any.
    fn get_approved_request(
        &self,
        employee_id: &str,
        date: NaiveDate,
    ) -> EngineResult<Option<VacationRequest>>;
}

/// Reads and creates attendance records.
pub trait AttendanceStore {
    /// Returns the attendance record for the employee and date, if any.
    fn get(&self, employee_id: &str, date: NaiveDate) -> EngineResult<Option<AttendanceRecord>>;
    /// Creates a new attendance record.
    fn create(&self, record: AttendanceRecord) -> EngineResult<()>;
}

/// Source of raw punch events.
pub trait PunchSource {
    /// Returns the punch events of the employee on the date, ordered by
    /// time ascending.
    fn get(&self, employee_id: &str, date: NaiveDate) -> EngineResult<Vec<RawEvent>>;
}

/// Source of worklog references.
pub trait WorklogSource {
    /// Returns the worklogs of the employee on the date.
    fn get_for_employee_on_date(
        &self,
        employee_id: &str,
        date: NaiveDate,
    ) -> EngineResult<Vec<WorklogRef>>;
}

/// The append-only store of ledger entries.
///
/// `add` must persist the entry together with its intervals and worklogs
/// as one atomic unit: a partial write must never leave an entry visible
/// without its intervals, since a later run would read a corrupted total.
/// Entries are immutable once added.
pub trait LedgerStore {
    /// Returns the latest date with a persisted entry for the employee
    /// (the watermark), or `None` if no entry exists.
    fn get_latest_date(&self, employee_id: &str) -> EngineResult<Option<NaiveDate>>;
    /// Returns the latest persisted balance in hours, or `0.0` if no
    /// entry exists.
    fn get_balance(&self, employee_id: &str) -> EngineResult<f64>;
    /// Returns the balance persisted exactly on the given date, if any.
    fn get_balance_as_of(&self, employee_id: &str, date: NaiveDate)
    -> EngineResult<Option<f64>>;
    /// Atomically persists a new entry and marks it immutable.
    fn add(&self, entry: LedgerEntry) -> EngineResult<()>;
}

/// A memoizing [`ScheduleProvider`] wrapper scoped to one reconciliation
/// run.
///
/// Schedules are looked up once per grade and cached, including negative
/// results. The cache lives in the wrapper instance, not in global state;
/// drop the wrapper when the run ends.
pub struct CachingScheduleProvider<'a> {
    inner: &'a dyn ScheduleProvider,
    cache: RefCell<HashMap<String, Option<Schedule>>>,
}

impl<'a> CachingScheduleProvider<'a> {
    /// Wraps the given provider.
    pub fn new(inner: &'a dyn ScheduleProvider) -> Self {
        Self {
            inner,
            cache: RefCell::new(HashMap::new()),
        }
    }
}

impl ScheduleProvider for CachingScheduleProvider<'_> {
    fn get_by_grade(&self, grade: &str) -> EngineResult<Option<Schedule>> {
        if let Some(cached) = self.cache.borrow().get(grade) {
            return Ok(cached.clone());
        }

        let schedule = self.inner.get_by_grade(grade)?;
        self.cache
            .borrow_mut()
            .insert(grade.to_string(), schedule.clone());

        Ok(schedule)
    }
}
