//! In-memory reference implementations of the provider traits.
//!
//! These back the integration tests and serve as the simplest possible
//! implementations of the provider contracts. The ledger store enforces
//! the append-only, one-entry-per-date rule the way a real store must.

use chrono::{NaiveDate, NaiveDateTime};
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap, HashSet};

use crate::error::{EngineError, EngineResult};
use crate::models::{
    AttendanceRecord, EmployeeContext, LedgerEntry, RawEvent, VacationRequest, WorklogRef,
};

use super::{
    AttendanceStore, Clock, EmployeeDirectory, HolidayOracle, LedgerStore, PunchSource,
    VacationOracle, WorklogSource,
};

/// A [`Clock`] that always returns fixed values.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    /// The date reported as today.
    pub today: NaiveDate,
    /// The timestamp reported as now.
    pub now: NaiveDateTime,
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.today
    }

    fn now(&self) -> NaiveDateTime {
        self.now
    }
}

/// An [`EmployeeDirectory`] over a fixed list of employees.
#[derive(Debug, Clone, Default)]
pub struct InMemoryEmployees {
    employees: Vec<EmployeeContext>,
    current: Option<EmployeeContext>,
}

impl InMemoryEmployees {
    /// Creates a directory over the given employees.
    pub fn new(employees: Vec<EmployeeContext>) -> Self {
        Self {
            employees,
            current: None,
        }
    }

    /// Marks one employee as the current session user.
    pub fn with_current(mut self, employee: EmployeeContext) -> Self {
        self.current = Some(employee);
        self
    }
}

impl EmployeeDirectory for InMemoryEmployees {
    fn get_all(&self) -> EngineResult<Vec<EmployeeContext>> {
        Ok(self.employees.clone())
    }

    fn get_current(&self) -> EngineResult<Option<EmployeeContext>> {
        Ok(self.current.clone())
    }
}

/// A [`HolidayOracle`] over a set of dates.
#[derive(Debug, Clone, Default)]
pub struct InMemoryHolidays {
    dates: HashSet<NaiveDate>,
}

impl InMemoryHolidays {
    /// Marks a date as a holiday.
    pub fn insert(&mut self, date: NaiveDate) {
        self.dates.insert(date);
    }
}

impl HolidayOracle for InMemoryHolidays {
    fn is_holiday(&self, date: NaiveDate) -> EngineResult<bool> {
        Ok(self.dates.contains(&date))
    }
}

/// A [`VacationOracle`] over explicitly registered approved requests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryVacations {
    requests: HashMap<(String, NaiveDate), VacationRequest>,
}

impl InMemoryVacations {
    /// Registers an approved request for the employee and date.
    pub fn insert(&mut self, employee_id: &str, date: NaiveDate, request: VacationRequest) {
        self.requests
            .insert((employee_id.to_string(), date), request);
    }
}

impl VacationOracle for InMemoryVacations {
    fn get_approved_request(
        &self,
        employee_id: &str,
        date: NaiveDate,
    ) -> EngineResult<Option<VacationRequest>> {
        Ok(self
            .requests
            .get(&(employee_id.to_string(), date))
            .copied())
    }
}

/// An [`AttendanceStore`] over a hash map.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAttendance {
    records: RefCell<HashMap<(String, NaiveDate), AttendanceRecord>>,
}

impl InMemoryAttendance {
    /// Seeds a pre-existing record (e.g. an on-leave day).
    pub fn insert(&mut self, record: AttendanceRecord) {
        self.records
            .borrow_mut()
            .insert((record.employee_id.clone(), record.date), record);
    }

    /// Returns a snapshot of the record for assertions.
    pub fn record(&self, employee_id: &str, date: NaiveDate) -> Option<AttendanceRecord> {
        self.records
            .borrow()
            .get(&(employee_id.to_string(), date))
            .cloned()
    }
}

impl AttendanceStore for InMemoryAttendance {
    fn get(&self, employee_id: &str, date: NaiveDate) -> EngineResult<Option<AttendanceRecord>> {
        Ok(self
            .records
            .borrow()
            .get(&(employee_id.to_string(), date))
            .cloned())
    }

    fn create(&self, record: AttendanceRecord) -> EngineResult<()> {
        self.records
            .borrow_mut()
            .insert((record.employee_id.clone(), record.date), record);
        Ok(())
    }
}

/// A [`PunchSource`] over pre-seeded events.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPunches {
    events: HashMap<(String, NaiveDate), Vec<RawEvent>>,
}

impl InMemoryPunches {
    /// Seeds the punch events of one employee-day (ordered by time).
    pub fn insert(&mut self, employee_id: &str, date: NaiveDate, events: Vec<RawEvent>) {
        self.events.insert((employee_id.to_string(), date), events);
    }
}

impl PunchSource for InMemoryPunches {
    fn get(&self, employee_id: &str, date: NaiveDate) -> EngineResult<Vec<RawEvent>> {
        Ok(self
            .events
            .get(&(employee_id.to_string(), date))
            .cloned()
            .unwrap_or_default())
    }
}

/// A [`WorklogSource`] over pre-seeded worklogs.
#[derive(Debug, Clone, Default)]
pub struct InMemoryWorklogs {
    worklogs: HashMap<(String, NaiveDate), Vec<WorklogRef>>,
}

impl InMemoryWorklogs {
    /// Seeds the worklogs of one employee-day.
    pub fn insert(&mut self, employee_id: &str, date: NaiveDate, worklogs: Vec<WorklogRef>) {
        self.worklogs
            .insert((employee_id.to_string(), date), worklogs);
    }
}

impl WorklogSource for InMemoryWorklogs {
    fn get_for_employee_on_date(
        &self,
        employee_id: &str,
        date: NaiveDate,
    ) -> EngineResult<Vec<WorklogRef>> {
        Ok(self
            .worklogs
            .get(&(employee_id.to_string(), date))
            .cloned()
            .unwrap_or_default())
    }
}

/// A [`LedgerStore`] over per-employee date-ordered maps.
///
/// The insert is atomic by construction (the whole entry lands in one map
/// slot) and rejects a second entry for an already reconciled date, since
/// ledger entries are immutable once created.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLedger {
    entries: RefCell<HashMap<String, BTreeMap<NaiveDate, LedgerEntry>>>,
}

impl InMemoryLedger {
    /// Returns a snapshot of the employee's entries, ordered by date.
    pub fn entries_for(&self, employee_id: &str) -> Vec<LedgerEntry> {
        self.entries
            .borrow()
            .get(employee_id)
            .map(|m| m.values().cloned().collect())
            .unwrap_or_default()
    }
}

impl LedgerStore for InMemoryLedger {
    fn get_latest_date(&self, employee_id: &str) -> EngineResult<Option<NaiveDate>> {
        Ok(self
            .entries
            .borrow()
            .get(employee_id)
            .and_then(|m| m.keys().next_back().copied()))
    }

    fn get_balance(&self, employee_id: &str) -> EngineResult<f64> {
        Ok(self
            .entries
            .borrow()
            .get(employee_id)
            .and_then(|m| m.values().next_back())
            .map(|entry| entry.balance_hours)
            .unwrap_or(0.0))
    }

    fn get_balance_as_of(
        &self,
        employee_id: &str,
        date: NaiveDate,
    ) -> EngineResult<Option<f64>> {
        Ok(self
            .entries
            .borrow()
            .get(employee_id)
            .and_then(|m| m.get(&date))
            .map(|entry| entry.balance_hours))
    }

    fn add(&self, entry: LedgerEntry) -> EngineResult<()> {
        let mut entries = self.entries.borrow_mut();
        let per_employee = entries.entry(entry.employee_id.clone()).or_default();

        if per_employee.contains_key(&entry.date) {
            return Err(EngineError::Storage {
                message: format!(
                    "ledger entry for {} on {} already exists",
                    entry.employee_id, entry.date
                ),
            });
        }

        per_employee.insert(entry.date, entry);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn make_entry(date: NaiveDate, balance: f64) -> LedgerEntry {
        LedgerEntry {
            id: Uuid::new_v4(),
            employee_id: "emp_001".to_string(),
            date,
            total_worked_seconds: 28_800,
            break_deducted_seconds: 0,
            target_worked_seconds: 28_800,
            delta_hours: 0.0,
            balance_hours: balance,
            intervals: vec![],
            worklogs: vec![],
        }
    }

    #[test]
    fn test_ledger_watermark_and_balance() {
        let ledger = InMemoryLedger::default();
        assert!(ledger.get_latest_date("emp_001").unwrap().is_none());
        assert_eq!(ledger.get_balance("emp_001").unwrap(), 0.0);

        let monday = NaiveDate::from_ymd_opt(2026, 1, 12).unwrap();
        let tuesday = NaiveDate::from_ymd_opt(2026, 1, 13).unwrap();
        ledger.add(make_entry(monday, 0.5)).unwrap();
        ledger.add(make_entry(tuesday, 1.5)).unwrap();

        assert_eq!(ledger.get_latest_date("emp_001").unwrap(), Some(tuesday));
        assert_eq!(ledger.get_balance("emp_001").unwrap(), 1.5);
        assert_eq!(
            ledger.get_balance_as_of("emp_001", monday).unwrap(),
            Some(0.5)
        );
        assert!(
            ledger
                .get_balance_as_of("emp_001", NaiveDate::from_ymd_opt(2026, 1, 14).unwrap())
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn test_ledger_rejects_duplicate_date() {
        let ledger = InMemoryLedger::default();
        let monday = NaiveDate::from_ymd_opt(2026, 1, 12).unwrap();

        ledger.add(make_entry(monday, 0.0)).unwrap();
        let result = ledger.add(make_entry(monday, 1.0));

        assert!(matches!(result, Err(EngineError::Storage { .. })));
    }
}
