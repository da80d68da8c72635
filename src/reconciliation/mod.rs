//! Day-by-day reconciliation of flextime accounts.
//!
//! The [`ReconciliationService`] backfills one ledger entry per employee
//! per calendar day, from the watermark (latest persisted date) up to but
//! excluding today. Day N's balance strictly requires day N-1's persisted
//! balance, so the day loop is sequential per employee; the run as a
//! whole is idempotent and safe to re-trigger periodically.
//!
//! Different employees are independent and may be handled by parallel
//! workers, provided the caller guarantees that each employee's ledger is
//! only ever touched by one worker at a time (per-employee lock or
//! single-writer queue). The service itself is single-threaded.

use chrono::{Datelike, NaiveDate};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::calculation::{EventList, calculate_daily_ledger};
use crate::config::{BreakRuleTable, Schedule};
use crate::error::EngineResult;
use crate::models::{AttendanceRecord, AttendanceStatus, EmployeeContext, LedgerEntry};
use crate::providers::{
    AttendanceStore, BreakRuleProvider, CachingScheduleProvider, Clock, EmployeeDirectory,
    HolidayOracle, LedgerStore, PunchSource, ScheduleProvider, VacationOracle, WorklogSource,
};

/// Drives the ledger backfill for all employees.
///
/// Create one service per run; the per-grade schedule cache is scoped to
/// the service instance.
pub struct ReconciliationService<'a> {
    clock: &'a dyn Clock,
    employees: &'a dyn EmployeeDirectory,
    schedules: CachingScheduleProvider<'a>,
    break_rules: &'a dyn BreakRuleProvider,
    holidays: &'a dyn HolidayOracle,
    vacations: &'a dyn VacationOracle,
    attendance: &'a dyn AttendanceStore,
    punches: &'a dyn PunchSource,
    worklogs: &'a dyn WorklogSource,
    ledger: &'a dyn LedgerStore,
}

impl<'a> ReconciliationService<'a> {
    /// Creates a service over the given providers.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        clock: &'a dyn Clock,
        employees: &'a dyn EmployeeDirectory,
        schedules: &'a dyn ScheduleProvider,
        break_rules: &'a dyn BreakRuleProvider,
        holidays: &'a dyn HolidayOracle,
        vacations: &'a dyn VacationOracle,
        attendance: &'a dyn AttendanceStore,
        punches: &'a dyn PunchSource,
        worklogs: &'a dyn WorklogSource,
        ledger: &'a dyn LedgerStore,
    ) -> Self {
        Self {
            clock,
            employees,
            schedules: CachingScheduleProvider::new(schedules),
            break_rules,
            holidays,
            vacations,
            attendance,
            punches,
            worklogs,
            ledger,
        }
    }

    /// Backfills the daily ledger for every employee.
    ///
    /// Employees without the flextime model or without a schedule for
    /// their grade are skipped (logged, non-fatal). A failure while
    /// processing one employee aborts that employee's remaining days only;
    /// all other employees are still processed.
    pub fn process_daily_status(&self) -> EngineResult<()> {
        let employees = self.employees.get_all()?;
        let break_rules = self.break_rules.get_definitions()?;

        for employee in employees {
            info!(employee = %employee.id, "starting flextime processing");

            if !employee.uses_flextime() {
                info!(employee = %employee.id, "skipping employee, time model is not flextime");
                continue;
            }

            let Some(schedule) = self.schedules.get_by_grade(&employee.grade)? else {
                info!(
                    employee = %employee.id,
                    grade = %employee.grade,
                    "skipping employee, no flextime schedule found for grade"
                );
                continue;
            };

            if let Err(e) = self.process_employee(&employee, &break_rules, &schedule) {
                error!(
                    employee = %employee.id,
                    error = %e,
                    "aborting employee, day could not be reconciled"
                );
            }
        }

        Ok(())
    }

    /// Backfills one employee from the watermark up to (excluding) today.
    fn process_employee(
        &self,
        employee: &EmployeeContext,
        break_rules: &BreakRuleTable,
        schedule: &Schedule,
    ) -> EngineResult<()> {
        let mut current_day = resume_date(
            self.ledger.get_latest_date(&employee.id)?,
            employee.join_date,
        );

        let mut balance = self.ledger.get_balance(&employee.id)?;
        info!(employee = %employee.id, balance, "found current flextime balance");

        while current_day < self.clock.today() {
            info!(employee = %employee.id, day = %current_day, "processing day");

            let attendance = self.attendance.get(&employee.id, current_day)?;
            let mut target_worked_seconds =
                schedule.day_for(current_day.weekday()).target_worked_seconds;
            let mut worklogs = Vec::new();

            if self.holidays.is_holiday(current_day)? {
                target_worked_seconds = 0;
                info!(day = %current_day, "holiday, target working time set to zero");
            } else if attendance.as_ref().is_some_and(|a| a.is_on_leave()) {
                match self.vacations.get_approved_request(&employee.id, current_day)? {
                    None => {
                        target_worked_seconds = 0;
                        warn!(
                            employee = %employee.id,
                            day = %current_day,
                            "on-leave attendance without approved vacation request, \
                             treating as full unpaid day"
                        );
                    }
                    Some(request) if request.is_half_day => {
                        target_worked_seconds /= 2;
                        worklogs = self
                            .worklogs
                            .get_for_employee_on_date(&employee.id, current_day)?;
                        info!(day = %current_day, "half-day vacation, target halved");
                    }
                    Some(_) => {
                        target_worked_seconds = 0;
                        info!(day = %current_day, "full-day vacation, target set to zero");
                    }
                }
            } else {
                worklogs = self
                    .worklogs
                    .get_for_employee_on_date(&employee.id, current_day)?;
            }

            let events = EventList::new(self.punches.get(&employee.id, current_day)?);
            let intervals = events.intervals();
            info!(count = intervals.len(), "matched intervals");

            let result = calculate_daily_ledger(
                &intervals,
                break_rules,
                schedule.forced_deduction_on_missing_break,
                employee.is_minor(current_day),
                target_worked_seconds,
                balance,
            );

            let entry = LedgerEntry {
                id: Uuid::new_v4(),
                employee_id: employee.id.clone(),
                date: current_day,
                total_worked_seconds: result.total_worked_seconds,
                break_deducted_seconds: result.break_deducted_seconds,
                target_worked_seconds,
                delta_hours: result.delta_hours,
                balance_hours: result.balance_hours,
                intervals,
                worklogs,
            };

            // The watermark only advances with a successful atomic persist.
            self.ledger.add(entry.clone())?;

            if attendance.is_none() {
                self.create_attendance(&entry)?;
            }

            balance = result.balance_hours;
            info!(employee = %employee.id, balance, "new flextime balance");

            let Some(next_day) = current_day.succ_opt() else {
                break;
            };
            current_day = next_day;
        }

        Ok(())
    }

    /// Auto-creates an attendance record from a reconciled day.
    ///
    /// No record is created for days without a target (holidays, full
    /// leave); otherwise the employee is Present if any time was worked
    /// and Absent if none was.
    fn create_attendance(&self, entry: &LedgerEntry) -> EngineResult<()> {
        if entry.target_worked_seconds == 0 {
            return Ok(());
        }

        let status = if entry.total_worked_seconds > 0 {
            AttendanceStatus::Present
        } else {
            AttendanceStatus::Absent
        };

        self.attendance.create(AttendanceRecord::new(
            entry.employee_id.clone(),
            entry.date,
            status,
        ))
    }
}

/// Returns the resume date of a backfill: the day after the watermark,
/// or the join date when no entry exists yet.
pub fn resume_date(watermark: Option<NaiveDate>, join_date: NaiveDate) -> NaiveDate {
    match watermark {
        Some(date) => date.succ_opt().unwrap_or(date),
        None => join_date,
    }
}
