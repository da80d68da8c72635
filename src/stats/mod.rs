//! Read-side balance statistics.
//!
//! This module computes the presentation values of a flextime account:
//! the current balance with its 30-day trend, and the live "time worked
//! so far today" duration.

use chrono::Duration;
use tracing::info;

use crate::calculation::EventList;
use crate::error::EngineResult;
use crate::providers::{Clock, EmployeeDirectory, LedgerStore, PunchSource};

/// A flextime balance with its 30-day trend, split for display.
///
/// Fractional hours are split into whole hours and minutes with
/// `hours = floor(|v|) * sign(v)` and `minutes = round((v - hours) * 60)`.
/// Rounding of fractional minutes is round-half-away-from-zero
/// (`f64::round`); both values carry the sign of the input.
///
/// # Example
///
/// ```
/// use flextime_engine::stats::FlextimeBalance;
///
/// let balance = FlextimeBalance::new(1.3, 0.56);
/// assert_eq!(balance.balance_hours, 1);
/// assert_eq!(balance.balance_minutes, 18);
/// assert_eq!(balance.trend_hours, 0);
/// assert_eq!(balance.trend_minutes, 34);
/// assert!((balance.trend_percent - 0.4308).abs() < 1e-4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlextimeBalance {
    /// Whole hours of the current balance (sign-carrying).
    pub balance_hours: i64,
    /// Remaining minutes of the current balance (sign-carrying).
    pub balance_minutes: i64,
    /// Whole hours of the 30-day growth.
    pub trend_hours: i64,
    /// Remaining minutes of the 30-day growth.
    pub trend_minutes: i64,
    /// 30-day growth relative to the balance (0-1), sign-matched to the
    /// growth; 0 when the balance is 0.
    pub trend_percent: f64,
}

impl FlextimeBalance {
    /// Builds the display values from a balance and its 30-day growth,
    /// both in fractional hours.
    pub fn new(balance: f64, monthly_growth: f64) -> Self {
        let trend_percent = if balance != 0.0 {
            let percent = (monthly_growth / balance).abs();
            if monthly_growth < 0.0 { -percent } else { percent }
        } else {
            0.0
        };

        let (balance_hours, balance_minutes) = split_hours_minutes(balance);
        let (trend_hours, trend_minutes) = split_hours_minutes(monthly_growth);

        Self {
            balance_hours,
            balance_minutes,
            trend_hours,
            trend_minutes,
            trend_percent,
        }
    }

    /// Returns true if the balance displays as zero hours and minutes.
    pub fn is_zero(&self) -> bool {
        self.balance_hours == 0 && self.balance_minutes == 0
    }
}

/// Splits fractional hours into sign-carrying whole hours and rounded
/// minutes.
fn split_hours_minutes(value: f64) -> (i64, i64) {
    let sign = if value < 0.0 { -1 } else { 1 };

    let hours = value.abs().floor() as i64 * sign;
    let minutes = ((value - hours as f64) * 60.0).round() as i64;

    (hours, minutes)
}

/// Computes balance statistics for the current employee.
pub struct BalanceStatisticsService<'a> {
    clock: &'a dyn Clock,
    employees: &'a dyn EmployeeDirectory,
    ledger: &'a dyn LedgerStore,
    punches: &'a dyn PunchSource,
}

impl<'a> BalanceStatisticsService<'a> {
    /// Creates a service over the given providers.
    pub fn new(
        clock: &'a dyn Clock,
        employees: &'a dyn EmployeeDirectory,
        ledger: &'a dyn LedgerStore,
        punches: &'a dyn PunchSource,
    ) -> Self {
        Self {
            clock,
            employees,
            ledger,
            punches,
        }
    }

    /// Returns the current balance and its 30-day trend.
    ///
    /// The trend is the difference between the latest persisted balance
    /// and the balance persisted exactly 30 days ago; it is 0 when no
    /// entry exists for that date.
    pub fn get_balance(&self) -> EngineResult<FlextimeBalance> {
        let Some(employee) = self.employees.get_current()? else {
            return Ok(FlextimeBalance::new(0.0, 0.0));
        };

        let current = self.ledger.get_balance(&employee.id)?;
        let last_month = self
            .ledger
            .get_balance_as_of(&employee.id, self.clock.today() - Duration::days(30))?;

        let trend = match last_month {
            Some(past) => current - past,
            None => 0.0,
        };

        Ok(FlextimeBalance::new(current, trend))
    }

    /// Returns the total seconds of the most recent contiguous
    /// work-or-break block of today.
    ///
    /// An open span is closed with a virtual event at `now` before
    /// matching; the trailing run of same-kind intervals is summed.
    pub fn get_current_duration(&self) -> EngineResult<i64> {
        let Some(employee) = self.employees.get_current()? else {
            return Ok(0);
        };

        let today = self.clock.today();
        let mut events = EventList::new(self.punches.get(&employee.id, today)?);
        events.close_open_span(self.clock.now());

        let intervals = events.intervals();
        let Some(last) = intervals.last() else {
            return Ok(0);
        };

        let total_seconds = intervals
            .iter()
            .rev()
            .take_while(|i| i.kind == last.kind)
            .map(|i| i.total_seconds)
            .sum();

        info!(employee = %employee.id, total_seconds, "current duration computed");
        Ok(total_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// ST-001: positive balance and growth split into hours and minutes
    #[test]
    fn test_balance_split_positive() {
        let balance = FlextimeBalance::new(1.3, 0.56);

        assert_eq!(balance.balance_hours, 1);
        assert_eq!(balance.balance_minutes, 18);
        assert_eq!(balance.trend_hours, 0);
        assert_eq!(balance.trend_minutes, 34);
        assert!((balance.trend_percent - 0.56 / 1.3).abs() < 1e-9);
    }

    /// ST-002: negative values carry their sign into hours and minutes
    #[test]
    fn test_balance_split_negative() {
        let balance = FlextimeBalance::new(-1.3, -0.5);

        assert_eq!(balance.balance_hours, -1);
        assert_eq!(balance.balance_minutes, -18);
        assert_eq!(balance.trend_hours, 0);
        assert_eq!(balance.trend_minutes, -30);
        assert!(balance.trend_percent < 0.0);
    }

    /// ST-003: a zero balance yields a zero trend percent
    #[test]
    fn test_zero_balance_percent_is_zero() {
        let balance = FlextimeBalance::new(0.0, 0.5);
        assert_eq!(balance.trend_percent, 0.0);
        assert!(balance.is_zero());
    }

    /// ST-004: negative growth flips the percent sign
    #[test]
    fn test_negative_growth_negative_percent() {
        let balance = FlextimeBalance::new(2.0, -0.5);
        assert!((balance.trend_percent - (-0.25)).abs() < 1e-9);
    }

    /// ST-005: exact half minutes round away from zero
    #[test]
    fn test_half_minute_rounds_away_from_zero() {
        // 0.0083333...h * 60 = 0.5 minutes
        let (_, minutes) = split_hours_minutes(0.5 / 60.0);
        assert_eq!(minutes, 1);

        let (_, minutes) = split_hours_minutes(-0.5 / 60.0);
        assert_eq!(minutes, -1);
    }

    #[test]
    fn test_is_zero_only_for_zero_display() {
        assert!(FlextimeBalance::new(0.0, 0.0).is_zero());
        assert!(!FlextimeBalance::new(0.1, 0.0).is_zero());
    }
}
