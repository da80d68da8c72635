//! Attendance and vacation models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The status recorded on an attendance record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    /// The employee worked on the day.
    Present,
    /// The employee was expected but did not work.
    Absent,
    /// The employee was on approved leave.
    OnLeave,
    /// Any other externally recorded status.
    Other,
}

/// The type of leave on an on-leave attendance record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveType {
    /// Leave without a more specific classification.
    Undefined,
    /// Sick leave.
    Sick,
}

/// An attendance record for one employee and one date.
///
/// Existing records are read by the reconciliation loop to detect leave
/// days; missing records are auto-created after a day has been reconciled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// The employee the record belongs to.
    pub employee_id: String,
    /// The date of the record.
    pub date: NaiveDate,
    /// The recorded status.
    pub status: AttendanceStatus,
    /// Leave type, only meaningful when `status` is
    /// [`AttendanceStatus::OnLeave`].
    #[serde(default)]
    pub leave_type: Option<LeaveType>,
}

impl AttendanceRecord {
    /// Creates a record without a leave type.
    pub fn new(employee_id: String, date: NaiveDate, status: AttendanceStatus) -> Self {
        Self {
            employee_id,
            date,
            status,
            leave_type: None,
        }
    }

    /// Returns true if the record marks the employee as on leave.
    pub fn is_on_leave(&self) -> bool {
        self.status == AttendanceStatus::OnLeave
    }
}

/// An approved vacation request covering a single date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VacationRequest {
    /// True if only half of the day is taken as vacation.
    pub is_half_day: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_on_leave() {
        let record = AttendanceRecord::new(
            "emp_001".to_string(),
            NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
            AttendanceStatus::OnLeave,
        );
        assert!(record.is_on_leave());

        let record = AttendanceRecord::new(
            "emp_001".to_string(),
            NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
            AttendanceStatus::Present,
        );
        assert!(!record.is_on_leave());
    }

    #[test]
    fn test_status_serialization() {
        assert_eq!(
            serde_json::to_string(&AttendanceStatus::OnLeave).unwrap(),
            "\"on_leave\""
        );
    }

    #[test]
    fn test_attendance_deserialization_without_leave_type() {
        let json = r#"{
            "employee_id": "emp_001",
            "date": "2026-01-15",
            "status": "absent"
        }"#;

        let record: AttendanceRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.status, AttendanceStatus::Absent);
        assert!(record.leave_type.is_none());
    }
}
