//! Worklog reference model.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A reference to a worklog entry attached to a ledger entry for audit.
///
/// Worklogs do not affect any calculation; they document what was done on
/// a reconciled day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorklogRef {
    /// ID of the employee the worklog belongs to.
    pub employee_id: String,
    /// The date and time the worklog refers to.
    pub log_time: NaiveDateTime,
    /// Description of the completed task.
    pub description: String,
    /// Optional reference to a task record.
    #[serde(default)]
    pub task: Option<String>,
}
