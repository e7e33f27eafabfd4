//! Request types for the payroll engine API.
//!
//! Bonus and salary advance bodies deserialize straight into their models;
//! this module holds the attendance bodies and the query strings.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::models::{EmployeeId, EntryType};

/// Request body for `POST /attendance/check-in`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckInRequest {
    /// The employee checking in.
    pub employee_id: EmployeeId,
    /// How the check-in was captured.
    #[serde(default)]
    pub entry_type: EntryType,
    /// Check-in time; the server's local time when omitted.
    #[serde(default)]
    pub at: Option<NaiveDateTime>,
    /// Free-text note.
    #[serde(default)]
    pub note: Option<String>,
}

/// Request body for `POST /attendance/check-out`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckOutRequest {
    /// The employee checking out.
    pub employee_id: EmployeeId,
    /// Check-out time; the server's local time when omitted.
    #[serde(default)]
    pub at: Option<NaiveDateTime>,
}

/// Query string of `GET /attendance/daily`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyQuery {
    /// Restrict to one employee.
    #[serde(default)]
    pub employee_id: Option<EmployeeId>,
    /// The day to list.
    pub date: NaiveDate,
}

/// Query string of the attendance report endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportQuery {
    /// Restrict to one employee.
    #[serde(default)]
    pub employee_id: Option<EmployeeId>,
    /// First day of the range.
    pub start_date: NaiveDate,
    /// Last day of the range (inclusive).
    pub end_date: NaiveDate,
}
