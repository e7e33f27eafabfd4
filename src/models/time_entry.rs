//! Time entry model and the attendance session lifecycle.
//!
//! A [`TimeEntry`] records one attendance session for an employee-day. Its
//! lifecycle is `NoSession -> Open -> Closed`; the state is derived from which
//! timestamps are set.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::EmployeeId;

/// Identifier of a persisted time entry.
pub type TimeEntryId = u64;

/// How the check-in was captured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntryType {
    /// Entered by hand (the default).
    #[default]
    Manual,
    /// Captured by a badge reader.
    Badge,
    /// Captured by the mobile application.
    Mobile,
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EntryType::Manual => "MANUAL",
            EntryType::Badge => "BADGE",
            EntryType::Mobile => "MOBILE",
        };
        f.write_str(label)
    }
}

/// The state of an attendance session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// No check-in recorded.
    NoSession,
    /// Check-in recorded, check-out pending.
    Open,
    /// Both check-in and check-out recorded.
    Closed,
}

/// One attendance record for an employee-day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeEntry {
    /// Store-assigned identifier.
    pub id: TimeEntryId,
    /// The employee the entry belongs to.
    pub employee_id: EmployeeId,
    /// The calendar day of the check-in.
    pub date: NaiveDate,
    /// When the employee checked in.
    pub check_in: Option<NaiveDateTime>,
    /// When the employee checked out.
    pub check_out: Option<NaiveDateTime>,
    /// Minutes after the configured workday start at check-in.
    pub late_minutes: u32,
    /// Automatic break deducted at check-out.
    pub break_minutes: u32,
    /// Hours worked, net of the break. Set at check-out.
    pub hours_worked: Option<Decimal>,
    /// Hours beyond the standard workday. Set at check-out.
    pub overtime_hours: Option<Decimal>,
    /// How the check-in was captured.
    pub entry_type: EntryType,
    /// Free-text note.
    #[serde(default)]
    pub note: Option<String>,
}

impl TimeEntry {
    /// Derives the session state from the recorded timestamps.
    pub fn state(&self) -> SessionState {
        match (self.check_in, self.check_out) {
            (Some(_), None) => SessionState::Open,
            (Some(_), Some(_)) => SessionState::Closed,
            (None, _) => SessionState::NoSession,
        }
    }

    /// Returns true when the entry has a check-in but no check-out.
    pub fn is_open(&self) -> bool {
        self.state() == SessionState::Open
    }
}
