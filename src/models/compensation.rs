//! Bonus and salary advance models.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{EmployeeId, YearMonth};
use crate::error::{EngineError, EngineResult};

/// A one-off bonus paid with a given month's salary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bonus {
    /// Store-assigned identifier; must be empty on creation.
    #[serde(default)]
    pub id: Option<u64>,
    /// The employee receiving the bonus.
    pub employee_id: EmployeeId,
    /// Bonus amount, strictly positive.
    pub amount: Decimal,
    /// Free-text reason.
    #[serde(default)]
    pub description: Option<String>,
    /// The pay month the bonus belongs to.
    #[serde(default)]
    pub month: Option<YearMonth>,
}

/// Lifecycle of a salary advance request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdvanceStatus {
    /// Awaiting a decision.
    #[default]
    Pending,
    /// Accepted.
    Approved,
    /// Refused.
    Rejected,
}

impl fmt::Display for AdvanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AdvanceStatus::Pending => "PENDING",
            AdvanceStatus::Approved => "APPROVED",
            AdvanceStatus::Rejected => "REJECTED",
        };
        f.write_str(label)
    }
}

/// A request to be paid part of a month's salary in advance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryAdvance {
    /// Store-assigned identifier; must be empty on creation.
    #[serde(default)]
    pub id: Option<u64>,
    /// The requesting employee.
    pub employee_id: EmployeeId,
    /// Requested amount, strictly positive.
    pub amount: Decimal,
    /// Free-text reason.
    #[serde(default)]
    pub reason: Option<String>,
    /// The pay month the advance is drawn against.
    #[serde(default)]
    pub month: Option<YearMonth>,
    /// Current status. Forced to `Pending` on creation.
    #[serde(default)]
    pub status: AdvanceStatus,
}

impl SalaryAdvance {
    /// Moves a pending advance to `target`.
    ///
    /// Only `Pending` advances may transition, and only to `Approved` or
    /// `Rejected`.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::models::{AdvanceStatus, SalaryAdvance};
    /// use rust_decimal::Decimal;
    ///
    /// let mut advance = SalaryAdvance {
    ///     id: Some(1),
    ///     employee_id: 4,
    ///     amount: Decimal::new(200_000, 0),
    ///     reason: None,
    ///     month: Some("2025-03".parse().unwrap()),
    ///     status: AdvanceStatus::Pending,
    /// };
    /// advance.transition(AdvanceStatus::Approved).unwrap();
    /// assert!(advance.transition(AdvanceStatus::Rejected).is_err());
    /// ```
    pub fn transition(&mut self, target: AdvanceStatus) -> EngineResult<()> {
        if self.status != AdvanceStatus::Pending {
            return Err(EngineError::InvalidState {
                message: format!(
                    "salary advance {} is {}, only PENDING advances can be decided",
                    self.id.map(|id| id.to_string()).unwrap_or_default(),
                    self.status
                ),
            });
        }
        if target == AdvanceStatus::Pending {
            return Err(EngineError::InvalidState {
                message: "a salary advance cannot be moved back to PENDING".to_string(),
            });
        }
        self.status = target;
        Ok(())
    }
}
