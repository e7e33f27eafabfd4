//! Employee model.
//!
//! The employee record itself is owned by an external directory; the engine
//! only consumes the fields listed here.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Identifier of an employee in the external directory.
pub type EmployeeId = u64;

/// Represents an employee whose attendance and pay are computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: EmployeeId,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// The payroll/personnel number printed on pay stubs.
    pub employee_number: String,
    /// Current job title.
    pub job_title: String,
    /// Statutory social-security registration, when known.
    #[serde(default)]
    pub statutory_id: Option<String>,
    /// The date the employee was hired.
    pub hire_date: NaiveDate,
    /// Monthly base salary. Must be strictly positive.
    pub base_salary: Decimal,
}

impl Employee {
    /// Returns "first last".
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::Employee;
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    ///
    /// let employee = Employee {
    ///     id: 1,
    ///     first_name: "Hery".to_string(),
    ///     last_name: "Rakoto".to_string(),
    ///     employee_number: "EMP-001".to_string(),
    ///     job_title: "Accountant".to_string(),
    ///     statutory_id: None,
    ///     hire_date: NaiveDate::from_ymd_opt(2020, 1, 6).unwrap(),
    ///     base_salary: Decimal::new(3_000_000, 0),
    /// };
    /// assert_eq!(employee.full_name(), "Hery Rakoto");
    /// ```
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// The single-letter classification shown on pay stubs: the first
    /// character of the job title.
    pub fn classification(&self) -> String {
        self.job_title.chars().next().map(String::from).unwrap_or_default()
    }
}
