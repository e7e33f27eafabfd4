//! Pay stub models.
//!
//! This module contains the [`PayStub`] type and the two ordered ledgers it
//! carries: [`SalaryComponent`] earnings and [`SalaryDeduction`] deductions.
//! Ledger lines with no amount are informational and never count towards a
//! total.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{EmployeeId, YearMonth};

/// One line of the earnings ledger.
///
/// # Example
///
/// ```
/// use payroll_engine::models::SalaryComponent;
///
/// let line = SalaryComponent::placeholder("Night shift premium");
/// assert!(line.amount.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryComponent {
    /// Label printed on the stub.
    pub designation: String,
    /// Quantity label (e.g. "1 month", "3 hours").
    pub quantity_label: Option<String>,
    /// Rate per unit of quantity.
    pub unit_rate: Option<Decimal>,
    /// Amount earned. `None` marks an informational line.
    pub amount: Option<Decimal>,
}

impl SalaryComponent {
    /// An informational line with only a designation.
    pub fn placeholder(designation: impl Into<String>) -> Self {
        Self {
            designation: designation.into(),
            quantity_label: None,
            unit_rate: None,
            amount: None,
        }
    }

    /// An informational line that shows a unit rate but carries no amount.
    pub fn rated_placeholder(designation: impl Into<String>, unit_rate: Decimal) -> Self {
        Self {
            designation: designation.into(),
            quantity_label: None,
            unit_rate: Some(unit_rate),
            amount: None,
        }
    }
}

/// One line of the deductions ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryDeduction {
    /// Label printed on the stub.
    pub designation: String,
    /// The percentage shown next to the line.
    pub rate_percent: Option<Decimal>,
    /// Amount withheld. `None` marks a bracket that did not apply.
    pub amount: Option<Decimal>,
}

/// Identity of a pay stub: one employee, one month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PayStubKey {
    /// The employee.
    pub employee_id: EmployeeId,
    /// The pay month.
    pub month: YearMonth,
}

/// The computed monthly compensation record for one employee.
///
/// A pay stub is a snapshot: employee fields are copied at generation time
/// and the record is never recomputed in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayStub {
    /// Unique identifier of this generation.
    pub id: Uuid,
    /// When the stub was generated.
    pub generated_at: DateTime<Utc>,
    /// The employee the stub is for.
    pub employee_id: EmployeeId,
    /// The pay month.
    pub month: YearMonth,
    /// Pay date (last day of the month).
    pub pay_date: NaiveDate,

    /// Employee name at generation time.
    pub employee_name: String,
    /// Employee number at generation time.
    pub employee_number: String,
    /// Job title at generation time.
    pub job_title: String,
    /// Statutory registration at generation time.
    pub statutory_id: Option<String>,
    /// Hire date.
    pub hire_date: NaiveDate,
    /// Seniority at the pay date, e.g. "5 years, 2 months, 3 days".
    pub seniority: String,
    /// Single-letter classification derived from the job title.
    pub classification: String,

    /// Monthly base salary.
    pub base_salary: Decimal,
    /// base salary / 30.
    pub day_rate: Decimal,
    /// base salary / 173.33.
    pub hour_rate: Decimal,
    /// hour rate / 1.334.
    pub salary_index: Decimal,

    /// Ordered earnings ledger.
    pub earnings: Vec<SalaryComponent>,
    /// Sum of the non-null earning amounts.
    pub gross_salary: Decimal,
    /// Ordered deductions ledger.
    pub deductions: Vec<SalaryDeduction>,
    /// Sum of the non-null deduction amounts.
    pub sum_deductions: Decimal,
    /// gross salary - sum of deductions.
    pub net_salary: Decimal,
    /// Gross salary less both social contributions.
    pub taxable_income: Decimal,
    /// Sum of the applied tax bracket amounts.
    pub total_tax_deduction: Decimal,

    /// How the net salary is paid.
    pub paying_method: String,
    /// Deterministic path of the printable document.
    pub document_path: String,
}

impl PayStub {
    /// The (employee, month) identity of this stub.
    pub fn key(&self) -> PayStubKey {
        PayStubKey {
            employee_id: self.employee_id,
            month: self.month,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_has_no_amount_or_rate() {
        let line = SalaryComponent::placeholder("Performance bonus");
        assert_eq!(line.designation, "Performance bonus");
        assert!(line.quantity_label.is_none());
        assert!(line.unit_rate.is_none());
        assert!(line.amount.is_none());
    }

    #[test]
    fn test_rated_placeholder_keeps_rate_only() {
        let line = SalaryComponent::rated_placeholder("Notice entitlement", Decimal::new(100_000, 0));
        assert_eq!(line.unit_rate, Some(Decimal::new(100_000, 0)));
        assert!(line.amount.is_none());
    }

    #[test]
    fn test_component_serializes_null_amount() {
        let line = SalaryComponent::placeholder("Night shift premium");
        let json = serde_json::to_value(&line).unwrap();
        assert!(json["amount"].is_null());
    }
}
