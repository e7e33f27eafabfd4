//! Pay stub computation.
//!
//! This module assembles a complete [`PayStub`] from an employee snapshot,
//! the month's aggregated overtime and bonuses, and a rate catalog. It is
//! pure apart from drawing a fresh identifier and timestamp; persistence and
//! rendering belong to [`crate::service::PayrollEngine`].

use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::config::RateCatalog;
use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, PayStub, YearMonth};

use super::deductions::build_deductions;
use super::derived_rates::derive_rates;
use super::earnings::{EarningsInput, build_earnings, sum_earnings};
use super::seniority::seniority;

/// How net salaries are paid out.
pub const PAYING_METHOD: &str = "Bank transfer / Cheque";

/// Everything needed to compute one employee-month.
#[derive(Debug, Clone, Copy)]
pub struct PayStubInput<'a> {
    /// The employee snapshot.
    pub employee: &'a Employee,
    /// The pay month.
    pub month: YearMonth,
    /// Aggregated overtime hours for the month.
    pub overtime_hours: Decimal,
    /// Sum of the month's bonus records.
    pub bonus_total: Decimal,
    /// Rate catalog snapshot.
    pub catalog: &'a RateCatalog,
}

/// Deterministic path of the printable pay stub document.
///
/// Characters of the employee number other than ASCII letters, digits, `-`
/// and `_` become `_`, so the path always stays below `documents/paystubs`.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::document_path;
/// use payroll_engine::models::YearMonth;
///
/// let month = YearMonth::new(2025, 3).unwrap();
/// assert_eq!(document_path("EMP-042", month), "documents/paystubs/EMP-042_2025-03.pdf");
/// assert_eq!(document_path("../etc/x", month), "documents/paystubs/___etc_x_2025-03.pdf");
/// ```
pub fn document_path(employee_number: &str, month: YearMonth) -> String {
    let file_stem: String = employee_number
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("documents/paystubs/{}_{}.pdf", file_stem, month)
}

/// Computes a pay stub.
///
/// # Errors
///
/// Returns `Validation` when the employee's base salary is not positive.
pub fn compute_pay_stub(input: &PayStubInput<'_>) -> EngineResult<PayStub> {
    let employee = input.employee;
    if employee.base_salary <= Decimal::ZERO {
        return Err(EngineError::validation(
            "base_salary",
            format!(
                "base salary must be positive for employee {}, got {}",
                employee.id, employee.base_salary
            ),
        ));
    }

    let pay_date = input.month.last_day();
    let rates = derive_rates(employee.base_salary);

    let earnings = build_earnings(&EarningsInput {
        pay_date,
        base_salary: employee.base_salary,
        rates,
        overtime_hours: input.overtime_hours,
        bonus_total: input.bonus_total,
        bands: input.catalog.overtime_bands(),
    });
    let gross_salary = sum_earnings(&earnings);

    let ledger = build_deductions(gross_salary, input.catalog);
    let net_salary = gross_salary - ledger.sum_deductions;

    Ok(PayStub {
        id: Uuid::new_v4(),
        generated_at: Utc::now(),
        employee_id: employee.id,
        month: input.month,
        pay_date,
        employee_name: employee.full_name(),
        employee_number: employee.employee_number.clone(),
        job_title: employee.job_title.clone(),
        statutory_id: employee.statutory_id.clone(),
        hire_date: employee.hire_date,
        seniority: seniority(employee.hire_date, pay_date).to_string(),
        classification: employee.classification(),
        base_salary: employee.base_salary,
        day_rate: rates.day_rate,
        hour_rate: rates.hour_rate,
        salary_index: rates.salary_index,
        earnings,
        gross_salary,
        deductions: ledger.lines,
        sum_deductions: ledger.sum_deductions,
        net_salary,
        taxable_income: ledger.taxable_income,
        total_tax_deduction: ledger.total_tax_deduction,
        paying_method: PAYING_METHOD.to_string(),
        document_path: document_path(&employee.employee_number, input.month),
    })
}
