//! Deductions ledger construction.
//!
//! Contributions are taken from gross first and reduce the taxable income;
//! the tax brackets are then evaluated in table order against what remains.
//!
//! Two rules are reproduced as the payroll office applies them:
//!
//! - the flat contribution is charged at the capped contribution's rate; its
//!   own declared rate is only printed on the line;
//! - a bracket does not tax the income falling inside it. Once taxable income
//!   exceeds the bracket floor, the bracket contributes
//!   `bracket_amount × rate / 100`, capped at its ceiling.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::{CappedContributionRate, RateCatalog, TaxBracket};
use crate::models::SalaryDeduction;

/// The deductions ledger and the totals derived from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionLedger {
    /// Ledger lines in fixed order.
    pub lines: Vec<SalaryDeduction>,
    /// Gross salary less both contributions.
    pub taxable_income: Decimal,
    /// Sum of the applied bracket amounts.
    pub total_tax_deduction: Decimal,
    /// Sum of every non-null line amount.
    pub sum_deductions: Decimal,
}

/// `min(ceiling, gross × rate / 100)`.
pub fn capped_contribution(gross: Decimal, rate: &CappedContributionRate) -> Decimal {
    let contribution = gross * rate.contribution_rate_percent / Decimal::ONE_HUNDRED;
    contribution.min(rate.ceiling())
}

/// `gross × capped rate / 100`.
pub fn flat_contribution(gross: Decimal, capped: &CappedContributionRate) -> Decimal {
    gross * capped.contribution_rate_percent / Decimal::ONE_HUNDRED
}

/// The amount a bracket contributes, or `None` if income does not exceed its floor.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::bracket_amount;
/// use payroll_engine::config::TaxBracket;
/// use rust_decimal::Decimal;
///
/// let bracket = TaxBracket {
///     id: None,
///     min_income: Some(Decimal::new(350_000, 0)),
///     max_income: Some(Decimal::new(400_000, 0)),
///     rate_percent: Decimal::new(5, 0),
///     bracket_amount: Decimal::new(50_000, 0),
/// };
///
/// assert_eq!(bracket_amount(&bracket, Decimal::new(360_000, 0)), Some(Decimal::new(2_500, 0)));
/// assert_eq!(bracket_amount(&bracket, Decimal::new(350_000, 0)), None);
/// ```
pub fn bracket_amount(bracket: &TaxBracket, taxable_income: Decimal) -> Option<Decimal> {
    let floor = bracket.min_income.unwrap_or(Decimal::ZERO);
    if taxable_income <= floor {
        return None;
    }

    let amount = bracket.bracket_amount * bracket.rate_percent / Decimal::ONE_HUNDRED;
    Some(match bracket.max_income {
        Some(ceiling) => amount.min(ceiling),
        None => amount,
    })
}

fn bracket_designation(bracket: &TaxBracket) -> String {
    match (bracket.min_income, bracket.max_income) {
        (None, Some(max)) => format!("Tax bracket up to {}", max.normalize()),
        (Some(min), None) => format!("Tax bracket above {}", min.normalize()),
        (Some(min), Some(max)) => {
            format!("Tax bracket {} to {}", min.normalize(), max.normalize())
        }
        (None, None) => "Tax bracket".to_string(),
    }
}

/// Builds the deductions ledger for a gross salary.
pub fn build_deductions(gross: Decimal, catalog: &RateCatalog) -> DeductionLedger {
    let capped = catalog.capped_contribution();
    let flat = catalog.flat_contribution();
    let mut lines = Vec::with_capacity(2 + catalog.tax_brackets().len());
    let mut taxable_income = gross;

    let capped_amount = capped_contribution(gross, capped);
    taxable_income -= capped_amount;
    lines.push(SalaryDeduction {
        designation: format!(
            "Capped contribution {}%",
            capped.contribution_rate_percent.normalize()
        ),
        rate_percent: Some(capped.contribution_rate_percent),
        amount: Some(capped_amount),
    });

    let flat_amount = flat_contribution(gross, capped);
    taxable_income -= flat_amount;
    lines.push(SalaryDeduction {
        designation: format!(
            "Flat contribution {}%",
            flat.contribution_rate_percent.normalize()
        ),
        rate_percent: Some(flat.contribution_rate_percent),
        amount: Some(flat_amount),
    });

    let mut total_tax_deduction = Decimal::ZERO;
    for bracket in catalog.tax_brackets() {
        let amount = bracket_amount(bracket, taxable_income);
        if let Some(a) = amount {
            total_tax_deduction += a;
        }
        lines.push(SalaryDeduction {
            designation: bracket_designation(bracket),
            rate_percent: Some(bracket.rate_percent),
            amount,
        });
    }

    let sum_deductions = lines.iter().filter_map(|l| l.amount).sum();

    DeductionLedger {
        lines,
        taxable_income,
        total_tax_deduction,
        sum_deductions,
    }
}
