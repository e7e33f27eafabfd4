//! Earnings ledger construction.
//!
//! The ledger has a fixed line order. Informational lines carry no amount and
//! are kept so the printed stub always shows the same rows.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::config::OvertimeBand;
use crate::models::SalaryComponent;

use super::derived_rates::DerivedRates;
use super::overtime_bands::overtime_lines;

/// Inputs of the earnings ledger for one employee-month.
#[derive(Debug, Clone, Copy)]
pub struct EarningsInput<'a> {
    /// Pay date printed on the base salary line.
    pub pay_date: NaiveDate,
    /// Monthly base salary.
    pub base_salary: Decimal,
    /// Rates derived from the base salary.
    pub rates: DerivedRates,
    /// Aggregated overtime hours for the month.
    pub overtime_hours: Decimal,
    /// Sum of the month's bonus records.
    pub bonus_total: Decimal,
    /// Overtime bands in evaluation order.
    pub bands: &'a [OvertimeBand],
}

/// Builds the earnings ledger in its fixed order.
pub fn build_earnings(input: &EarningsInput<'_>) -> Vec<SalaryComponent> {
    let day_rate = input.rates.day_rate;
    let mut lines = Vec::with_capacity(12 + input.bands.len());

    lines.push(SalaryComponent {
        designation: format!("Salary for {}", input.pay_date),
        quantity_label: Some("1 month".to_string()),
        unit_rate: Some(day_rate),
        amount: Some(input.base_salary),
    });
    lines.push(SalaryComponent::rated_placeholder("Deductible absence", day_rate));
    lines.push(SalaryComponent::placeholder("Performance bonus"));
    lines.push(SalaryComponent::placeholder("Seniority bonus"));

    lines.extend(overtime_lines(
        input.bands,
        input.overtime_hours,
        input.rates.hour_rate,
    ));

    lines.push(SalaryComponent::placeholder("Night shift premium"));
    lines.push(SalaryComponent {
        designation: "Miscellaneous bonuses".to_string(),
        quantity_label: None,
        unit_rate: None,
        amount: Some(input.bonus_total),
    });
    lines.push(SalaryComponent::placeholder("Prior period adjustment"));
    lines.push(SalaryComponent::rated_placeholder("Leave entitlement", day_rate));
    lines.push(SalaryComponent::rated_placeholder("Notice entitlement", day_rate));
    lines.push(SalaryComponent::rated_placeholder("Severance entitlement", day_rate));

    lines
}

/// Sums the non-null amounts of an earnings ledger.
pub fn sum_earnings(lines: &[SalaryComponent]) -> Decimal {
    lines.iter().filter_map(|l| l.amount).sum()
}
