//! Calculation logic for the payroll engine.
//!
//! This module contains the pure computations behind attendance and payroll:
//! session lateness, breaks and overtime; monthly overtime aggregation; the
//! rates derived from a base salary; overtime band attribution; the earnings
//! and deductions ledgers; seniority; and the assembly of a complete pay stub.

mod attendance_session;
mod deductions;
mod derived_rates;
mod earnings;
mod monthly_overtime;
mod overtime_bands;
mod pay_stub;
mod seniority;

pub use attendance_session::{SessionClose, close_session, late_minutes};
pub use deductions::{
    DeductionLedger, bracket_amount, build_deductions, capped_contribution, flat_contribution,
};
pub use derived_rates::{
    DAYS_PER_MONTH, DerivedRates, HOURS_PER_MONTH, SALARY_INDEX_DIVISOR, derive_rates,
};
pub use earnings::{EarningsInput, build_earnings, sum_earnings};
pub use monthly_overtime::aggregate_monthly_overtime;
pub use overtime_bands::{BandAttribution, attribute_band, overtime_lines, round2};
pub use pay_stub::{PAYING_METHOD, PayStubInput, compute_pay_stub, document_path};
pub use seniority::{Seniority, seniority};
