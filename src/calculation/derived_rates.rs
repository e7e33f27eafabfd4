//! Day rate, hour rate and salary index derived from a monthly base salary.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Paid days per month used to derive the day rate.
pub const DAYS_PER_MONTH: Decimal = Decimal::from_parts(30, 0, 0, false, 0);

/// Paid hours per month used to derive the hour rate (173.33).
pub const HOURS_PER_MONTH: Decimal = Decimal::from_parts(17333, 0, 0, false, 2);

/// Divisor turning the hour rate into the salary index (1.334).
pub const SALARY_INDEX_DIVISOR: Decimal = Decimal::from_parts(1334, 0, 0, false, 3);

/// Rates derived from a monthly base salary. Values are unrounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedRates {
    /// base salary / 30.
    pub day_rate: Decimal,
    /// base salary / 173.33.
    pub hour_rate: Decimal,
    /// hour rate / 1.334.
    pub salary_index: Decimal,
}

/// Derives the day rate, hour rate and salary index.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::derive_rates;
/// use rust_decimal::Decimal;
///
/// let rates = derive_rates(Decimal::new(3_000_000, 0));
/// assert_eq!(rates.day_rate, Decimal::new(100_000, 0));
/// assert_eq!(rates.hour_rate.round_dp(2), Decimal::new(1_730_803, 2));
/// ```
pub fn derive_rates(base_salary: Decimal) -> DerivedRates {
    let hour_rate = base_salary / HOURS_PER_MONTH;
    DerivedRates {
        day_rate: base_salary / DAYS_PER_MONTH,
        hour_rate,
        salary_index: hour_rate / SALARY_INDEX_DIVISOR,
    }
}
