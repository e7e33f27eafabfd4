//! Seniority between hire date and pay date.

use chrono::{Datelike, Months, NaiveDate};

/// Whole years, months and days of service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Seniority {
    /// Completed years.
    pub years: u32,
    /// Completed months beyond the years.
    pub months: u32,
    /// Remaining days.
    pub days: u32,
}

impl std::fmt::Display for Seniority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} years, {} months, {} days",
            self.years, self.months, self.days
        )
    }
}

/// Calendar period from `hire_date` to `on`.
///
/// Months are counted first; the remaining days are measured from the hire
/// date advanced by those months. A date before the hire date gives zero.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::seniority;
/// use chrono::NaiveDate;
///
/// let hired = NaiveDate::from_ymd_opt(2020, 1, 15).unwrap();
/// let paid = NaiveDate::from_ymd_opt(2025, 3, 31).unwrap();
/// assert_eq!(seniority(hired, paid).to_string(), "5 years, 2 months, 16 days");
/// ```
pub fn seniority(hire_date: NaiveDate, on: NaiveDate) -> Seniority {
    let zero = Seniority {
        years: 0,
        months: 0,
        days: 0,
    };
    if on <= hire_date {
        return zero;
    }

    let month_index = |d: NaiveDate| d.year() * 12 + d.month0() as i32;
    let mut total_months = month_index(on) - month_index(hire_date);
    if on.day() < hire_date.day() {
        total_months -= 1;
    }
    let total_months = u32::try_from(total_months).unwrap_or(0);

    let anchor = match hire_date.checked_add_months(Months::new(total_months)) {
        Some(anchor) => anchor,
        None => return zero,
    };
    let days = u32::try_from((on - anchor).num_days()).unwrap_or(0);

    Seniority {
        years: total_months / 12,
        months: total_months % 12,
        days,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_exact_years() {
        let s = seniority(date(2020, 3, 31), date(2025, 3, 31));
        assert_eq!(s.to_string(), "5 years, 0 months, 0 days");
    }

    #[test]
    fn test_days_borrowed_from_previous_month() {
        let s = seniority(date(2024, 1, 20), date(2024, 3, 10));
        // Jan 20 + 1 month = Feb 20, then 19 days to Mar 10 (2024 is leap)
        assert_eq!((s.years, s.months, s.days), (0, 1, 19));
    }

    #[test]
    fn test_hired_at_end_of_month() {
        let s = seniority(date(2024, 1, 31), date(2024, 2, 29));
        // Jan 31 + 0 months, 29 days
        assert_eq!((s.years, s.months, s.days), (0, 0, 29));
    }

    #[test]
    fn test_same_day_is_zero() {
        let s = seniority(date(2025, 3, 31), date(2025, 3, 31));
        assert_eq!(s.to_string(), "0 years, 0 months, 0 days");
    }

    #[test]
    fn test_future_hire_is_zero() {
        let s = seniority(date(2026, 1, 1), date(2025, 3, 31));
        assert_eq!((s.years, s.months, s.days), (0, 0, 0));
    }
}
