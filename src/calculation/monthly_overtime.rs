//! Monthly overtime aggregation.

use rust_decimal::Decimal;

use crate::models::{EmployeeId, TimeEntry, YearMonth};

/// Sums an employee's overtime hours over a calendar month.
///
/// Entries of other employees or dated outside `month` are ignored, and an
/// entry with no overtime recorded (an open session) counts as zero.
pub fn aggregate_monthly_overtime(
    entries: &[TimeEntry],
    employee_id: EmployeeId,
    month: YearMonth,
) -> Decimal {
    entries
        .iter()
        .filter(|e| e.employee_id == employee_id && month.contains(e.date))
        .map(|e| e.overtime_hours.unwrap_or(Decimal::ZERO))
        .sum()
}
