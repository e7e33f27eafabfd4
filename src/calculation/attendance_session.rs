//! Attendance session rules.
//!
//! This module derives the values recorded on a time entry: lateness at
//! check-in, and at check-out the automatic break, the hours worked and the
//! overtime beyond the standard workday.

use chrono::{NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::AttendanceConfig;
use crate::error::{EngineError, EngineResult};

/// Values recorded on an entry when its session is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClose {
    /// Minutes between check-in and check-out.
    pub total_minutes: i64,
    /// Automatic break deducted from the session.
    pub break_minutes: u32,
    /// (total minutes - break minutes) / 60.
    pub hours_worked: Decimal,
    /// max(0, hours worked - standard workday hours).
    pub overtime_hours: Decimal,
}

/// Minutes between the configured workday start and the check-in time of day.
///
/// A check-in at or before the start is never late.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::late_minutes;
/// use chrono::{NaiveDate, NaiveTime};
///
/// let start = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
/// let check_in = NaiveDate::from_ymd_opt(2025, 3, 3)
///     .unwrap()
///     .and_hms_opt(9, 45, 0)
///     .unwrap();
/// assert_eq!(late_minutes(check_in, start), 45);
/// ```
pub fn late_minutes(check_in: NaiveDateTime, workday_start: NaiveTime) -> u32 {
    let time_of_day = check_in.time();
    if time_of_day > workday_start {
        let late = (time_of_day - workday_start).num_minutes();
        u32::try_from(late).unwrap_or(u32::MAX)
    } else {
        0
    }
}

/// Computes break, hours worked and overtime for a session.
///
/// The configured break applies only when the session is strictly longer
/// than the break threshold.
///
/// # Errors
///
/// Returns `Validation` when `check_out` precedes `check_in`, or when the
/// rules fail [`AttendanceConfig::validate`].
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::close_session;
/// use payroll_engine::config::AttendanceConfig;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let day = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
/// let closed = close_session(
///     day.and_hms_opt(8, 0, 0).unwrap(),
///     day.and_hms_opt(19, 0, 0).unwrap(),
///     &AttendanceConfig::default(),
/// )
/// .unwrap();
///
/// assert_eq!(closed.break_minutes, 60);
/// assert_eq!(closed.hours_worked, Decimal::new(10, 0));
/// assert_eq!(closed.overtime_hours, Decimal::new(2, 0));
/// ```
pub fn close_session(
    check_in: NaiveDateTime,
    check_out: NaiveDateTime,
    config: &AttendanceConfig,
) -> EngineResult<SessionClose> {
    config.validate()?;

    if check_out < check_in {
        return Err(EngineError::validation(
            "check_out",
            format!("check-out {} precedes check-in {}", check_out, check_in),
        ));
    }

    let total_minutes = (check_out - check_in).num_minutes();

    let break_minutes = if total_minutes > config.break_threshold_minutes() {
        config.break_minutes
    } else {
        0
    };

    let worked_minutes = total_minutes - i64::from(break_minutes);
    let hours_worked = Decimal::from(worked_minutes) / Decimal::from(60);

    let overtime_hours = if hours_worked > config.workday_hours {
        hours_worked - config.workday_hours
    } else {
        Decimal::ZERO
    };

    Ok(SessionClose {
        total_minutes,
        break_minutes,
        hours_worked,
        overtime_hours,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn at(time: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("2025-03-03 {}", time), "%Y-%m-%d %H:%M:%S")
            .unwrap()
    }

    fn nine() -> NaiveTime {
        NaiveTime::from_hms_opt(9, 0, 0).unwrap()
    }

    #[test]
    fn test_check_in_45_minutes_late() {
        assert_eq!(late_minutes(at("09:45:00"), nine()), 45);
    }

    #[test]
    fn test_check_in_before_start_is_not_late() {
        assert_eq!(late_minutes(at("08:10:00"), nine()), 0);
    }

    #[test]
    fn test_check_in_exactly_at_start_is_not_late() {
        assert_eq!(late_minutes(at("09:00:00"), nine()), 0);
    }

    #[test]
    fn test_partial_minutes_are_truncated() {
        assert_eq!(late_minutes(at("09:05:59"), nine()), 5);
    }

    // 08:00 -> 17:00 is 540 minutes, above the 360 minute threshold.
    #[test]
    fn test_full_day_gets_break_and_no_overtime() {
        let closed = close_session(at("08:00:00"), at("17:00:00"), &AttendanceConfig::default())
            .unwrap();

        assert_eq!(closed.total_minutes, 540);
        assert_eq!(closed.break_minutes, 60);
        assert_eq!(closed.hours_worked, dec("8"));
        assert_eq!(closed.overtime_hours, Decimal::ZERO);
    }

    #[test]
    fn test_long_day_yields_two_hours_overtime() {
        let closed = close_session(at("08:00:00"), at("19:00:00"), &AttendanceConfig::default())
            .unwrap();

        assert_eq!(closed.total_minutes, 660);
        assert_eq!(closed.hours_worked, dec("10"));
        assert_eq!(closed.overtime_hours, dec("2"));
    }

    #[test]
    fn test_session_at_threshold_gets_no_break() {
        let closed = close_session(at("08:00:00"), at("14:00:00"), &AttendanceConfig::default())
            .unwrap();

        assert_eq!(closed.total_minutes, 360);
        assert_eq!(closed.break_minutes, 0);
        assert_eq!(closed.hours_worked, dec("6"));
    }

    #[test]
    fn test_one_minute_over_threshold_gets_break() {
        let closed = close_session(at("08:00:00"), at("14:01:00"), &AttendanceConfig::default())
            .unwrap();

        assert_eq!(closed.break_minutes, 60);
        assert_eq!(closed.hours_worked, dec("301") / dec("60"));
    }

    #[test]
    fn test_break_longer_than_threshold_rejected() {
        let config = AttendanceConfig {
            break_threshold_hours: 0,
            break_minutes: 60,
            ..AttendanceConfig::default()
        };

        let result = close_session(at("09:00:00"), at("09:30:00"), &config);
        match result {
            Err(EngineError::Validation { field, .. }) => assert_eq!(field, "break_minutes"),
            other => panic!("Expected Validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_custom_rules() {
        let config = AttendanceConfig {
            workday_start: nine(),
            workday_hours: dec("7.5"),
            break_threshold_hours: 4,
            break_minutes: 30,
        };

        let closed = close_session(at("09:00:00"), at("18:00:00"), &config).unwrap();

        assert_eq!(closed.break_minutes, 30);
        assert_eq!(closed.hours_worked, dec("8.5"));
        assert_eq!(closed.overtime_hours, dec("1.0"));
    }

    #[test]
    fn test_zero_length_session() {
        let closed = close_session(at("09:00:00"), at("09:00:00"), &AttendanceConfig::default())
            .unwrap();

        assert_eq!(closed.hours_worked, Decimal::ZERO);
        assert_eq!(closed.overtime_hours, Decimal::ZERO);
    }

    #[test]
    fn test_check_out_before_check_in_is_rejected() {
        let result = close_session(at("17:00:00"), at("08:00:00"), &AttendanceConfig::default());

        match result {
            Err(EngineError::Validation { field, .. }) => assert_eq!(field, "check_out"),
            other => panic!("Expected Validation error, got {:?}", other),
        }
    }
}
