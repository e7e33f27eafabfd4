//! Configuration types for attendance and payroll.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files: the attendance rules and
//! the statutory rate catalog.

use chrono::NaiveTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Attendance rules applied at check-in and check-out.
///
/// The value is passed explicitly to every clock operation; nothing in the
/// engine holds it as global state.
///
/// # Example
///
/// ```
/// use payroll_engine::config::AttendanceConfig;
/// use chrono::NaiveTime;
/// use rust_decimal::Decimal;
///
/// let config = AttendanceConfig::default();
/// assert_eq!(config.workday_start, NaiveTime::from_hms_opt(9, 0, 0).unwrap());
/// assert_eq!(config.workday_hours, Decimal::new(8, 0));
/// assert_eq!(config.break_threshold_minutes(), 360);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceConfig {
    /// Time of day after which a check-in counts as late.
    pub workday_start: NaiveTime,
    /// Standard hours per day; anything beyond is overtime.
    pub workday_hours: Decimal,
    /// A session longer than this many hours gets the automatic break.
    pub break_threshold_hours: u32,
    /// Length of the automatic break in minutes.
    pub break_minutes: u32,
}

impl AttendanceConfig {
    /// The break threshold expressed in minutes.
    pub fn break_threshold_minutes(&self) -> i64 {
        i64::from(self.break_threshold_hours) * 60
    }

    /// Checks that the rules can only produce non-negative hours.
    ///
    /// The automatic break must fit inside the threshold that triggers it,
    /// and the standard workday must not be negative.
    ///
    /// # Errors
    ///
    /// Returns `Validation` naming the offending field.
    pub fn validate(&self) -> EngineResult<()> {
        if i64::from(self.break_minutes) > self.break_threshold_minutes() {
            return Err(EngineError::validation(
                "break_minutes",
                format!(
                    "break of {} minutes exceeds the {} hour threshold that triggers it",
                    self.break_minutes, self.break_threshold_hours
                ),
            ));
        }
        if self.workday_hours < Decimal::ZERO {
            return Err(EngineError::validation(
                "workday_hours",
                format!("workday hours {} must not be negative", self.workday_hours),
            ));
        }
        Ok(())
    }
}

impl Default for AttendanceConfig {
    fn default() -> Self {
        Self {
            workday_start: NaiveTime::from_hms_opt(9, 0, 0).unwrap_or(NaiveTime::MIN),
            workday_hours: Decimal::new(8, 0),
            break_threshold_hours: 6,
            break_minutes: 60,
        }
    }
}

/// Social contribution bounded by a ceiling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CappedContributionRate {
    /// Base amount the ceiling is derived from.
    pub base_amount: Decimal,
    /// Ceiling multiplier, in percent.
    pub ceiling_rate_percent: Decimal,
    /// Contribution rate applied to gross, in percent.
    pub contribution_rate_percent: Decimal,
}

impl CappedContributionRate {
    /// The maximum contribution: `base × ceiling rate × contribution rate / 100`.
    ///
    /// The contribution rate is applied on top of the ceiling rate. This
    /// matches the rates the payroll office publishes and is kept as is.
    pub fn ceiling(&self) -> Decimal {
        self.base_amount * self.ceiling_rate_percent * self.contribution_rate_percent
            / Decimal::ONE_HUNDRED
    }
}

/// Social contribution applied to gross without a ceiling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatContributionRate {
    /// Declared contribution rate, in percent.
    pub contribution_rate_percent: Decimal,
}

/// One row of the progressive tax table.
///
/// `min_income` defaults to zero and `max_income` to unbounded. The amount a
/// bracket contributes is derived from `bracket_amount`, not from the income
/// that actually falls within the bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    /// Catalog identifier, assigned by the rate catalog store.
    #[serde(default)]
    pub id: Option<u64>,
    /// Lower income bound (exclusive).
    #[serde(default)]
    pub min_income: Option<Decimal>,
    /// Upper income bound, also the cap on the bracket's amount.
    #[serde(default)]
    pub max_income: Option<Decimal>,
    /// Tax rate in percent.
    pub rate_percent: Decimal,
    /// Configured basis the rate is applied to.
    pub bracket_amount: Decimal,
}

/// An overtime hour range with its pay premium.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeBand {
    /// Hours already covered by earlier bands.
    pub min_hours: Decimal,
    /// Upper bound of the band.
    pub max_hours: Decimal,
    /// Premium over the hour rate, in percent.
    pub premium_rate_percent: Decimal,
}

/// contributions.yaml file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct ContributionsConfig {
    /// The capped contribution singleton.
    pub capped_contribution: CappedContributionRate,
    /// The flat contribution singleton.
    pub flat_contribution: FlatContributionRate,
}

/// tax_brackets.yaml file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct TaxBracketsConfig {
    /// Brackets in table order.
    pub tax_brackets: Vec<TaxBracket>,
}

/// overtime_bands.yaml file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct OvertimeBandsConfig {
    /// Overtime bands.
    pub overtime_bands: Vec<OvertimeBand>,
}

/// A read-only snapshot of the statutory rate tables.
///
/// Overtime bands are kept ordered by ascending premium rate (stable for
/// equal rates); tax brackets keep their table order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateCatalog {
    capped_contribution: CappedContributionRate,
    flat_contribution: FlatContributionRate,
    tax_brackets: Vec<TaxBracket>,
    overtime_bands: Vec<OvertimeBand>,
}

impl RateCatalog {
    /// Creates a new RateCatalog from its component parts.
    pub fn new(
        capped_contribution: CappedContributionRate,
        flat_contribution: FlatContributionRate,
        tax_brackets: Vec<TaxBracket>,
        overtime_bands: Vec<OvertimeBand>,
    ) -> Self {
        let mut sorted_bands = overtime_bands;
        sorted_bands.sort_by(|a, b| a.premium_rate_percent.cmp(&b.premium_rate_percent));
        Self {
            capped_contribution,
            flat_contribution,
            tax_brackets,
            overtime_bands: sorted_bands,
        }
    }

    /// Returns the capped contribution rate.
    pub fn capped_contribution(&self) -> &CappedContributionRate {
        &self.capped_contribution
    }

    /// Returns the flat contribution rate.
    pub fn flat_contribution(&self) -> &FlatContributionRate {
        &self.flat_contribution
    }

    /// Returns the tax brackets in table order.
    pub fn tax_brackets(&self) -> &[TaxBracket] {
        &self.tax_brackets
    }

    /// Returns the overtime bands in evaluation order.
    pub fn overtime_bands(&self) -> &[OvertimeBand] {
        &self.overtime_bands
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn band(min: &str, max: &str, premium: &str) -> OvertimeBand {
        OvertimeBand {
            min_hours: dec(min),
            max_hours: dec(max),
            premium_rate_percent: dec(premium),
        }
    }

    #[test]
    fn test_ceiling_applies_contribution_rate_twice_over_base() {
        let rate = CappedContributionRate {
            base_amount: dec("262680"),
            ceiling_rate_percent: dec("8"),
            contribution_rate_percent: dec("1"),
        };
        // 262680 * 8 * 1 / 100
        assert_eq!(rate.ceiling(), dec("21014.4"));
    }

    #[test]
    fn test_catalog_orders_bands_by_premium() {
        let catalog = RateCatalog::new(
            CappedContributionRate {
                base_amount: dec("1"),
                ceiling_rate_percent: dec("1"),
                contribution_rate_percent: dec("1"),
            },
            FlatContributionRate {
                contribution_rate_percent: dec("1"),
            },
            vec![],
            vec![band("8", "20", "50"), band("0", "8", "30")],
        );

        let premiums: Vec<Decimal> = catalog
            .overtime_bands()
            .iter()
            .map(|b| b.premium_rate_percent)
            .collect();
        assert_eq!(premiums, vec![dec("30"), dec("50")]);
    }

    #[test]
    fn test_attendance_config_rejects_break_longer_than_threshold() {
        let config = AttendanceConfig {
            break_threshold_hours: 0,
            break_minutes: 60,
            ..AttendanceConfig::default()
        };

        match config.validate() {
            Err(EngineError::Validation { field, .. }) => assert_eq!(field, "break_minutes"),
            other => panic!("Expected Validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_attendance_config_rejects_negative_workday() {
        let config = AttendanceConfig {
            workday_hours: dec("-1"),
            ..AttendanceConfig::default()
        };

        assert!(matches!(
            config.validate(),
            Err(EngineError::Validation { .. })
        ));
        assert!(AttendanceConfig::default().validate().is_ok());
    }

    #[test]
    fn test_default_attendance_config() {
        let config = AttendanceConfig::default();
        assert_eq!(config.break_minutes, 60);
        assert_eq!(config.break_threshold_hours, 6);
    }

    #[test]
    fn test_deserialize_open_ended_bracket() {
        let yaml = "min_income: \"600000\"\nrate_percent: \"20\"\nbracket_amount: \"400000\"\n";
        let bracket: TaxBracket = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(bracket.min_income, Some(dec("600000")));
        assert_eq!(bracket.max_income, None);
        assert_eq!(bracket.id, None);
    }
}
