//! Overtime band attribution.
//!
//! Aggregated monthly overtime hours are paid band by band. Each band is
//! evaluated independently against the full aggregate, so bands that overlap
//! or leave gaps are paid exactly as configured.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::config::OvertimeBand;
use crate::models::SalaryComponent;

/// The hours and pay a single band attracts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BandAttribution {
    /// Hours attributed to the band, `None` when the aggregate does not reach it.
    pub hours: Option<Decimal>,
    /// hour rate × (1 + premium / 100).
    pub rate: Decimal,
    /// round2(rate × hours), `None` when the band does not apply.
    pub amount: Option<Decimal>,
}

/// Rounds a monetary amount to two decimal places, half away from zero.
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Attributes aggregated overtime hours to one band.
///
/// The band applies when `aggregated_hours` is strictly above its minimum.
/// The attributed hours are `min(max, aggregated) - min`, never negative.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::attribute_band;
/// use payroll_engine::config::OvertimeBand;
/// use rust_decimal::Decimal;
///
/// let band = OvertimeBand {
///     min_hours: Decimal::new(1, 0),
///     max_hours: Decimal::new(3, 0),
///     premium_rate_percent: Decimal::new(50, 0),
/// };
/// let attribution = attribute_band(&band, Decimal::new(2, 0), Decimal::new(10_000, 0));
///
/// assert_eq!(attribution.hours, Some(Decimal::ONE));
/// assert_eq!(attribution.amount, Some(Decimal::new(15_000, 0)));
/// ```
pub fn attribute_band(
    band: &OvertimeBand,
    aggregated_hours: Decimal,
    hour_rate: Decimal,
) -> BandAttribution {
    let rate = hour_rate * (Decimal::ONE + band.premium_rate_percent / Decimal::ONE_HUNDRED);

    if aggregated_hours <= band.min_hours {
        return BandAttribution {
            hours: None,
            rate,
            amount: None,
        };
    }

    let hours = (band.max_hours.min(aggregated_hours) - band.min_hours).max(Decimal::ZERO);

    BandAttribution {
        hours: Some(hours),
        rate,
        amount: Some(round2(rate * hours)),
    }
}

/// Builds one earnings line per band, in band order.
pub fn overtime_lines(
    bands: &[OvertimeBand],
    aggregated_hours: Decimal,
    hour_rate: Decimal,
) -> Vec<SalaryComponent> {
    bands
        .iter()
        .map(|band| {
            let attribution = attribute_band(band, aggregated_hours, hour_rate);
            SalaryComponent {
                designation: format!(
                    "Overtime at {}% premium",
                    band.premium_rate_percent.normalize()
                ),
                quantity_label: attribution
                    .hours
                    .map(|h| format!("{} hours", h.normalize())),
                unit_rate: Some(round2(attribution.rate)),
                amount: attribution.amount,
            }
        })
        .collect()
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
    fn test_two_band_example() {
        let bands = vec![band("0", "1", "25"), band("1", "3", "50")];
        let hour_rate = dec("10000");

        let first = attribute_band(&bands[0], dec("2"), hour_rate);
        let second = attribute_band(&bands[1], dec("2"), hour_rate);

        assert_eq!(first.hours, Some(dec("1")));
        assert_eq!(first.amount, Some(dec("12500")));
        assert_eq!(second.hours, Some(dec("1")));
        assert_eq!(second.amount, Some(dec("15000")));
    }

    #[test]
    fn test_band_not_reached_has_no_amount() {
        let result = attribute_band(&band("8", "20", "50"), dec("8"), dec("10000"));

        assert_eq!(result.hours, None);
        assert_eq!(result.amount, None);
        assert_eq!(result.rate, dec("15000"));
    }

    #[test]
    fn test_aggregate_above_band_is_capped_at_width() {
        let result = attribute_band(&band("0", "8", "30"), dec("12.5"), dec("10000"));
        assert_eq!(result.hours, Some(dec("8")));
        assert_eq!(result.amount, Some(dec("104000")));
    }

    #[test]
    fn test_overlapping_bands_each_see_full_aggregate() {
        let bands = vec![band("0", "4", "25"), band("2", "6", "50")];
        let lines = overtime_lines(&bands, dec("5"), dec("100"));

        assert_eq!(lines[0].amount, Some(dec("500")));
        assert_eq!(lines[1].amount, Some(dec("450")));
    }

    #[test]
    fn test_inverted_band_attributes_zero_hours() {
        let result = attribute_band(&band("5", "3", "50"), dec("10"), dec("100"));
        assert_eq!(result.hours, Some(Decimal::ZERO));
        assert_eq!(result.amount, Some(Decimal::ZERO));
    }

    #[test]
    fn test_amount_rounds_half_away_from_zero() {
        // 17308.0309... * 1.3 * 0.5 = 11250.22...
        let hour_rate = dec("3000000") / dec("173.33");
        let result = attribute_band(&band("0", "8", "30"), dec("0.5"), hour_rate);
        assert_eq!(result.amount, Some(round2(hour_rate * dec("1.3") * dec("0.5"))));

        assert_eq!(round2(dec("0.125")), dec("0.13"));
        assert_eq!(round2(dec("0.124")), dec("0.12"));
    }

    #[test]
    fn test_lines_labels() {
        let lines = overtime_lines(&[band("0", "1", "25")], dec("0.5"), dec("10000"));

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].designation, "Overtime at 25% premium");
        assert_eq!(lines[0].quantity_label.as_deref(), Some("0.5 hours"));
        assert_eq!(lines[0].unit_rate, Some(dec("12500")));
        assert_eq!(lines[0].amount, Some(dec("6250")));
    }

    #[test]
    fn test_no_overtime_yields_informational_lines() {
        let lines = overtime_lines(
            &[band("0", "8", "30"), band("8", "20", "50")],
            Decimal::ZERO,
            dec("10000"),
        );

        assert_eq!(lines.len(), 2);
        assert!(lines.iter().all(|l| l.amount.is_none() && l.quantity_label.is_none()));
    }
}
