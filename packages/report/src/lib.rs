#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Report sections for the fire-insurance narrative.
//!
//! Each section is a pure function of the loaded records plus the user's
//! parameters: chart-ready series, a narrative sentence, and (for the
//! recovery section) a GeoJSON point map. A failed stationarity test
//! degrades to a fallback sentence; it never fails the report.

pub mod map;

use serde::{Deserialize, Serialize};
use wildfire_atlas_analytics::{climate_trend, fire_trend};
use wildfire_atlas_analytics_models::{ClimateTrend, ClimateTrendParams, FireTrend, FireTrendParams};
use wildfire_atlas_climate_models::ClimateObservation;
use wildfire_atlas_fire_models::FireRecord;
use wildfire_atlas_property_models::{JoinedProperty, PropertyRecord, RebuildRecord, RecoverySummary};
use wildfire_atlas_stats::{SeriesAxis, StationarityVerdict, classify};

/// Significance level quoted by the stationarity narrative.
pub const SIGNIFICANCE_LEVEL: f64 = 0.05;

/// The annual burned-acreage section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FireSection {
    /// Raw and smoothed annual series for the overlaid line chart.
    pub trend: FireTrend,
    /// Test outcome, when the test could run.
    pub verdict: Option<StationarityVerdict>,
    /// Narrative sentence for the section.
    pub narrative: String,
}

/// Derives the burned-acreage section.
///
/// `axis` picks which side of the series feeds the unit-root test; the
/// measured values are the default, the time keys reproduce the
/// published narrative's figure (see DESIGN.md).
#[must_use]
pub fn fire_section(
    records: &[FireRecord],
    params: &FireTrendParams,
    axis: SeriesAxis,
) -> FireSection {
    let trend = fire_trend(records, params);

    let tested: Vec<f64> = match axis {
        SeriesAxis::Values => trend.raw.values().collect(),
        SeriesAxis::TimeKeys => trend.raw.points().iter().map(|p| f64::from(p.key)).collect(),
    };

    match classify(&tested, SIGNIFICANCE_LEVEL) {
        Ok(verdict) => {
            let narrative = format!(
                "The time-series for acres burned from **{}** is **{}** at the \
                 5-percent significance level (p-value = {:.2}), according to \
                 the Augmented Dickey-Fuller test.",
                params.cause.label(),
                verdict.label,
                verdict.confidence(),
            );
            FireSection {
                trend,
                verdict: Some(verdict),
                narrative,
            }
        }
        Err(err) => {
            log::warn!("stationarity test unavailable: {err}");
            let narrative = format!(
                "The stationarity of the acres-burned series for **{}** could \
                 not be tested: {err}.",
                params.cause.label(),
            );
            FireSection {
                trend,
                verdict: None,
                narrative,
            }
        }
    }
}

/// The daily climate section: raw and smoothed series plus display range.
#[must_use]
pub fn climate_section(
    observations: &[ClimateObservation],
    params: &ClimateTrendParams,
) -> ClimateTrend {
    climate_trend(observations, params)
}

/// The recovery-map section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecoverySection {
    /// One row per destroyed parcel with derived status.
    pub homes: Vec<JoinedProperty>,
    /// Valuation totals by status.
    pub summary: RecoverySummary,
    /// Narrative sentence for the section.
    pub narrative: String,
}

/// Derives the recovery section from the two source tables.
#[must_use]
pub fn recovery_section(
    destroyed: &[PropertyRecord],
    rebuilt: &[RebuildRecord],
) -> RecoverySection {
    let homes = wildfire_atlas_recovery::join(destroyed, rebuilt);
    let summary = wildfire_atlas_recovery::summarize(&homes);

    let narrative = format!(
        "There were roughly **{} buildings** destroyed, with a total value of \
         **${:.2}B**. The total value of buildings since rebuilt is \
         **${:.2}B**, i.e., only **{:.1} percent** of the value has been \
         recovered since November 2017.",
        thousands(round_to_tens(summary.parcel_count)),
        (summary.destroyed_value + summary.recovered_value) / 1e9,
        summary.recovered_value / 1e9,
        summary.recovered_share() * 100.0,
    );

    RecoverySection {
        homes,
        summary,
        narrative,
    }
}

/// Rounds a count to the nearest ten, for the "roughly N buildings"
/// phrasing.
#[must_use]
pub fn round_to_tens(count: usize) -> usize {
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let rounded = ((count as f64 / 10.0).round() * 10.0) as usize;
    rounded
}

/// Formats an integer with comma thousands separators.
#[must_use]
pub fn thousands(value: usize) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use wildfire_atlas_fire_models::{CauseFilter, FireCause};

    fn record(year: i32, acres: f64) -> FireRecord {
        FireRecord {
            year: Some(year),
            cause: Some(FireCause::Lightning),
            burned_acres: acres,
        }
    }

    fn parcel(address: &str, value: f64) -> PropertyRecord {
        PropertyRecord {
            address: address.to_owned(),
            latitude: 38.44,
            longitude: -122.71,
            assessed_value: value,
        }
    }

    #[test]
    fn fire_section_degrades_when_series_is_too_short() {
        let records = vec![record(2018, 100.0), record(2019, 30.0)];
        let params = FireTrendParams {
            cause: CauseFilter::All,
            window: 15,
        };

        let section = fire_section(&records, &params, SeriesAxis::Values);
        assert_eq!(section.trend.raw.len(), 2);
        assert!(section.verdict.is_none());
        assert!(section.narrative.contains("could not be tested"));
        assert!(section.narrative.contains("**All**"));
    }

    #[test]
    fn fire_section_narrative_quotes_label_and_confidence() {
        // Irregular acreage over enough years for the test to run.
        let acres = [
            210.0, 95.0, 340.0, 120.0, 480.0, 60.0, 270.0, 150.0, 390.0, 85.0, 310.0, 175.0,
            440.0, 55.0, 230.0, 165.0, 375.0, 90.0, 295.0, 140.0, 410.0, 70.0, 255.0, 185.0,
            360.0, 105.0, 325.0, 130.0, 450.0, 80.0,
        ];
        let records: Vec<FireRecord> = acres
            .iter()
            .enumerate()
            .map(|(i, &a)| {
                #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
                let year = 1980 + i as i32;
                record(year, a)
            })
            .collect();
        let params = FireTrendParams {
            cause: CauseFilter::Cause(FireCause::Lightning),
            window: 5,
        };

        let section = fire_section(&records, &params, SeriesAxis::Values);
        let verdict = section.verdict.expect("test should run on 30 points");
        assert!(section.narrative.contains("**Lightning**"));
        assert!(section.narrative.contains(&format!("**{}**", verdict.label)));
        assert!((0.0..=1.0).contains(&verdict.p_value));
    }

    #[test]
    fn recovery_section_matches_the_join_scenario() {
        let destroyed = vec![parcel("A", 200.0), parcel("B", 100.0)];
        let rebuilt = vec![RebuildRecord {
            address: "A".to_owned(),
        }];

        let section = recovery_section(&destroyed, &rebuilt);
        assert_eq!(section.homes.len(), 2);
        assert!((section.summary.destroyed_value - 100.0).abs() < f64::EPSILON);
        assert!((section.summary.recovered_value - 200.0).abs() < f64::EPSILON);
        assert!(section.narrative.contains("66.7 percent"));
    }

    #[test]
    fn counts_round_to_the_nearest_ten() {
        assert_eq!(round_to_tens(0), 0);
        assert_eq!(round_to_tens(4), 0);
        assert_eq!(round_to_tens(5), 10);
        assert_eq!(round_to_tens(2486), 2490);
    }

    #[test]
    fn thousands_groups_digits() {
        assert_eq!(thousands(0), "0");
        assert_eq!(thousands(999), "999");
        assert_eq!(thousands(2490), "2,490");
        assert_eq!(thousands(1_234_567), "1,234,567");
    }
}
