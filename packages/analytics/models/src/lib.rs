#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Time-series types and derivation pipeline parameter/result types.
//!
//! A [`TimeSeries`] is an ordered sequence of `(key, value)` pairs with
//! strictly increasing keys and no duplicates. The annual fire series is
//! keyed by year, the daily climate series by calendar date.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use wildfire_atlas_climate_models::ClimateVariable;
use wildfire_atlas_fire_models::CauseFilter;

/// A single `(key, value)` pair in a time series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesPoint<K> {
    /// Time key (year or calendar date).
    pub key: K,
    /// Aggregated or smoothed value at this key.
    pub value: f64,
}

/// An ordered time series with strictly increasing, duplicate-free keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeSeries<K> {
    points: Vec<SeriesPoint<K>>,
}

/// Annual series keyed by calendar year.
pub type AnnualSeries = TimeSeries<i32>;

/// Daily series keyed by calendar date.
pub type DailySeries = TimeSeries<NaiveDate>;

impl<K> Default for TimeSeries<K> {
    fn default() -> Self {
        Self { points: Vec::new() }
    }
}

impl<K: Ord> TimeSeries<K> {
    /// Wraps points whose keys are already strictly increasing.
    ///
    /// Aggregation produces keys in sorted order; this constructor asserts
    /// that invariant in debug builds rather than re-sorting.
    #[must_use]
    pub fn from_sorted_points(points: Vec<SeriesPoint<K>>) -> Self {
        debug_assert!(
            points.windows(2).all(|pair| pair[0].key < pair[1].key),
            "time series keys must be strictly increasing"
        );
        Self { points }
    }
}

impl<K> TimeSeries<K> {
    /// Number of points in the series.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the series has no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The ordered points.
    #[must_use]
    pub fn points(&self) -> &[SeriesPoint<K>] {
        &self.points
    }

    /// The values in key order.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.value)
    }

    /// Replaces every value via `f(index, value)`, preserving keys.
    ///
    /// Used by the rolling smoother: output keys are the input keys, in
    /// the same order.
    #[must_use]
    pub fn map_values(&self, mut f: impl FnMut(usize, f64) -> f64) -> Self
    where
        K: Copy,
    {
        Self {
            points: self
                .points
                .iter()
                .enumerate()
                .map(|(i, p)| SeriesPoint {
                    key: p.key,
                    value: f(i, p.value),
                })
                .collect(),
        }
    }
}

/// Parameters for the annual burned-acreage pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FireTrendParams {
    /// Cause restriction ("All" or a single cause).
    pub cause: CauseFilter,
    /// Trailing moving-average window in years.
    pub window: usize,
}

impl Default for FireTrendParams {
    fn default() -> Self {
        Self {
            cause: CauseFilter::All,
            window: 15,
        }
    }
}

/// Raw and smoothed annual burned-acreage series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FireTrend {
    /// Annual totals after cause filtering.
    pub raw: AnnualSeries,
    /// Trailing moving average of `raw`.
    pub smoothed: AnnualSeries,
}

/// Parameters for the daily climate pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClimateTrendParams {
    /// Which measured variable to derive.
    pub variable: ClimateVariable,
    /// Symmetric moving-average half-window in days (each side).
    pub window: usize,
    /// Whether the raw scatter is shown alongside the smoothed line.
    /// Selects between the wide and narrow display ranges.
    pub show_raw: bool,
}

impl Default for ClimateTrendParams {
    fn default() -> Self {
        Self {
            variable: ClimateVariable::DeadFuelMoisture100h,
            window: 200,
            show_raw: false,
        }
    }
}

/// Raw and smoothed daily climate series with the display range to clip to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClimateTrend {
    /// Daily values of the selected variable.
    pub raw: DailySeries,
    /// Symmetric moving average of `raw`.
    pub smoothed: DailySeries,
    /// Y-axis display range for the rendering collaborator.
    pub range: DisplayRange,
}

/// Inclusive y-axis display range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayRange {
    /// Lower bound.
    pub min: f64,
    /// Upper bound.
    pub max: f64,
}

/// Display range for a climate variable.
///
/// The wide range leaves room for the raw scatter; the narrow range zooms
/// in on the smoothed line alone.
#[must_use]
pub const fn display_range(variable: ClimateVariable, show_raw: bool) -> DisplayRange {
    match (variable, show_raw) {
        (ClimateVariable::DeadFuelMoisture100h, true) => DisplayRange { min: 0.0, max: 30.0 },
        (ClimateVariable::DeadFuelMoisture100h, false) => DisplayRange { min: 8.0, max: 18.0 },
        (ClimateVariable::FireDangerIndex, true) => DisplayRange { min: 0.0, max: 80.0 },
        (ClimateVariable::FireDangerIndex, false) => DisplayRange { min: 20.0, max: 50.0 },
    }
}
