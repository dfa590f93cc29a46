#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Unit-root testing and stationarity classification.
//!
//! Wraps an Augmented Dickey-Fuller test (constant-only regression,
//! t-stat lag selection, MacKinnon approximate p-values) behind the small
//! classification surface the report narrative needs.

pub mod adf;
pub mod norm;
pub mod ols;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use adf::{AdfResult, adf_test, adf_test_with_lag};

/// Errors that can occur while testing a series.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatsError {
    /// The series is too short for the requested regression.
    #[error("series has {observations} observations; at least {required} required")]
    InsufficientData {
        /// Observations available.
        observations: usize,
        /// Observations the regression needs.
        required: usize,
    },

    /// The regression cannot be estimated (collinear or perfectly fitted).
    #[error("degenerate regression: {reason}")]
    DegenerateSeries {
        /// Description of what collapsed.
        reason: String,
    },
}

/// Which axis of a time series feeds the unit-root test.
///
/// Testing the time keys answers a different (and mostly vacuous)
/// question than testing the measured values; both are offered because
/// the published fire-insurance narrative was computed on the key axis.
/// See DESIGN.md for the decision record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SeriesAxis {
    /// Test the measured values (burned acres).
    #[default]
    Values,
    /// Test the time keys cast to numbers.
    TimeKeys,
}

/// Stationarity label at a given significance level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StationarityLabel {
    /// The label when `1 - p` clears the significance level.
    NonStationary,
    /// The label otherwise.
    Stationary,
}

impl std::fmt::Display for StationarityLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonStationary => write!(f, "non-stationary"),
            Self::Stationary => write!(f, "stationary"),
        }
    }
}

/// Classification outcome: label plus the test's p-value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationarityVerdict {
    /// Stationary / non-stationary at the requested level.
    pub label: StationarityLabel,
    /// MacKinnon approximate p-value of the unit-root test.
    pub p_value: f64,
    /// The tau statistic behind the p-value.
    pub statistic: f64,
    /// Lagged difference terms used.
    pub lags_used: usize,
}

impl StationarityVerdict {
    /// The complement of the p-value, the figure quoted in the narrative.
    #[must_use]
    pub fn confidence(&self) -> f64 {
        1.0 - self.p_value
    }
}

/// Classifies a series as stationary or non-stationary.
///
/// Runs the Augmented Dickey-Fuller test and labels the series
/// `NonStationary` when `1 - p < significance`, `Stationary` otherwise.
///
/// # Errors
///
/// Propagates [`StatsError`] when the test cannot run; callers degrade to
/// a narrative fallback rather than failing the report.
pub fn classify(values: &[f64], significance: f64) -> Result<StationarityVerdict, StatsError> {
    let result = adf::adf_test(values)?;
    let label = if 1.0 - result.p_value < significance {
        StationarityLabel::NonStationary
    } else {
        StationarityLabel::Stationary
    };

    log::debug!(
        "ADF tau={:.4} p={:.4} lags={} -> {label}",
        result.statistic,
        result.p_value,
        result.lags_used,
    );

    Ok(StationarityVerdict {
        label,
        p_value: result.p_value,
        statistic: result.statistic,
        lags_used: result.lags_used,
    })
}
