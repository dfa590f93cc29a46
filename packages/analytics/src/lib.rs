#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Derivation pipelines for the fire-insurance report.
//!
//! Three shared primitives (cause filtering, temporal aggregation, rolling
//! smoothing) and their composition into the annual burned-acreage and
//! daily climate pipelines. Every derivation is a pure function of the
//! loaded records plus a parameter struct; nothing here retains state
//! between invocations.

pub mod pipeline;

use std::collections::BTreeMap;

use wildfire_atlas_analytics_models::{SeriesPoint, TimeSeries};
use wildfire_atlas_fire_models::{CauseFilter, FireRecord};

pub use pipeline::{MIN_FIRE_YEAR, climate_trend, fire_trend};

/// Selects fire records by cause, preserving input order.
///
/// [`CauseFilter::All`] keeps every record. A concrete cause keeps only
/// exact matches; records with no mapped cause never match. An empty
/// result is valid and flows through the rest of the pipeline as an
/// empty series.
#[must_use]
pub fn filter_by_cause(records: &[FireRecord], cause: CauseFilter) -> Vec<&FireRecord> {
    match cause {
        CauseFilter::All => records.iter().collect(),
        CauseFilter::Cause(selected) => records
            .iter()
            .filter(|record| record.cause == Some(selected))
            .collect(),
    }
}

/// Groups records by a time key and sums a measure per group.
///
/// Keys come out strictly ascending with one point per distinct key.
/// Records whose key is absent are skipped. Accumulation follows input
/// order, so repeated runs over the same records produce bit-identical
/// sums. With `min_key`, groups at or below the cutoff are dropped after
/// grouping; gaps in the timeline are never backfilled.
pub fn aggregate_series<R, K: Ord + Copy>(
    records: impl IntoIterator<Item = R>,
    key_fn: impl Fn(&R) -> Option<K>,
    measure_fn: impl Fn(&R) -> f64,
    min_key: Option<K>,
) -> TimeSeries<K> {
    let mut groups: BTreeMap<K, f64> = BTreeMap::new();
    for record in records {
        let Some(key) = key_fn(&record) else {
            continue;
        };
        *groups.entry(key).or_insert(0.0) += measure_fn(&record);
    }

    let points = groups
        .into_iter()
        .filter(|&(key, _)| min_key.is_none_or(|min| key > min))
        .map(|(key, value)| SeriesPoint { key, value })
        .collect();

    TimeSeries::from_sorted_points(points)
}

/// Windowed moving average over a series, in index terms.
///
/// Every output value is the mean of the input values at indices
/// `[i - before, i + after]`, clipped to the series bounds; partial
/// windows at the edges average whatever falls inside. Output length and
/// key order always match the input. A series of length 0 or 1 comes
/// back unchanged.
#[must_use]
pub fn rolling_mean<K: Copy>(series: &TimeSeries<K>, before: usize, after: usize) -> TimeSeries<K> {
    if series.len() <= 1 {
        return series.clone();
    }

    let values: Vec<f64> = series.values().collect();
    let last = values.len() - 1;

    series.map_values(|i, _| {
        let lo = i.saturating_sub(before);
        let hi = (i + after).min(last);
        let window = &values[lo..=hi];
        #[allow(clippy::cast_precision_loss)]
        let count = window.len() as f64;
        window.iter().sum::<f64>() / count
    })
}
