//! Composition of the derivation primitives into report pipelines.
//!
//! Each pipeline is recomputed in full, synchronously, whenever a
//! parameter changes; the records themselves are read-only session data.

use wildfire_atlas_analytics_models::{
    ClimateTrend, ClimateTrendParams, FireTrend, FireTrendParams, display_range,
};
use wildfire_atlas_climate_models::ClimateObservation;
use wildfire_atlas_fire_models::FireRecord;

use crate::{aggregate_series, filter_by_cause, rolling_mean};

/// Years at or before this cutoff are dropped from the annual series.
/// Record keeping before 1911 is too sparse to chart.
pub const MIN_FIRE_YEAR: i32 = 1910;

/// Annual burned-acreage pipeline: filter by cause, sum acres per year,
/// smooth with a trailing window.
#[must_use]
pub fn fire_trend(records: &[FireRecord], params: &FireTrendParams) -> FireTrend {
    let filtered = filter_by_cause(records, params.cause);
    log::debug!(
        "fire trend: {} of {} records match cause {}",
        filtered.len(),
        records.len(),
        params.cause,
    );

    let raw = aggregate_series(
        filtered,
        |record| record.year,
        |record| record.burned_acres,
        Some(MIN_FIRE_YEAR),
    );
    let smoothed = rolling_mean(&raw, params.window, 0);

    FireTrend { raw, smoothed }
}

/// Daily climate pipeline: one value per date for the selected variable,
/// smoothed with a symmetric window.
#[must_use]
pub fn climate_trend(
    observations: &[ClimateObservation],
    params: &ClimateTrendParams,
) -> ClimateTrend {
    let raw = aggregate_series(
        observations.iter(),
        |obs| Some(obs.date),
        |obs| obs.value(params.variable),
        None,
    );
    let smoothed = rolling_mean(&raw, params.window, params.window);

    ClimateTrend {
        raw,
        smoothed,
        range: display_range(params.variable, params.show_raw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use wildfire_atlas_climate_models::ClimateVariable;
    use wildfire_atlas_fire_models::{CauseFilter, FireCause};

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn fire_trend_filters_aggregates_and_smooths() {
        let records = vec![
            FireRecord {
                year: Some(2018),
                cause: Some(FireCause::Lightning),
                burned_acres: 100.0,
            },
            FireRecord {
                year: Some(2018),
                cause: Some(FireCause::EquipmentUse),
                burned_acres: 50.0,
            },
            FireRecord {
                year: Some(2019),
                cause: Some(FireCause::Lightning),
                burned_acres: 30.0,
            },
        ];
        let params = FireTrendParams {
            cause: CauseFilter::Cause(FireCause::Lightning),
            window: 1,
        };

        let trend = fire_trend(&records, &params);
        let raw: Vec<_> = trend.raw.points().iter().map(|p| (p.key, p.value)).collect();
        assert_eq!(raw, vec![(2018, 100.0), (2019, 30.0)]);

        let smoothed: Vec<_> = trend.smoothed.values().collect();
        assert_eq!(smoothed, vec![100.0, 65.0]);
    }

    #[test]
    fn fire_trend_applies_the_year_cutoff() {
        let records = vec![
            FireRecord {
                year: Some(1905),
                cause: None,
                burned_acres: 500.0,
            },
            FireRecord {
                year: Some(1950),
                cause: None,
                burned_acres: 40.0,
            },
        ];

        let trend = fire_trend(&records, &FireTrendParams::default());
        let keys: Vec<_> = trend.raw.points().iter().map(|p| p.key).collect();
        assert_eq!(keys, vec![1950]);
    }

    #[test]
    fn fire_trend_on_empty_input_is_empty() {
        let trend = fire_trend(&[], &FireTrendParams::default());
        assert!(trend.raw.is_empty());
        assert!(trend.smoothed.is_empty());
    }

    #[test]
    fn climate_trend_orders_by_date_and_picks_variable() {
        // File order is shuffled; the series must come out date-ordered.
        let observations = vec![
            ClimateObservation {
                date: date(1981, 1, 2),
                fire_danger_index: 30.0,
                dead_fuel_moisture_100h: 12.0,
            },
            ClimateObservation {
                date: date(1981, 1, 1),
                fire_danger_index: 20.0,
                dead_fuel_moisture_100h: 14.0,
            },
            ClimateObservation {
                date: date(1981, 1, 3),
                fire_danger_index: 40.0,
                dead_fuel_moisture_100h: 10.0,
            },
        ];
        let params = ClimateTrendParams {
            variable: ClimateVariable::FireDangerIndex,
            window: 1,
            show_raw: true,
        };

        let trend = climate_trend(&observations, &params);
        let raw: Vec<_> = trend.raw.points().iter().map(|p| (p.key, p.value)).collect();
        assert_eq!(
            raw,
            vec![
                (date(1981, 1, 1), 20.0),
                (date(1981, 1, 2), 30.0),
                (date(1981, 1, 3), 40.0),
            ]
        );

        let smoothed: Vec<_> = trend.smoothed.values().collect();
        assert_eq!(smoothed, vec![25.0, 30.0, 35.0]);

        assert!((trend.range.max - 80.0).abs() < f64::EPSILON);
    }

    #[test]
    fn climate_trend_narrow_range_without_raw() {
        let params = ClimateTrendParams {
            variable: ClimateVariable::DeadFuelMoisture100h,
            window: 200,
            show_raw: false,
        };
        let trend = climate_trend(&[], &params);
        assert!(trend.raw.is_empty());
        assert!((trend.range.min - 8.0).abs() < f64::EPSILON);
        assert!((trend.range.max - 18.0).abs() < f64::EPSILON);
    }
}
