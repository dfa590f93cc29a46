#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Daily climate observation types.
//!
//! One observation per calendar day, aggregated for the state of California
//! from the gridded surface meteorology (gridMET/NFDRS) export. Observations
//! are orderable by date; file order is not trusted.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Which measured climate variable a pipeline derives.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
pub enum ClimateVariable {
    /// NFDRS burn index (`bi`): composite fire-danger rating.
    #[strum(serialize = "fire_danger_index", serialize = "bi")]
    FireDangerIndex,
    /// 100-hour dead fuel moisture (`fm100`): moisture content of dead
    /// vegetation with a multi-day response lag.
    #[strum(serialize = "dead_fuel_moisture_100h", serialize = "fm100")]
    DeadFuelMoisture100h,
}

impl ClimateVariable {
    /// The source export's column name for this variable.
    #[must_use]
    pub const fn column(self) -> &'static str {
        match self {
            Self::FireDangerIndex => "bi",
            Self::DeadFuelMoisture100h => "fm100",
        }
    }
}

/// One daily climate measurement.
///
/// Loaded once per session and treated as read-only thereafter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClimateObservation {
    /// Calendar date of the measurement.
    pub date: NaiveDate,
    /// NFDRS burn index.
    pub fire_danger_index: f64,
    /// 100-hour dead fuel moisture.
    pub dead_fuel_moisture_100h: f64,
}

impl ClimateObservation {
    /// Returns the value of the selected variable.
    #[must_use]
    pub const fn value(&self, variable: ClimateVariable) -> f64 {
        match variable {
            ClimateVariable::FireDangerIndex => self.fire_danger_index,
            ClimateVariable::DeadFuelMoisture100h => self.dead_fuel_moisture_100h,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variable_selects_matching_field() {
        let obs = ClimateObservation {
            date: NaiveDate::from_ymd_opt(1988, 7, 4).unwrap(),
            fire_danger_index: 42.0,
            dead_fuel_moisture_100h: 11.5,
        };

        assert!((obs.value(ClimateVariable::FireDangerIndex) - 42.0).abs() < f64::EPSILON);
        assert!(
            (obs.value(ClimateVariable::DeadFuelMoisture100h) - 11.5).abs() < f64::EPSILON
        );
    }

    #[test]
    fn variable_parses_source_column_names() {
        assert_eq!(
            "bi".parse::<ClimateVariable>().ok(),
            Some(ClimateVariable::FireDangerIndex)
        );
        assert_eq!(ClimateVariable::DeadFuelMoisture100h.column(), "fm100");
    }
}
