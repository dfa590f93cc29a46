#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Residential parcel and rebuild-status types.
//!
//! These types back the recovery web map: every destroyed residence from
//! the 2017 Santa Rosa fire, joined against the set of parcels that have
//! since been rebuilt, permitted, or completed.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// One residential parcel destroyed in the fire.
///
/// The `address` string is the join key against the rebuilt set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyRecord {
    /// Street address (assumed unique per record).
    pub address: String,
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
    /// Pre-fire valuation in whole dollars.
    pub assessed_value: f64,
}

/// One parcel known to be rebuilding (completed, permitted, or under
/// construction). Only the address is tracked by the source table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RebuildRecord {
    /// Street address matching [`PropertyRecord::address`].
    pub address: String,
}

/// Rebuild status derived for a destroyed parcel.
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
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RecoveryStatus {
    /// Destroyed with no rebuild activity on record.
    Destroyed,
    /// Rebuilding: completed, permitted, or under construction.
    Recovered,
}

/// A destroyed parcel with its derived rebuild status.
///
/// Created by the recovery join; never mutated after creation. The
/// valuation is rounded to whole dollars at creation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinedProperty {
    /// Street address.
    pub address: String,
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
    /// Pre-fire valuation, rounded to whole dollars.
    pub assessed_value: f64,
    /// Derived rebuild status.
    pub status: RecoveryStatus,
}

/// Aggregate valuation totals for the recovery map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecoverySummary {
    /// Number of destroyed parcels (the joined row count).
    pub parcel_count: usize,
    /// Total valuation of parcels with no rebuild activity.
    pub destroyed_value: f64,
    /// Total valuation of rebuilding parcels.
    pub recovered_value: f64,
}

impl RecoverySummary {
    /// Share of total valuation recovered so far, in `[0, 1]`.
    ///
    /// Returns `0.0` for an empty summary rather than dividing by zero.
    #[must_use]
    pub fn recovered_share(&self) -> f64 {
        let total = self.destroyed_value + self.recovered_value;
        if total == 0.0 {
            0.0
        } else {
            self.recovered_value / total
        }
    }
}
