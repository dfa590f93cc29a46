#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Rebuild-status join for the recovery map.
//!
//! Left-joins the destroyed-parcel table against the rebuilt-address
//! table: every destroyed parcel appears exactly once in the output with
//! a derived status, and parcels only present in the rebuilt table are
//! ignored. Duplicate addresses on either side resolve to the first
//! occurrence, with a warning per duplicate.

use std::collections::BTreeSet;

use wildfire_atlas_property_models::{
    JoinedProperty, PropertyRecord, RebuildRecord, RecoveryStatus, RecoverySummary,
};

/// Joins destroyed parcels against rebuilt addresses.
///
/// The destroyed set is authoritative for the output row set: the result
/// has one row per destroyed parcel, in input order. Valuations are
/// rounded to whole dollars here, before any summation.
#[must_use]
pub fn join(destroyed: &[PropertyRecord], rebuilt: &[RebuildRecord]) -> Vec<JoinedProperty> {
    let mut rebuilt_addresses = BTreeSet::new();
    for record in rebuilt {
        if !rebuilt_addresses.insert(record.address.as_str()) {
            log::warn!("duplicate rebuilt address ignored: {}", record.address);
        }
    }

    let mut seen = BTreeSet::new();
    let mut joined = Vec::with_capacity(destroyed.len());
    for parcel in destroyed {
        if !seen.insert(parcel.address.as_str()) {
            log::warn!("duplicate destroyed address: {}", parcel.address);
        }
        let status = if rebuilt_addresses.contains(parcel.address.as_str()) {
            RecoveryStatus::Recovered
        } else {
            RecoveryStatus::Destroyed
        };
        joined.push(JoinedProperty {
            address: parcel.address.clone(),
            latitude: parcel.latitude,
            longitude: parcel.longitude,
            assessed_value: parcel.assessed_value.round(),
            status,
        });
    }

    joined
}

/// Sums the valuation of joined rows with the given status.
#[must_use]
pub fn sum_by_status(joined: &[JoinedProperty], status: RecoveryStatus) -> f64 {
    joined
        .iter()
        .filter(|row| row.status == status)
        .map(|row| row.assessed_value)
        .sum()
}

/// Derives the valuation totals for a joined row set.
#[must_use]
pub fn summarize(joined: &[JoinedProperty]) -> RecoverySummary {
    RecoverySummary {
        parcel_count: joined.len(),
        destroyed_value: sum_by_status(joined, RecoveryStatus::Destroyed),
        recovered_value: sum_by_status(joined, RecoveryStatus::Recovered),
    }
}
