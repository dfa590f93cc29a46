#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Wildfire cause taxonomy and fire-history record types.
//!
//! This crate defines the canonical fire-cause taxonomy used across the
//! wildfire-atlas system. Cause codes follow the statewide fire-history
//! database; codes absent from the taxonomy (reserved or retired values)
//! load as "no cause" and never match a concrete cause filter.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Ignition cause for a wildfire perimeter, keyed by the source database's
/// numeric cause code.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum FireCause {
    /// Code 1: Lightning strikes.
    Lightning = 1,
    /// Code 2: Equipment use (mowers, tractors, power tools).
    EquipmentUse = 2,
    /// Code 3: Discarded smoking materials.
    Smoking = 3,
    /// Code 4: Campfires.
    Campfire = 4,
    /// Code 5: Debris burning.
    Debris = 5,
    /// Code 6: Railroad operations.
    Railroad = 6,
    /// Code 7: Arson.
    Arson = 7,
    /// Code 8: Children playing with fire.
    PlayingWithFire = 8,
    /// Code 9: Miscellaneous causes.
    Miscellaneous = 9,
    /// Code 10: Vehicle fires.
    Vehicle = 10,
    /// Code 11: Powerline failures.
    Powerline = 11,
    /// Code 14: Unknown or unidentified cause.
    UnknownUnidentified = 14,
    /// Code 18: Escaped prescribed burns.
    EscapedPrescribedBurn = 18,
}

impl FireCause {
    /// All causes in code order.
    pub const ALL: &[Self] = &[
        Self::Lightning,
        Self::EquipmentUse,
        Self::Smoking,
        Self::Campfire,
        Self::Debris,
        Self::Railroad,
        Self::Arson,
        Self::PlayingWithFire,
        Self::Miscellaneous,
        Self::Vehicle,
        Self::Powerline,
        Self::UnknownUnidentified,
        Self::EscapedPrescribedBurn,
    ];

    /// Returns the source database's numeric code for this cause.
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Creates a cause from a source database code.
    ///
    /// # Errors
    ///
    /// Returns an error if the code is not part of the taxonomy.
    pub const fn from_code(code: u8) -> Result<Self, InvalidCauseError> {
        match code {
            1 => Ok(Self::Lightning),
            2 => Ok(Self::EquipmentUse),
            3 => Ok(Self::Smoking),
            4 => Ok(Self::Campfire),
            5 => Ok(Self::Debris),
            6 => Ok(Self::Railroad),
            7 => Ok(Self::Arson),
            8 => Ok(Self::PlayingWithFire),
            9 => Ok(Self::Miscellaneous),
            10 => Ok(Self::Vehicle),
            11 => Ok(Self::Powerline),
            14 => Ok(Self::UnknownUnidentified),
            18 => Ok(Self::EscapedPrescribedBurn),
            _ => Err(InvalidCauseError { code }),
        }
    }

    /// Human-readable label, as shown in the report UI.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Lightning => "Lightning",
            Self::EquipmentUse => "Equipment Use",
            Self::Smoking => "Smoking",
            Self::Campfire => "Campfire",
            Self::Debris => "Debris",
            Self::Railroad => "Railroad",
            Self::Arson => "Arson",
            Self::PlayingWithFire => "Playing with fire",
            Self::Miscellaneous => "Miscellaneous",
            Self::Vehicle => "Vehicle",
            Self::Powerline => "Powerline",
            Self::UnknownUnidentified => "Unknown / Unidentified",
            Self::EscapedPrescribedBurn => "Escaped Prescribed Burn",
        }
    }

    /// Looks up a cause by its human-readable label.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.label() == label)
    }
}

/// Error returned when attempting to create a [`FireCause`] from a code
/// outside the taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidCauseError {
    /// The unmapped cause code that was provided.
    pub code: u8,
}

impl std::fmt::Display for InvalidCauseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "cause code {} is not part of the taxonomy", self.code)
    }
}

impl std::error::Error for InvalidCauseError {}

/// Cause selection for the fire-trend pipeline: everything, or a single
/// cause from the taxonomy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CauseFilter {
    /// No cause restriction (the "All" selector).
    #[default]
    All,
    /// Restrict to a single cause.
    Cause(FireCause),
}

impl CauseFilter {
    /// Human-readable label for the filter, matching the report selector.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Cause(cause) => cause.label(),
        }
    }

    /// Parses a selector label ("All" or a cause label) into a filter.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        if label.eq_ignore_ascii_case("All") {
            return Some(Self::All);
        }
        FireCause::from_label(label).map(Self::Cause)
    }
}

impl std::fmt::Display for CauseFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One wildfire perimeter from the statewide fire-history database.
///
/// Loaded once per session and treated as read-only thereafter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FireRecord {
    /// Calendar year of the fire. Blank/unparseable source years load as
    /// `None` and are skipped by aggregation.
    pub year: Option<i32>,
    /// Ignition cause, when the source code maps into the taxonomy.
    pub cause: Option<FireCause>,
    /// Burned area in acres (non-negative).
    pub burned_acres: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_round_trips_for_all_causes() {
        for cause in FireCause::ALL {
            assert_eq!(FireCause::from_code(cause.code()), Ok(*cause));
        }
    }

    #[test]
    fn unmapped_code_is_rejected() {
        assert_eq!(
            FireCause::from_code(12),
            Err(InvalidCauseError { code: 12 })
        );
        assert_eq!(
            FireCause::from_code(0),
            Err(InvalidCauseError { code: 0 })
        );
    }

    #[test]
    fn label_round_trips() {
        assert_eq!(
            FireCause::from_label("Escaped Prescribed Burn"),
            Some(FireCause::EscapedPrescribedBurn)
        );
        assert_eq!(FireCause::from_label("Meteor"), None);
    }

    #[test]
    fn filter_label_parses_all_sentinel() {
        assert_eq!(CauseFilter::from_label("All"), Some(CauseFilter::All));
        assert_eq!(
            CauseFilter::from_label("Lightning"),
            Some(CauseFilter::Cause(FireCause::Lightning))
        );
        assert_eq!(CauseFilter::from_label("nope"), None);
    }
}
