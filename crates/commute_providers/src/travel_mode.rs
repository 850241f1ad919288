use std::{fmt::Display, str::FromStr};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TravelMode {
    #[default]
    Drive,
    Walk,
    Bicycle,
    Transit,
    TwoWheeler,
}

pub const TRAVEL_MODES: [TravelMode; 5] = [
    TravelMode::Drive,
    TravelMode::Walk,
    TravelMode::Bicycle,
    TravelMode::Transit,
    TravelMode::TwoWheeler,
];

#[derive(Debug, Error, PartialEq, Eq)]
#[error(
    "Invalid travel mode: {0}. Must be one of ['DRIVE', 'WALK', 'BICYCLE', 'TRANSIT', 'TWO_WHEELER']"
)]
pub struct InvalidTravelMode(pub String);

impl TravelMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TravelMode::Drive => "DRIVE",
            TravelMode::Walk => "WALK",
            TravelMode::Bicycle => "BICYCLE",
            TravelMode::Transit => "TRANSIT",
            TravelMode::TwoWheeler => "TWO_WHEELER",
        }
    }

    /// Modes the provider flags as beta, with the wording used in the warning banner.
    pub fn beta_label(&self) -> Option<&'static str> {
        match self {
            TravelMode::Walk => Some("Walking"),
            TravelMode::Bicycle => Some("Bicycling"),
            TravelMode::TwoWheeler => Some("Two-wheeled vehicle"),
            TravelMode::Drive | TravelMode::Transit => None,
        }
    }
}

impl Display for TravelMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TravelMode {
    type Err = InvalidTravelMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TRAVEL_MODES
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| InvalidTravelMode(s.to_string()))
    }
}
