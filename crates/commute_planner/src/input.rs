use commute_providers::travel_mode::TravelMode;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{departure::LeaveBy, request_builder::RouteOptions, results_board::SortKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    StartingPoint,
    Destination,
}

/// One address row as typed in, blanks included.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LocationRow {
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Marker and route color, starting points only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl LocationRow {
    pub fn new(address: impl Into<String>) -> Self {
        LocationRow {
            address: address.into(),
            ..Default::default()
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocationEntry {
    pub address: String,
    pub label: Option<String>,
    pub color: Option<String>,
}

impl LocationEntry {
    /// The label, or the address when the label was left blank.
    pub fn display_label(&self) -> &str {
        match self.label.as_deref().map(str::trim) {
            Some(label) if !label.is_empty() => label,
            _ => &self.address,
        }
    }
}

/// Input document of a calculation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommuteForm {
    #[serde(default)]
    pub starting_points: Vec<LocationRow>,
    #[serde(default)]
    pub destinations: Vec<LocationRow>,
    #[serde(default)]
    pub travel_mode: TravelMode,
    #[serde(default)]
    pub leave_by: LeaveBy,
    #[serde(default)]
    pub sort_key: SortKey,
}

impl CommuteForm {
    /// Non-blank rows of one kind with trimmed addresses.
    pub fn collect_entries(&self, kind: EntryKind) -> Vec<LocationEntry> {
        let rows = match kind {
            EntryKind::StartingPoint => &self.starting_points,
            EntryKind::Destination => &self.destinations,
        };

        rows.iter()
            .filter_map(|row| {
                let address = row.address.trim();
                if address.is_empty() {
                    return None;
                }

                Some(LocationEntry {
                    address: address.to_string(),
                    label: row.label.clone(),
                    color: match kind {
                        EntryKind::StartingPoint => row
                            .color
                            .as_deref()
                            .map(str::trim)
                            .filter(|color| !color.is_empty())
                            .map(str::to_string),
                        EntryKind::Destination => None,
                    },
                })
            })
            .collect()
    }

    pub fn route_options(&self) -> RouteOptions {
        RouteOptions {
            travel_mode: self.travel_mode,
            leave_by: self.leave_by,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Please enter at least one destination address")]
    NoDestinations,

    #[error("Please enter at least one starting address")]
    NoStartingPoints,
}

/// The form reduced once per run; later stages never look at the rows again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommuteInput {
    pub starting_points: Vec<LocationEntry>,
    pub destinations: Vec<LocationEntry>,
    pub options: RouteOptions,
    pub sort_key: SortKey,
}

impl TryFrom<&CommuteForm> for CommuteInput {
    type Error = InputError;

    fn try_from(form: &CommuteForm) -> Result<Self, Self::Error> {
        let destinations = form.collect_entries(EntryKind::Destination);
        if destinations.is_empty() {
            return Err(InputError::NoDestinations);
        }

        let starting_points = form.collect_entries(EntryKind::StartingPoint);
        if starting_points.is_empty() {
            return Err(InputError::NoStartingPoints);
        }

        Ok(CommuteInput {
            starting_points,
            destinations,
            options: form.route_options(),
            sort_key: form.sort_key,
        })
    }
}
