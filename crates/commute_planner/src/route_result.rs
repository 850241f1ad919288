use std::{fmt::Display, str::FromStr};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    formatting::{distance_miles_from_text, duration_minutes_from_text},
    map_scene::PolylineId,
    response_parser::ParsedRoute,
};

/// Stable handle of a result, independent of where sorting puts it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct ResultId(Uuid);

impl ResultId {
    pub fn new() -> Self {
        ResultId(Uuid::new_v4())
    }
}

impl Default for ResultId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for ResultId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for ResultId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(ResultId)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RouteResult {
    pub id: ResultId,
    pub from_label: String,
    pub to_label: String,
    pub duration_text: String,
    pub distance_text: String,
    pub duration_minutes: u32,
    pub distance_miles: f64,
    pub additional_info: Vec<String>,
    pub color: String,
    pub visible: bool,
    #[serde(skip)]
    pub polyline: Option<PolylineId>,
}

impl RouteResult {
    pub fn new(
        from_label: impl Into<String>,
        to_label: impl Into<String>,
        color: impl Into<String>,
        route: ParsedRoute,
        polyline: Option<PolylineId>,
    ) -> Self {
        RouteResult {
            id: ResultId::new(),
            from_label: from_label.into(),
            to_label: to_label.into(),
            duration_minutes: duration_minutes_from_text(&route.duration_text),
            distance_miles: distance_miles_from_text(&route.distance_text),
            duration_text: route.duration_text,
            distance_text: route.distance_text,
            additional_info: route.additional_info,
            color: color.into(),
            visible: true,
            polyline,
        }
    }

    pub fn title(&self) -> String {
        format!("{} → {}", self.from_label, self.to_label)
    }
}

/// A pair that could not be routed at all. Shown in the panel, never sorted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RouteErrorEntry {
    pub from_label: String,
    pub to_label: String,
    pub message: String,
}

impl RouteErrorEntry {
    pub fn title(&self) -> String {
        format!("{} → {}", self.from_label, self.to_label)
    }
}
