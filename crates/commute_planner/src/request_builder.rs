use commute_providers::{
    lat_lng::LatLng,
    routes_api::{
        PolylineQuality, RouteRequest, RoutingPreference, TransitPreferences,
        TransitRoutingPreference,
    },
    travel_mode::TravelMode,
};
use jiff::Zoned;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::departure::{LeaveBy, resolve_departure_time};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestBuildError {
    #[error("Departure time is required for public transit routes")]
    DepartureTimeRequired,

    #[error("Invalid departure time: {0}")]
    InvalidDepartureTime(String),
}

/// Run-wide routing choices shared by every pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RouteOptions {
    #[serde(default)]
    pub travel_mode: TravelMode,
    #[serde(default)]
    pub leave_by: LeaveBy,
}

pub fn build_request(
    origin: LatLng,
    destination: LatLng,
    options: &RouteOptions,
    now: &Zoned,
) -> Result<RouteRequest, RequestBuildError> {
    let departure_time = resolve_departure_time(options.travel_mode, &options.leave_by, now)?;

    let (routing_preference, transit_preferences) = match options.travel_mode {
        TravelMode::Transit => (
            None,
            Some(TransitPreferences {
                routing_preference: TransitRoutingPreference::LessWalking,
            }),
        ),
        _ => (Some(RoutingPreference::TrafficAwareOptimal), None),
    };

    let request = RouteRequest {
        origin: origin.into(),
        destination: destination.into(),
        travel_mode: options.travel_mode,
        polyline_quality: PolylineQuality::HighQuality,
        routing_preference,
        transit_preferences,
        departure_time,
    };

    debug!(?request, "Built route request");

    Ok(request)
}
