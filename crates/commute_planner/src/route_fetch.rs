use commute_providers::{
    directions_api::{DirectionsRequest, DirectionsService},
    google_api::GoogleApiError,
    routes_api::{RouteRequest, RouteService, RoutesApiError, details_message},
};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error};

use crate::response_parser::{ParseError, ParsedRoute, parse_fallback, parse_primary};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FetchState {
    PrimaryPending,
    PrimaryOk,
    PrimaryFailed,
    FallbackPending,
    FallbackOk,
    FallbackFailed,
}

/// Why the primary endpoint could not be used.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PrimaryFailure {
    #[error("network error: {0}")]
    Network(String),

    #[error("{error}")]
    Api {
        error: String,
        details_message: Option<String>,
    },

    #[error("no routes returned")]
    NoRoutes,

    #[error("malformed route: {0}")]
    Malformed(ParseError),
}

impl PrimaryFailure {
    /// Alert shown for the starting point whose pair failed.
    pub fn alert_message(&self, label: &str) -> String {
        match self {
            PrimaryFailure::Network(_) => format!(
                "Network error when calculating route for {}. Please check your connection and try again.",
                label
            ),
            PrimaryFailure::Api {
                error,
                details_message,
            } => {
                let mut message = format!("Could not calculate route for {}: {}", label, error);
                if let Some(details) = details_message {
                    message.push_str(&format!("\nDetails: {}", details));
                }
                message
            }
            PrimaryFailure::NoRoutes | PrimaryFailure::Malformed(_) => {
                format!("Could not calculate route for {}. Please try again.", label)
            }
        }
    }
}

impl From<RoutesApiError> for PrimaryFailure {
    fn from(err: RoutesApiError) -> Self {
        match err {
            RoutesApiError::Api { error, details, .. } => PrimaryFailure::Api {
                details_message: details_message(details.as_ref()).map(str::to_string),
                error,
            },
            other => PrimaryFailure::Network(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Could not calculate route: {status}")]
pub struct FallbackFailure {
    pub status: String,
}

impl From<GoogleApiError> for FallbackFailure {
    fn from(err: GoogleApiError) -> Self {
        FallbackFailure {
            status: err.to_string(),
        }
    }
}

impl From<ParseError> for FallbackFailure {
    fn from(err: ParseError) -> Self {
        FallbackFailure {
            status: err.to_string(),
        }
    }
}

/// Terminal state of one pair plus what happened on the way there.
#[derive(Debug, Clone)]
pub struct RouteFetch {
    pub state: FetchState,
    pub primary_failure: Option<PrimaryFailure>,
    pub outcome: Result<ParsedRoute, FallbackFailure>,
}

struct FetchMachine {
    state: FetchState,
}

impl FetchMachine {
    fn transition(&mut self, next: FetchState) {
        debug!(from = ?self.state, to = ?next, "Route fetch transition");
        self.state = next;
    }
}

/// Tries the primary endpoint once, then the directions service once.
pub async fn fetch_route<R, D>(primary: &R, fallback: &D, request: &RouteRequest) -> RouteFetch
where
    R: RouteService,
    D: DirectionsService,
{
    let mut machine = FetchMachine {
        state: FetchState::PrimaryPending,
    };

    let primary_result = primary
        .compute_route(request)
        .await
        .map_err(PrimaryFailure::from)
        .and_then(|response| {
            let route = response.routes.first().ok_or(PrimaryFailure::NoRoutes)?;
            parse_primary(route, request.travel_mode).map_err(PrimaryFailure::Malformed)
        });

    let failure = match primary_result {
        Ok(parsed) => {
            machine.transition(FetchState::PrimaryOk);
            return RouteFetch {
                state: machine.state,
                primary_failure: None,
                outcome: Ok(parsed),
            };
        }
        Err(failure) => failure,
    };

    error!(%failure, "Primary route request failed, falling back to directions");
    machine.transition(FetchState::PrimaryFailed);
    machine.transition(FetchState::FallbackPending);

    let directions_request = DirectionsRequest::from_route_request(request);
    let outcome = match fallback.route(&directions_request).await {
        Ok(route) => parse_fallback(&route, request.departure_time.is_some())
            .map_err(FallbackFailure::from),
        Err(err) => Err(FallbackFailure::from(err)),
    };

    match &outcome {
        Ok(_) => machine.transition(FetchState::FallbackOk),
        Err(failure) => {
            error!(%failure, "Fallback directions request failed");
            machine.transition(FetchState::FallbackFailed);
        }
    }

    RouteFetch {
        state: machine.state,
        primary_failure: Some(failure),
        outcome,
    }
}

#[cfg(test)]
mod tests {
    use commute_providers::{lat_lng::LatLng, travel_mode::TravelMode};
    use jiff::Timestamp;

    use crate::test_utils::{FakeDirections, FakeRoutes, directions_route, primary_route};

    use super::*;

    fn request(travel_mode: TravelMode) -> RouteRequest {
        RouteRequest {
            origin: LatLng::new(40.7, -74.0).into(),
            destination: LatLng::new(40.8, -73.9).into(),
            travel_mode,
            polyline_quality: Default::default(),
            routing_preference: None,
            transit_preferences: None,
            departure_time: Some("2025-06-03T12:00:00Z".parse::<Timestamp>().unwrap()),
        }
    }

    #[tokio::test]
    async fn test_primary_success_skips_fallback() {
        let routes = FakeRoutes::succeeding(primary_route(900, 1000));
        let directions = FakeDirections::succeeding(directions_route("9 mins", "1.2 mi"));

        let fetch = fetch_route(&routes, &directions, &request(TravelMode::Drive)).await;

        assert_eq!(fetch.state, FetchState::PrimaryOk);
        assert_eq!(fetch.outcome.unwrap().duration_text, "15 min");
        assert_eq!(routes.calls(), 1);
        assert_eq!(directions.calls(), 0);
    }

    #[tokio::test]
    async fn test_empty_routes_falls_back_exactly_once() {
        let routes = FakeRoutes::empty();
        let directions = FakeDirections::succeeding(directions_route("9 mins", "1.2 mi"));
        let request = request(TravelMode::TwoWheeler);

        let fetch = fetch_route(&routes, &directions, &request).await;

        assert_eq!(fetch.state, FetchState::FallbackOk);
        assert_eq!(fetch.primary_failure, Some(PrimaryFailure::NoRoutes));
        assert_eq!(directions.calls(), 1);

        let sent = directions.requests();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].origin, request.origin.lat_lng());
        assert_eq!(sent[0].destination, request.destination.lat_lng());
        assert_eq!(sent[0].departure_time, request.departure_time);
        assert_eq!(sent[0].mode.to_string(), "bicycling");

        let parsed = fetch.outcome.unwrap();
        assert_eq!(parsed.duration_text, "9 mins");
        assert_eq!(
            parsed.additional_info,
            vec!["Estimated time for specified departure"]
        );
    }

    #[tokio::test]
    async fn test_api_error_alert_includes_details() {
        let routes = FakeRoutes::failing(
            400,
            "Routes API returned status code 400",
            Some(serde_json::json!({ "error": { "message": "Invalid origin" } })),
        );
        let directions = FakeDirections::failing("ZERO_RESULTS");

        let fetch = fetch_route(&routes, &directions, &request(TravelMode::Drive)).await;

        assert_eq!(fetch.state, FetchState::FallbackFailed);
        assert_eq!(
            fetch.primary_failure.unwrap().alert_message("Loft"),
            "Could not calculate route for Loft: Routes API returned status code 400\nDetails: Invalid origin"
        );
        assert_eq!(
            fetch.outcome.unwrap_err().to_string(),
            "Could not calculate route: ZERO_RESULTS"
        );
        assert_eq!(directions.calls(), 1);
    }

    #[tokio::test]
    async fn test_malformed_primary_route_falls_back() {
        let route = serde_json::from_value(serde_json::json!({ "duration": "60s" })).unwrap();
        let routes = FakeRoutes::succeeding(route);
        let directions = FakeDirections::succeeding(directions_route("1 min", "0.1 mi"));

        let fetch = fetch_route(&routes, &directions, &request(TravelMode::Walk)).await;

        assert_eq!(fetch.state, FetchState::FallbackOk);
        assert_eq!(
            fetch.primary_failure,
            Some(PrimaryFailure::Malformed(ParseError::MissingDistance))
        );
    }

    #[test]
    fn test_alert_messages() {
        assert_eq!(
            PrimaryFailure::Network("timeout".to_string()).alert_message("Loft"),
            "Network error when calculating route for Loft. Please check your connection and try again."
        );
        assert_eq!(
            PrimaryFailure::NoRoutes.alert_message("Loft"),
            "Could not calculate route for Loft. Please try again."
        );
        assert_eq!(
            PrimaryFailure::Api {
                error: "quota".to_string(),
                details_message: None
            }
            .alert_message("Loft"),
            "Could not calculate route for Loft: quota"
        );
    }
}
