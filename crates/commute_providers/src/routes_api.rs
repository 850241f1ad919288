use std::future::Future;

use jiff::Timestamp;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};

use crate::{google_api::ROUTES_API_URL, lat_lng::LatLng, travel_mode::TravelMode};

const FIELD_MASK: &str =
    "routes.duration,routes.distanceMeters,routes.polyline,routes.legs,routes.staticDuration";
const TRANSIT_FIELD_MASK: &str = ",routes.legs.steps.transitDetails,routes.legs.stepsOverview";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Waypoint {
    pub location: WaypointLocation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct WaypointLocation {
    pub lat_lng: LatLng,
}

impl From<LatLng> for Waypoint {
    fn from(lat_lng: LatLng) -> Self {
        Waypoint {
            location: WaypointLocation { lat_lng },
        }
    }
}

impl Waypoint {
    pub fn lat_lng(&self) -> LatLng {
        self.location.lat_lng
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PolylineQuality {
    #[default]
    HighQuality,
    Overview,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoutingPreference {
    TrafficUnaware,
    TrafficAware,
    TrafficAwareOptimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransitRoutingPreference {
    LessWalking,
    FewerTransfers,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransitPreferences {
    pub routing_preference: TransitRoutingPreference,
}

/// Body of a `computeRoutes` call, also the body accepted by `/api/route`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RouteRequest {
    pub origin: Waypoint,
    pub destination: Waypoint,
    pub travel_mode: TravelMode,
    #[serde(default)]
    pub polyline_quality: PolylineQuality,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub routing_preference: Option<RoutingPreference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transit_preferences: Option<TransitPreferences>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub departure_time: Option<Timestamp>,
}

impl RouteRequest {
    /// Rewrites the preferences into the combination the Routes API accepts
    /// for the request's travel mode.
    pub fn normalized(mut self) -> Self {
        match self.travel_mode {
            TravelMode::Transit => {
                self.routing_preference = None;
                self.transit_preferences = Some(TransitPreferences {
                    routing_preference: TransitRoutingPreference::LessWalking,
                });
            }
            TravelMode::Walk | TravelMode::Bicycle => {
                self.routing_preference = None;
                self.transit_preferences = None;
            }
            TravelMode::Drive | TravelMode::TwoWheeler => {
                self.transit_preferences = None;
                self.routing_preference = Some(if self.departure_time.is_some() {
                    RoutingPreference::TrafficAwareOptimal
                } else {
                    RoutingPreference::TrafficAware
                });
            }
        }

        self
    }

    pub fn field_mask(&self) -> String {
        let mut mask = FIELD_MASK.to_string();
        if self.travel_mode == TravelMode::Transit {
            mask.push_str(TRANSIT_FIELD_MASK);
        }
        mask
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutesResponse {
    #[serde(default)]
    pub routes: Vec<Route>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    /// Seconds with a trailing unit marker, e.g. `"1834s"`
    pub duration: Option<String>,
    /// Duration without traffic, same encoding as `duration`
    pub static_duration: Option<String>,
    pub distance_meters: Option<u64>,
    pub polyline: Option<EncodedPolyline>,
    #[serde(default)]
    pub legs: Vec<RouteLeg>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncodedPolyline {
    pub encoded_polyline: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteLeg {
    #[serde(default)]
    pub steps: Vec<RouteLegStep>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteLegStep {
    pub transit_details: Option<TransitDetails>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitDetails {
    pub transit_line: Option<TransitLine>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitLine {
    pub name: Option<String>,
    pub name_short: Option<String>,
}

/// Error payload returned by `/api/route`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

pub fn details_message(details: Option<&Value>) -> Option<&str> {
    details
        .and_then(|details| details.pointer("/error/message"))
        .and_then(Value::as_str)
}

#[derive(Debug, Error)]
pub enum RoutesApiError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("{error}")]
    Api {
        status: u16,
        error: String,
        details: Option<Value>,
    },

    #[error("Deserialization error: {0}")]
    Deserialize(#[from] serde_json::Error),
}

impl RoutesApiError {
    pub fn to_error_body(&self) -> RouteErrorBody {
        match self {
            RoutesApiError::Api { error, details, .. } => RouteErrorBody {
                error: error.clone(),
                details: details.clone(),
            },
            other => RouteErrorBody {
                error: other.to_string(),
                details: None,
            },
        }
    }

    pub fn status(&self) -> u16 {
        match self {
            RoutesApiError::Api { status, .. } => *status,
            _ => 500,
        }
    }
}

/// Primary routing endpoint.
pub trait RouteService: Send + Sync {
    fn compute_route(
        &self,
        request: &RouteRequest,
    ) -> impl Future<Output = Result<RoutesResponse, RoutesApiError>> + Send;
}

#[derive(Clone)]
pub struct GoogleRoutesClient {
    api_key: String,
    url: String,
    client: reqwest::Client,
}

impl GoogleRoutesClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            url: ROUTES_API_URL.to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Sends the normalized request and returns the upstream body untouched.
    pub async fn compute_routes_raw(&self, request: &RouteRequest) -> Result<Value, RoutesApiError> {
        let request = request.clone().normalized();

        match request.departure_time {
            Some(departure_time) => info!("Using departure time: {}", departure_time),
            None => info!("No departure time specified, using current traffic conditions"),
        }
        debug!(
            "Sending request to Routes API: {}",
            serde_json::to_string(&request)?
        );

        let response = self
            .client
            .post(&self.url)
            .header("X-Goog-Api-Key", &self.api_key)
            .header("X-Goog-FieldMask", request.field_mask())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        info!("Routes API response status: {}", status.as_u16());
        debug!(
            "Routes API response content: {}",
            text.chars().take(500).collect::<String>()
        );

        if status.as_u16() != 200 {
            let details = if text.is_empty() {
                serde_json::json!({ "message": "No response content" })
            } else {
                serde_json::from_str(&text).unwrap_or(Value::String(text))
            };

            return Err(RoutesApiError::Api {
                status: status.as_u16(),
                error: format!("Routes API returned status code {}", status.as_u16()),
                details: Some(details),
            });
        }

        Ok(serde_json::from_str(&text)?)
    }
}

impl RouteService for GoogleRoutesClient {
    async fn compute_route(&self, request: &RouteRequest) -> Result<RoutesResponse, RoutesApiError> {
        let body = self.compute_routes_raw(request).await?;
        Ok(serde_json::from_value(body)?)
    }
}
