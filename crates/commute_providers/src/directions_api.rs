use std::{fmt::Display, future::Future};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    google_api::{DIRECTIONS_API_URL, GoogleApiError, get_json},
    lat_lng::LatLng,
    routes_api::RouteRequest,
    travel_mode::TravelMode,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DirectionsMode {
    Driving,
    Walking,
    Bicycling,
    Transit,
}

impl From<TravelMode> for DirectionsMode {
    fn from(mode: TravelMode) -> Self {
        match mode {
            TravelMode::Drive => DirectionsMode::Driving,
            TravelMode::Walk => DirectionsMode::Walking,
            // The directions service has no two-wheeler profile
            TravelMode::Bicycle | TravelMode::TwoWheeler => DirectionsMode::Bicycling,
            TravelMode::Transit => DirectionsMode::Transit,
        }
    }
}

impl Display for DirectionsMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                DirectionsMode::Driving => "driving",
                DirectionsMode::Walking => "walking",
                DirectionsMode::Bicycling => "bicycling",
                DirectionsMode::Transit => "transit",
            }
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DirectionsRequest {
    pub origin: LatLng,
    pub destination: LatLng,
    pub mode: DirectionsMode,
    pub departure_time: Option<Timestamp>,
}

impl DirectionsRequest {
    pub fn from_route_request(request: &RouteRequest) -> Self {
        DirectionsRequest {
            origin: request.origin.lat_lng(),
            destination: request.destination.lat_lng(),
            mode: request.travel_mode.into(),
            departure_time: request.departure_time,
        }
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("origin", self.origin.to_query_value()),
            ("destination", self.destination.to_query_value()),
            ("mode", self.mode.to_string()),
            ("units", String::from("imperial")),
        ];

        if let Some(departure_time) = self.departure_time {
            query.push(("departure_time", departure_time.as_second().to_string()));
        }

        query
    }
}

#[derive(Debug, Clone, Deserialize)]
struct DirectionsResponse {
    status: String,
    #[serde(default)]
    routes: Vec<DirectionsRoute>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DirectionsRoute {
    pub overview_polyline: Option<OverviewPolyline>,
    #[serde(default)]
    pub legs: Vec<DirectionsLeg>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OverviewPolyline {
    pub points: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DirectionsLeg {
    pub duration: Option<TextValue>,
    pub distance: Option<TextValue>,
}

/// Human readable text plus its raw value, as the directions service reports both.
#[derive(Debug, Clone, Deserialize)]
pub struct TextValue {
    pub text: String,
    pub value: f64,
}

/// Secondary routing used when the primary endpoint fails.
pub trait DirectionsService: Send + Sync {
    fn route(
        &self,
        request: &DirectionsRequest,
    ) -> impl Future<Output = Result<DirectionsRoute, GoogleApiError>> + Send;
}

#[derive(Clone)]
pub struct GoogleDirectionsClient {
    api_key: String,
    url: String,
    client: reqwest::Client,
}

impl GoogleDirectionsClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            url: DIRECTIONS_API_URL.to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }
}

impl DirectionsService for GoogleDirectionsClient {
    async fn route(&self, request: &DirectionsRequest) -> Result<DirectionsRoute, GoogleApiError> {
        debug!("Directions request: {:?}", request);

        let response: DirectionsResponse =
            get_json(&self.client, &self.url, &self.api_key, &request.query()).await?;

        first_route(response)
    }
}

fn first_route(response: DirectionsResponse) -> Result<DirectionsRoute, GoogleApiError> {
    if response.status != "OK" {
        return Err(GoogleApiError::Status(response.status));
    }

    response
        .routes
        .into_iter()
        .next()
        .ok_or_else(|| GoogleApiError::Status(String::from("ZERO_RESULTS")))
}
