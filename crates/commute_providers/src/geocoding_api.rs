use std::future::Future;

use serde::Deserialize;
use tracing::debug;

use crate::{
    google_api::{GEOCODING_API_URL, GoogleApiError, get_json},
    lat_lng::LatLng,
};

/// Turns free text into a coordinate. One request per address.
pub trait Geocoder: Send + Sync {
    fn geocode(&self, address: &str) -> impl Future<Output = Result<LatLng, GoogleApiError>> + Send;
}

#[derive(Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Deserialize)]
struct GeocodeResult {
    geometry: GeocodeGeometry,
}

#[derive(Deserialize)]
struct GeocodeGeometry {
    location: GeocodeLocation,
}

#[derive(Deserialize)]
struct GeocodeLocation {
    lat: f64,
    lng: f64,
}

#[derive(Clone)]
pub struct GoogleGeocoder {
    api_key: String,
    url: String,
    client: reqwest::Client,
}

impl GoogleGeocoder {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            url: GEOCODING_API_URL.to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }
}

impl Geocoder for GoogleGeocoder {
    async fn geocode(&self, address: &str) -> Result<LatLng, GoogleApiError> {
        debug!("Geocoding: {}", address);

        let response: GeocodeResponse = get_json(
            &self.client,
            &self.url,
            &self.api_key,
            &[("address", address.to_string())],
        )
        .await?;

        first_location(response)
    }
}

fn first_location(response: GeocodeResponse) -> Result<LatLng, GoogleApiError> {
    match (response.status.as_str(), response.results.first()) {
        ("OK", Some(result)) => Ok(LatLng::new(
            result.geometry.location.lat,
            result.geometry.location.lng,
        )),
        ("OK", None) | ("ZERO_RESULTS", _) => {
            Err(GoogleApiError::Status("ZERO_RESULTS".to_string()))
        }
        (status, _) => Err(GoogleApiError::Status(match &response.error_message {
            Some(message) => format!("{}: {}", status, message),
            None => status.to_string(),
        })),
    }
}
