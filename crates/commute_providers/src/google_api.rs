use serde::de::DeserializeOwned;
use thiserror::Error;

pub const MAPS_JAVASCRIPT_API_URL: &str = "https://maps.googleapis.com/maps/api/js";
pub const GEOCODING_API_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";
pub const DIRECTIONS_API_URL: &str = "https://maps.googleapis.com/maps/api/directions/json";
pub const PLACES_AUTOCOMPLETE_API_URL: &str =
    "https://maps.googleapis.com/maps/api/place/autocomplete/json";
pub const ROUTES_API_URL: &str = "https://routes.googleapis.com/directions/v2:computeRoutes";

#[derive(Debug, Error)]
pub enum GoogleApiError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// The web service answered but with a non-`OK` status field.
    #[error("{0}")]
    Status(String),

    #[error("Deserialization error: {0}")]
    Deserialize(#[from] serde_json::Error),
}

/// Shared GET for the legacy `*/json` web services, which all authenticate
/// through a `key` query parameter.
pub(crate) async fn get_json<T>(
    client: &reqwest::Client,
    url: &str,
    api_key: &str,
    query: &[(&str, String)],
) -> Result<T, GoogleApiError>
where
    T: DeserializeOwned,
{
    let response = client
        .get(url)
        .query(query)
        .query(&[("key", api_key)])
        .send()
        .await?;

    let status = response.status();
    let text = response.text().await?;

    if !status.is_success() {
        return Err(GoogleApiError::Api {
            status: status.as_u16(),
            message: text,
        });
    }

    Ok(serde_json::from_str(&text)?)
}
