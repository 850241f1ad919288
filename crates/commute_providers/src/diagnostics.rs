use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::json;
use tracing::{error, info};

use crate::google_api::{
    DIRECTIONS_API_URL, GEOCODING_API_URL, MAPS_JAVASCRIPT_API_URL, ROUTES_API_URL,
};

const MESSAGE_PREVIEW_CHARS: usize = 500;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ApiCheckStatus {
    Code(u16),
    Error(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiCheck {
    pub status: ApiCheckStatus,
    pub success: bool,
    pub message: String,
}

enum Probe {
    Get {
        name: &'static str,
        url: String,
        query: Vec<(&'static str, String)>,
    },
    Post {
        name: &'static str,
        url: String,
        headers: Vec<(&'static str, String)>,
        payload: serde_json::Value,
    },
}

impl Probe {
    fn name(&self) -> &'static str {
        match self {
            Probe::Get { name, .. } | Probe::Post { name, .. } => *name,
        }
    }
}

/// Probes every Maps service the tool relies on with the configured key.
pub struct KeyDiagnostics {
    api_key: String,
    client: reqwest::Client,
}

impl KeyDiagnostics {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            client: reqwest::Client::new(),
        }
    }

    fn probes(&self) -> Vec<Probe> {
        let key = self.api_key.clone();

        vec![
            Probe::Get {
                name: "Maps JavaScript API",
                url: MAPS_JAVASCRIPT_API_URL.to_string(),
                query: vec![("key", key.clone()), ("callback", "initMap".to_string())],
            },
            Probe::Get {
                name: "Geocoding API",
                url: GEOCODING_API_URL.to_string(),
                query: vec![("address", "New York".to_string()), ("key", key.clone())],
            },
            Probe::Get {
                name: "Directions API (Legacy)",
                url: DIRECTIONS_API_URL.to_string(),
                query: vec![
                    ("origin", "New York".to_string()),
                    ("destination", "Boston".to_string()),
                    ("key", key.clone()),
                ],
            },
            Probe::Post {
                name: "Routes API",
                url: ROUTES_API_URL.to_string(),
                headers: vec![
                    ("X-Goog-Api-Key", key),
                    ("X-Goog-FieldMask", "routes.duration".to_string()),
                ],
                payload: json!({
                    "origin": { "location": { "latLng": { "latitude": 40.7128, "longitude": -74.0060 } } },
                    "destination": { "location": { "latLng": { "latitude": 42.3601, "longitude": -71.0589 } } },
                    "travelMode": "DRIVE"
                }),
            },
        ]
    }

    pub async fn check_api_key_permissions(&self) -> BTreeMap<String, ApiCheck> {
        let mut results = BTreeMap::new();

        for probe in self.probes() {
            let name = probe.name();
            info!("Testing API: {}", name);

            let check = match self.send(&probe).await {
                Ok((status, text)) => {
                    info!("API {} returned status {}", name, status);
                    ApiCheck {
                        status: ApiCheckStatus::Code(status),
                        success: is_success(status),
                        message: preview(&text),
                    }
                }
                Err(err) => {
                    error!("Error testing API {}: {}", name, err);
                    ApiCheck {
                        status: ApiCheckStatus::Error(String::from("Error")),
                        success: false,
                        message: err.to_string(),
                    }
                }
            };

            results.insert(name.to_string(), check);
        }

        results
    }

    async fn send(&self, probe: &Probe) -> Result<(u16, String), reqwest::Error> {
        let response = match probe {
            Probe::Get { url, query, .. } => self.client.get(url).query(query).send().await?,
            Probe::Post {
                url,
                headers,
                payload,
                ..
            } => {
                let mut request = self.client.post(url).json(payload);
                for (name, value) in headers {
                    request = request.header(*name, value);
                }
                request.send().await?
            }
        };

        let status = response.status().as_u16();
        let text = response.text().await?;
        Ok((status, text))
    }
}

/// The JavaScript loader answers 303 when the key is accepted.
fn is_success(status: u16) -> bool {
    (200..300).contains(&status) || status == 303
}

fn preview(text: &str) -> String {
    text.chars().take(MESSAGE_PREVIEW_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_success() {
        assert!(is_success(200));
        assert!(is_success(204));
        assert!(is_success(303));
        assert!(!is_success(302));
        assert!(!is_success(403));
    }

    #[test]
    fn test_preview_truncates() {
        let long = "x".repeat(800);
        assert_eq!(preview(&long).len(), 500);
        assert_eq!(preview("short"), "short");
    }

    #[test]
    fn test_probes_cover_every_service() {
        let diagnostics = KeyDiagnostics::new("test-key");
        let names: Vec<&str> = diagnostics.probes().iter().map(Probe::name).collect();

        assert_eq!(
            names,
            vec![
                "Maps JavaScript API",
                "Geocoding API",
                "Directions API (Legacy)",
                "Routes API"
            ]
        );
    }

    #[test]
    fn test_status_serialization() {
        let check = ApiCheck {
            status: ApiCheckStatus::Error(String::from("Error")),
            success: false,
            message: String::from("timeout"),
        };
        assert_eq!(
            serde_json::to_value(&check).unwrap(),
            json!({ "status": "Error", "success": false, "message": "timeout" })
        );
    }
}
