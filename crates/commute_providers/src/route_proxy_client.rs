use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, error};

use crate::routes_api::{Route, RouteRequest, RouteService, RoutesApiError, RoutesResponse};

/// Either a route list or an `{ error, details }` payload, as answered by `/api/route`.
#[derive(Deserialize)]
struct RouteEndpointBody {
    #[serde(default)]
    routes: Vec<Route>,
    error: Option<String>,
    details: Option<Value>,
}

/// Primary routing through the local `/api/route` pass-through.
#[derive(Clone)]
pub struct RouteProxyClient {
    endpoint: String,
    client: reqwest::Client,
}

impl RouteProxyClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            client: reqwest::Client::new(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl RouteService for RouteProxyClient {
    async fn compute_route(&self, request: &RouteRequest) -> Result<RoutesResponse, RoutesApiError> {
        debug!("Route request body: {}", serde_json::to_string(request)?);

        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            error!("HTTP error! Status: {}", status.as_u16());
        }

        let text = response.text().await?;
        interpret_body(status.as_u16(), &text)
    }
}

fn interpret_body(status: u16, text: &str) -> Result<RoutesResponse, RoutesApiError> {
    let body: RouteEndpointBody = serde_json::from_str(text)?;

    if !body.routes.is_empty() {
        return Ok(RoutesResponse {
            routes: body.routes,
        });
    }

    match body.error {
        Some(error) => Err(RoutesApiError::Api {
            status,
            error,
            details: body.details,
        }),
        None => Ok(RoutesResponse::default()),
    }
}
