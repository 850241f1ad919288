use crate::error::ApiError;
use crate::state::AppState;
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use commute_providers::routes_api::RouteRequest;
use commute_providers::travel_mode::TravelMode;
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info};

pub struct RouteResponse(Value);

impl IntoResponse for RouteResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self.0)).into_response()
    }
}

/// Validates the travel mode (defaulting to `DRIVE`) before the body is
/// read as a typed request.
fn parse_route_request(mut body: Value) -> Result<RouteRequest, ApiError> {
    let travel_mode: TravelMode = match body.get("travelMode") {
        None | Some(Value::Null) => TravelMode::default(),
        Some(Value::String(mode)) => mode
            .parse()
            .map_err(|err: commute_providers::travel_mode::InvalidTravelMode| {
                error!("{}", err);
                ApiError::BadRequest(err.to_string())
            })?,
        Some(other) => {
            return Err(ApiError::BadRequest(format!(
                "Invalid travel mode: {}",
                other
            )));
        }
    };

    let object = body
        .as_object_mut()
        .ok_or_else(|| ApiError::BadRequest("Request body must be a JSON object".to_string()))?;
    object.insert(
        "travelMode".to_string(),
        Value::String(travel_mode.as_str().to_string()),
    );

    serde_json::from_value(body).map_err(|err| ApiError::BadRequest(err.to_string()))
}

pub async fn route_handler(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> Result<RouteResponse, ApiError> {
    info!("Received route request: {}", body);

    let request = parse_route_request(body)?;
    let response = state
        .routes_client
        .compute_routes_raw(&request)
        .await
        .inspect_err(|err| error!("Error in Routes API call: {}", err))?;

    Ok(RouteResponse(response))
}
