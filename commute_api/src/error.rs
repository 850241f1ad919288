use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use commute_planner::planner::PlannerError;
use commute_providers::routes_api::{RouteErrorBody, RoutesApiError};
use serde_json::json;

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Conflict(String),
    InternalServerError(String),
    NotFound(String),
    /// Error payload from the Routes API, passed on with its status.
    Upstream {
        status: StatusCode,
        body: RouteErrorBody,
    },
}

impl From<anyhow::Error> for ApiError {
    fn from(error: anyhow::Error) -> Self {
        ApiError::InternalServerError(error.to_string())
    }
}

impl From<PlannerError> for ApiError {
    fn from(error: PlannerError) -> Self {
        match error {
            PlannerError::Input(err) => ApiError::BadRequest(err.to_string()),
            err @ PlannerError::Superseded(_) => ApiError::Conflict(err.to_string()),
        }
    }
}

impl From<RoutesApiError> for ApiError {
    fn from(error: RoutesApiError) -> Self {
        ApiError::Upstream {
            status: StatusCode::from_u16(error.status())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            body: error.to_error_body(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(message) => (StatusCode::INTERNAL_SERVER_ERROR, message),
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::Conflict(message) => (StatusCode::CONFLICT, message),
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, message),
            ApiError::Upstream { status, body } => return (status, Json(body)).into_response(),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
