use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::{error::ApiError, state::AppState};

#[derive(Deserialize)]
pub struct AutocompleteQuery {
    #[serde(default)]
    input: String,
}

#[derive(Serialize)]
pub struct AutocompleteResponse {
    suggestions: Vec<String>,
}

pub async fn autocomplete_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AutocompleteQuery>,
) -> Result<Json<AutocompleteResponse>, ApiError> {
    let input = query.input.trim();
    if input.is_empty() {
        return Ok(Json(AutocompleteResponse {
            suggestions: vec![],
        }));
    }

    let suggestions = state
        .places_client
        .autocomplete(input)
        .await
        .map_err(|err| {
            error!("Autocomplete failed: {}", err);
            ApiError::InternalServerError(err.to_string())
        })?;

    Ok(Json(AutocompleteResponse { suggestions }))
}
