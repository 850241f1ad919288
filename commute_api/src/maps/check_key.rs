use std::{collections::BTreeMap, sync::Arc};

use axum::{Json, extract::State};
use commute_providers::diagnostics::ApiCheck;
use tracing::info;

use crate::{error::ApiError, state::AppState};

/// Probes every Maps API the app relies on with the configured key.
pub async fn check_key_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<BTreeMap<String, ApiCheck>>, ApiError> {
    let results = state.diagnostics.check_api_key_permissions().await;

    let failing: Vec<&str> = results
        .iter()
        .filter(|(_, check)| !check.success)
        .map(|(name, _)| name.as_str())
        .collect();
    info!(?failing, "Checked API key permissions");

    Ok(Json(results))
}
