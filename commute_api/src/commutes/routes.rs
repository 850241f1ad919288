use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use crate::{
    commutes::handlers::{
        calculate_handler, clear_handler, map_handler, snapshot_handler, sort_handler,
        visibility_handler,
    },
    state::AppState,
};

pub fn commute_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/",
            post(calculate_handler)
                .get(snapshot_handler)
                .delete(clear_handler),
        )
        .route("/sort", post(sort_handler))
        .route("/results/{result_id}/visibility", post(visibility_handler))
        .route("/map", get(map_handler))
        .with_state(state)
}
