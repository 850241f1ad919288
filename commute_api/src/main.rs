mod commutes;
mod error;
mod maps;
mod route;
mod state;

use crate::commutes::routes::commute_routes;
use crate::maps::autocomplete::autocomplete_handler;
use crate::maps::check_key::check_key_handler;
use crate::route::route_handler::route_handler;
use crate::state::AppState;
use axum::http::Method;
use axum::routing::{get, post};
use axum::{Router, serve};
use commute_providers::config::ProviderConfig;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tracing::{Level, info};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const API_ADDR_ENV_VAR: &str = "COMMUTE_API_ADDR";
const DEFAULT_API_ADDR: &str = "127.0.0.1:8080";

fn app(state: Arc<AppState>) -> Router {
    let cors_layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_origin(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/route", post(route_handler))
        .route("/api/check-key", get(check_key_handler))
        .route("/api/autocomplete", get(autocomplete_handler))
        .with_state(state.clone())
        .nest("/api/commutes", commute_routes(state))
        .layer(ServiceBuilder::new().layer(cors_layer))
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenvy::from_filename("./.env.local").ok();
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let config = ProviderConfig::from_env()?;
    let state = Arc::new(AppState::new(&config.api_key));

    let addr = std::env::var(API_ADDR_ENV_VAR).unwrap_or_else(|_| DEFAULT_API_ADDR.to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    serve(listener, app(state)).await?;

    Ok(())
}
