//! Axum router configuration with middleware.
//!
//! Page routes and the chat relay are handled here; `/admin` and `/static`
//! belong to the backend and are passed through; `/assets` serves this
//! client's own files from `assets_dir`.

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{any, get, post};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::http::handlers::{page, proxy, relay};
use crate::state::AppState;

/// Build the complete router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let assets = ServeDir::new(&state.config.assets_dir);
    let body_limit = state.config.body_limit_bytes;

    Router::new()
        .route("/", get(page::index))
        .route("/setlang", post(page::setlang))
        .route("/diagnose", post(page::diagnose))
        .route("/api/openai", post(relay::openai))
        // Backend-owned paths
        .route("/admin", any(proxy::pass_through))
        .route("/admin/{*path}", any(proxy::pass_through))
        .route("/static/{*path}", any(proxy::pass_through))
        .nest_service("/assets", assets)
        .route("/health", get(health_check))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - Liveness probe; does not touch the backend.
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
