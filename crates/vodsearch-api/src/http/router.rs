//! Axum router configuration with middleware.
//!
//! Middleware: CORS (allow-any; the feeder and the web player live on
//! other origins) and request tracing.
//!
//! When a web directory is configured and exists, it is served with an
//! index.html fallback for client-side routing. API routes take priority;
//! without the directory, only the API is served.

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState, web_dir: Option<&str>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut router = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/add", post(handlers::catalog::add_records))
        .route("/query", post(handlers::catalog::query_records))
        .route("/save", post(handlers::catalog::save_snapshot))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    if let Some(web_dir) = web_dir
        && std::path::Path::new(web_dir).exists()
    {
        let index_path = format!("{web_dir}/index.html");
        let serve_dir = ServeDir::new(web_dir).fallback(ServeFile::new(index_path));
        router = router.fallback_service(serve_dir);
        tracing::info!(path = %web_dir, "static web UI serving enabled");
    }

    router
}
