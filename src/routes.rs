use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Application routes without the process-global layers (metrics, CORS),
/// so integration tests can build as many routers as they need.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        // Analysis
        .route("/analyze", post(handlers::analyze::analyze_page))
        .route("/analyze/html", post(handlers::analyze::analyze_page_markup))
        .route("/export", post(handlers::export::export_analysis))
        // Preview helpers
        .route(
            "/preview/format",
            post(handlers::preview::format_preview_text),
        )
        .route("/domain", get(handlers::preview::domain_of))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
