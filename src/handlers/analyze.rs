use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tracing::info;
use validator::Validate;

use crate::error::{validation_error, AppResult};
use crate::fetch::parse_target_url;
use crate::models::FetchResult;
use crate::pipeline::{analyze_input, analyze_markup};
use crate::seo::Dashboard;
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize, Validate)]
pub struct AnalyzeRequest {
    #[validate(length(min = 1, max = 2048, message = "URL must be 1–2048 characters"))]
    pub url: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct AnalyzeMarkupRequest {
    #[validate(length(min = 1, max = 2048, message = "URL must be 1–2048 characters"))]
    pub url: String,
    #[validate(length(max = 2_000_000, message = "HTML must be at most 2 MB"))]
    pub html: String,
}

/// The fetch result plus, on success, the dashboard derived from it.
#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    #[serde(flatten)]
    pub result: FetchResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dashboard: Option<Dashboard>,
}

impl AnalyzeResponse {
    fn from_result(result: FetchResult) -> (StatusCode, Json<Self>) {
        let (status, dashboard) = match &result {
            FetchResult::Success(success) => (StatusCode::OK, Some(Dashboard::for_success(success))),
            FetchResult::Failure(_) => (StatusCode::BAD_GATEWAY, None),
        };
        (status, Json(AnalyzeResponse { result, dashboard }))
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /analyze: Fetch a page and run the full SEO analysis.
///
/// Invalid URLs are rejected with 400 before any network access. Fetch
/// failures come back as a `failure` payload with 502.
pub async fn analyze_page(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeRequest>,
) -> AppResult<(StatusCode, Json<AnalyzeResponse>)> {
    req.validate().map_err(validation_error)?;

    info!(url = %req.url, "Analyzing page");
    let result = analyze_input(&state.fetcher, &req.url, state.host_policy).await?;

    Ok(AnalyzeResponse::from_result(result))
}

/// POST /analyze/html: Analyze markup supplied by the caller.
pub async fn analyze_page_markup(
    Json(req): Json<AnalyzeMarkupRequest>,
) -> AppResult<(StatusCode, Json<AnalyzeResponse>)> {
    req.validate().map_err(validation_error)?;
    let url = parse_target_url(&req.url)?;

    info!(url = %url, bytes = req.html.len(), "Analyzing supplied markup");
    let result = analyze_markup(&url, req.html).await;

    Ok(AnalyzeResponse::from_result(result))
}
