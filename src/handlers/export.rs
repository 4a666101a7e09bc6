use axum::{
    extract::State,
    http::{header, HeaderName},
    Json,
};
use tracing::info;
use validator::Validate;

use crate::error::{validation_error, AppError, AppResult};
use crate::handlers::analyze::AnalyzeRequest;
use crate::models::FetchResult;
use crate::pipeline::analyze_input;
use crate::seo::export_report;
use crate::seo::report::export_filename;
use crate::state::AppState;

/// POST /export: Analyze a page and return the downloadable JSON report.
///
/// The body is pretty-printed and served as an attachment named after the
/// page's domain.
pub async fn export_analysis(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeRequest>,
) -> AppResult<([(HeaderName, String); 2], String)> {
    req.validate().map_err(validation_error)?;

    let success = match analyze_input(&state.fetcher, &req.url, state.host_policy).await? {
        FetchResult::Success(success) => success,
        FetchResult::Failure(failure) => return Err(AppError::Fetch(failure.error)),
    };

    let report = export_report(&success);
    let body = serde_json::to_string_pretty(&report).map_err(|e| {
        tracing::error!(error = ?e, "Failed to serialize export report");
        AppError::Internal
    })?;

    info!(url = %success.url, score = report.seo_score, "Exported analysis report");

    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", export_filename(&success.url)),
            ),
        ],
        body,
    ))
}
