use axum::{extract::Query, Json};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{validation_error, AppResult};
use crate::seo::{format_preview, get_domain};

#[derive(Debug, Deserialize, Validate)]
pub struct FormatPreviewRequest {
    pub text: Option<String>,
    #[validate(range(min = 1, max = 10_000, message = "max_length must be 1–10000"))]
    pub max_length: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FormatPreviewResponse {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct DomainQuery {
    pub url: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DomainResponse {
    pub domain: String,
}

/// POST /preview/format: Truncate text the way the social previews do.
pub async fn format_preview_text(
    Json(req): Json<FormatPreviewRequest>,
) -> AppResult<Json<FormatPreviewResponse>> {
    req.validate().map_err(validation_error)?;
    Ok(Json(FormatPreviewResponse {
        text: format_preview(req.text.as_deref(), req.max_length),
    }))
}

/// GET /domain?url=<encoded-url>
pub async fn domain_of(Query(params): Query<DomainQuery>) -> Json<DomainResponse> {
    Json(DomainResponse {
        domain: get_domain(&params.url),
    })
}
