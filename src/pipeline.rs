//! Request-level entry points: fetch → parse → extract → analyze.
//!
//! Only URL validation can fail with an error; everything after it is
//! reported as a [`FetchResult`].

use chrono::Utc;
use tracing::{error, info, warn};
use url::Url;

use crate::document::HtmlDocument;
use crate::error::{AppError, AppResult};
use crate::fetch::{ensure_public_host, parse_target_url, FetchError, PageFetcher};
pub use crate::fetch::HostPolicy;
use crate::models::{AnalysisSuccess, FetchResult};
use crate::seo::{analyze_document, DocumentAnalysis};

/// Validate `input`, then fetch and analyze it.
///
/// Returns `Err` only for input that is rejected before any fetch: a
/// malformed URL or, under [`HostPolicy::PublicOnly`], a private host.
pub async fn analyze_input(
    fetcher: &PageFetcher,
    input: &str,
    policy: HostPolicy,
) -> AppResult<FetchResult> {
    let url = parse_target_url(input)?;

    if policy == HostPolicy::PublicOnly {
        match ensure_public_host(&url).await {
            Ok(()) => {}
            Err(FetchError::PrivateAddress) => {
                return Err(AppError::Validation(FetchError::PrivateAddress.to_string()))
            }
            Err(e) => return Ok(fetch_failure(&url, e)),
        }
    }

    Ok(analyze_url(fetcher, &url, policy).await)
}

/// Fetch and analyze an already validated URL. Redirect targets are vetted
/// against `policy`; `url` itself is not.
pub async fn analyze_url(fetcher: &PageFetcher, url: &Url, policy: HostPolicy) -> FetchResult {
    let page = match fetcher.fetch(url, policy).await {
        Ok(page) => page,
        Err(e) => return fetch_failure(url, e),
    };

    info!(url = %url, status = page.status_code, bytes = page.body.len(), "Fetched page");

    let body = page.body;
    let parsed = tokio::task::spawn_blocking(move || {
        analyze_document(&HtmlDocument::from_bytes(&body))
    })
    .await;

    match parsed {
        Ok(analysis) => success(url, Some(page.status_code), analysis),
        Err(e) => {
            error!(error = ?e, url = %url, "Page analysis aborted");
            FetchResult::failure(url.as_str(), format!("Analysis error: {e}"))
        }
    }
}

/// Analyze markup the caller already has. No network access.
pub async fn analyze_markup(url: &Url, html: String) -> FetchResult {
    let parsed =
        tokio::task::spawn_blocking(move || analyze_document(&HtmlDocument::parse(&html))).await;

    match parsed {
        Ok(analysis) => success(url, None, analysis),
        Err(e) => {
            error!(error = ?e, url = %url, "Markup analysis aborted");
            FetchResult::failure(url.as_str(), format!("Analysis error: {e}"))
        }
    }
}

fn fetch_failure(url: &Url, e: FetchError) -> FetchResult {
    warn!(error = ?e, url = %url, "Failed to fetch URL for analysis");
    FetchResult::failure(url.as_str(), format!("Failed to fetch URL: {e}"))
}

fn success(url: &Url, status_code: Option<u16>, analysis: DocumentAnalysis) -> FetchResult {
    FetchResult::Success(AnalysisSuccess {
        url: url.to_string(),
        timestamp: Utc::now(),
        status_code,
        meta_tags: analysis.meta_tags,
        seo_analysis: analysis.seo_analysis,
        signals: analysis.signals,
    })
}
