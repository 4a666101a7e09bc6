use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

pub mod preview;

pub use preview::{CardPreview, SearchPreview, SocialPreviews};

// ============================================================================
// Metadata
// ============================================================================

/// Flat mapping from lower-cased tag key to its value.
///
/// Absence is represented by a missing key, never by an empty string: every
/// insert path rejects values that are empty or whitespace-only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MetadataMap(BTreeMap<String, String>);

impl MetadataMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Insert `value` as given, overwriting any previous value.
    /// Returns `false` (and leaves the map untouched) for blank values.
    pub fn insert_non_empty(&mut self, key: impl Into<String>, value: &str) -> bool {
        if value.trim().is_empty() {
            return false;
        }
        self.0.insert(key.into(), value.to_string());
        true
    }

    /// Like [`insert_non_empty`](Self::insert_non_empty) but never replaces an
    /// existing key.
    pub fn insert_if_absent(&mut self, key: impl Into<String>, value: &str) -> bool {
        let key = key.into();
        if self.0.contains_key(&key) {
            return false;
        }
        self.insert_non_empty(key, value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: AsRef<str>> FromIterator<(K, V)> for MetadataMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = MetadataMap::new();
        for (key, value) in iter {
            map.insert_non_empty(key, value.as_ref());
        }
        map
    }
}

impl<'de> Deserialize<'de> for MetadataMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Same insert path as extraction, so blank values are dropped.
        BTreeMap::<String, String>::deserialize(deserializer).map(|raw| raw.into_iter().collect())
    }
}

// ============================================================================
// Findings
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Good,
    Warning,
    Error,
}

/// Outcome of a single check.
///
/// `recommendation` is serialized as `null` when absent. A good finding may
/// still carry a tip (see the Open Graph image check).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub status: Status,
    pub message: String,
    pub recommendation: Option<String>,
}

impl Finding {
    pub fn good(message: impl Into<String>) -> Self {
        Finding {
            status: Status::Good,
            message: message.into(),
            recommendation: None,
        }
    }

    pub fn warning(message: impl Into<String>, recommendation: impl Into<String>) -> Self {
        Finding {
            status: Status::Warning,
            message: message.into(),
            recommendation: Some(recommendation.into()),
        }
    }

    pub fn error(message: impl Into<String>, recommendation: impl Into<String>) -> Self {
        Finding {
            status: Status::Error,
            message: message.into(),
            recommendation: Some(recommendation.into()),
        }
    }

    pub fn with_tip(mut self, tip: impl Into<String>) -> Self {
        self.recommendation = Some(tip.into());
        self
    }
}

/// The fixed catalog of checks. Variant order is the display order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
pub enum Check {
    #[serde(rename = "Title Tag")]
    #[strum(serialize = "Title Tag")]
    TitleTag,
    #[serde(rename = "Meta Description")]
    #[strum(serialize = "Meta Description")]
    MetaDescription,
    #[serde(rename = "Meta Keywords")]
    #[strum(serialize = "Meta Keywords")]
    MetaKeywords,
    #[serde(rename = "Open Graph Title")]
    #[strum(serialize = "Open Graph Title")]
    OpenGraphTitle,
    #[serde(rename = "Open Graph Description")]
    #[strum(serialize = "Open Graph Description")]
    OpenGraphDescription,
    #[serde(rename = "Open Graph Image")]
    #[strum(serialize = "Open Graph Image")]
    OpenGraphImage,
    #[serde(rename = "Twitter Card")]
    #[strum(serialize = "Twitter Card")]
    TwitterCard,
    #[serde(rename = "Canonical URL")]
    #[strum(serialize = "Canonical URL")]
    CanonicalUrl,
    #[serde(rename = "Language Declaration")]
    #[strum(serialize = "Language Declaration")]
    LanguageDeclaration,
    #[serde(rename = "Viewport Meta Tag")]
    #[strum(serialize = "Viewport Meta Tag")]
    ViewportMetaTag,
    #[serde(rename = "Robots Meta Tag")]
    #[strum(serialize = "Robots Meta Tag")]
    RobotsMetaTag,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckCategory {
    Basic,
    Social,
    Technical,
}

impl Check {
    pub fn name(self) -> &'static str {
        self.into()
    }

    pub fn category(self) -> CheckCategory {
        match self {
            Check::TitleTag | Check::MetaDescription | Check::MetaKeywords => CheckCategory::Basic,
            Check::OpenGraphTitle
            | Check::OpenGraphDescription
            | Check::OpenGraphImage
            | Check::TwitterCard => CheckCategory::Social,
            Check::CanonicalUrl
            | Check::LanguageDeclaration
            | Check::ViewportMetaTag
            | Check::RobotsMetaTag => CheckCategory::Technical,
        }
    }
}

/// One finding per catalog entry, keyed by check name when serialized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnalysisReport(BTreeMap<Check, Finding>);

impl AnalysisReport {
    pub fn get(&self, check: Check) -> Option<&Finding> {
        self.0.get(&check)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Check, &Finding)> {
        self.0.iter().map(|(check, finding)| (*check, finding))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn count(&self, status: Status) -> usize {
        self.0.values().filter(|f| f.status == status).count()
    }
}

impl FromIterator<(Check, Finding)> for AnalysisReport {
    fn from_iter<I: IntoIterator<Item = (Check, Finding)>>(iter: I) -> Self {
        AnalysisReport(iter.into_iter().collect())
    }
}

// ============================================================================
// Page signals
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredData {
    pub json_ld: bool,
    pub microdata: bool,
    pub rdfa: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSpeedIndicators {
    pub external_scripts: usize,
    pub external_stylesheets: usize,
    pub inline_styles: usize,
    pub images_without_alt: usize,
}

/// Document-level observations that are not part of the metadata map.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSignals {
    pub structured_data: StructuredData,
    pub page_speed: PageSpeedIndicators,
    pub reading_time_minutes: u32,
}

// ============================================================================
// Fetch results
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSuccess {
    pub url: String,
    pub timestamp: DateTime<Utc>,
    /// HTTP status of the fetch; `None` for caller-supplied markup.
    pub status_code: Option<u16>,
    pub meta_tags: MetadataMap,
    pub seo_analysis: AnalysisReport,
    pub signals: PageSignals,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisFailure {
    pub url: String,
    pub timestamp: DateTime<Utc>,
    pub error: String,
}

/// Result of one analysis request. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum FetchResult {
    Success(AnalysisSuccess),
    Failure(AnalysisFailure),
}

impl FetchResult {
    pub fn failure(url: impl Into<String>, error: impl Into<String>) -> Self {
        FetchResult::Failure(AnalysisFailure {
            url: url.into(),
            timestamp: Utc::now(),
            error: error.into(),
        })
    }
}

/// Downloadable report shape (`seo_analysis_<domain>.json`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportReport {
    pub url: String,
    pub analysis_date: DateTime<Utc>,
    pub seo_score: u8,
    pub seo_analysis: AnalysisReport,
    pub meta_tags: MetadataMap,
}
