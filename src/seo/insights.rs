use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::document::{Document, Node};
use crate::models::{
    AnalysisReport, Check, CheckCategory, MetadataMap, PageSignals, PageSpeedIndicators, Status,
    StructuredData,
};

const WORDS_PER_MINUTE: usize = 200;
const IMAGE_EXTENSIONS: [&str; 6] = [".jpg", ".jpeg", ".png", ".gif", ".webp", ".svg"];

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

// ── Recommendations ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub priority: Priority,
    pub check: Check,
    pub message: String,
    pub recommendation: String,
}

/// Actionable recommendations, errors (high priority) before warnings
/// (medium). Good findings are never listed, even when they carry a tip.
pub fn prioritized_recommendations(report: &AnalysisReport) -> Vec<Recommendation> {
    let collect = |status: Status, priority: Priority| {
        report
            .iter()
            .filter(move |(_, f)| f.status == status)
            .filter_map(move |(check, f)| {
                f.recommendation.as_ref().map(|rec| Recommendation {
                    priority,
                    check,
                    message: f.message.clone(),
                    recommendation: rec.clone(),
                })
            })
    };

    collect(Status::Error, Priority::High)
        .chain(collect(Status::Warning, Priority::Medium))
        .collect()
}

// ── Summaries ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub good: usize,
    pub warning: usize,
    pub error: usize,
}

impl StatusCounts {
    pub fn of(report: &AnalysisReport) -> Self {
        StatusCounts {
            good: report.count(Status::Good),
            warning: report.count(Status::Warning),
            error: report.count(Status::Error),
        }
    }
}

/// Check names grouped under their dashboard tab.
pub fn checks_by_category(report: &AnalysisReport) -> BTreeMap<CheckCategory, Vec<Check>> {
    let mut groups: BTreeMap<CheckCategory, Vec<Check>> = BTreeMap::new();
    for (check, _) in report.iter() {
        groups.entry(check.category()).or_default().push(check);
    }
    groups
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaTagGroups {
    pub basic: MetadataMap,
    pub open_graph: MetadataMap,
    pub twitter: MetadataMap,
    pub other: MetadataMap,
}

pub fn group_meta_tags(tags: &MetadataMap) -> MetaTagGroups {
    let mut groups = MetaTagGroups::default();
    for (key, value) in tags.iter() {
        let group = if key.starts_with("og:") {
            &mut groups.open_graph
        } else if key.starts_with("twitter:") {
            &mut groups.twitter
        } else if matches!(key, "title" | "description" | "keywords") {
            &mut groups.basic
        } else {
            &mut groups.other
        };
        group.insert_non_empty(key, value);
    }
    groups
}

/// Loose check that a URL points at an image: a known extension or the word
/// "image" anywhere in it.
pub fn looks_like_image_url(url: &str) -> bool {
    if url.is_empty() {
        return false;
    }
    let lower = url.to_lowercase();
    IMAGE_EXTENSIONS.iter().any(|ext| lower.contains(ext)) || lower.contains("image")
}

// ── Page signals ───────────────────────────────────────────────────────────

/// Collapse runs of whitespace into single spaces and trim.
pub fn clean_text(text: &str) -> String {
    WHITESPACE.replace_all(text, " ").trim().to_string()
}

/// Minutes needed to read `text` at 200 words per minute; never less than one
/// for non-empty text.
pub fn reading_time_minutes(text: &str) -> u32 {
    let words = text.split_whitespace().count();
    if words == 0 {
        return 0;
    }
    let minutes = (words as f64 / WORDS_PER_MINUTE as f64).round_ties_even() as u32;
    minutes.max(1)
}

pub fn detect_structured_data<D: Document>(doc: &D) -> StructuredData {
    let json_ld = doc
        .find_all("script")
        .iter()
        .any(|s| s.attribute("type") == Some("application/ld+json"));

    let elements = doc.find_all("*");
    StructuredData {
        json_ld,
        microdata: elements.iter().any(|e| e.attribute("itemscope").is_some()),
        rdfa: elements.iter().any(|e| e.attribute("typeof").is_some()),
    }
}

pub fn page_speed_indicators<D: Document>(doc: &D) -> PageSpeedIndicators {
    let external_scripts = doc
        .find_all("script")
        .iter()
        .filter(|s| s.attribute("src").is_some())
        .count();

    let external_stylesheets = doc
        .find_all("link")
        .iter()
        .filter(|l| {
            l.attribute("rel").is_some_and(|rel| {
                rel.split_ascii_whitespace()
                    .any(|r| r.eq_ignore_ascii_case("stylesheet"))
            })
        })
        .count();

    let images_without_alt = doc
        .find_all("img")
        .iter()
        .filter(|img| img.attribute("alt").map_or(true, str::is_empty))
        .count();

    PageSpeedIndicators {
        external_scripts,
        external_stylesheets,
        inline_styles: doc.find_all("style").len(),
        images_without_alt,
    }
}

pub fn page_signals<D: Document>(doc: &D) -> PageSignals {
    let body_text = doc
        .find_first("body")
        .map(|body| clean_text(&body.text_content()))
        .unwrap_or_default();

    PageSignals {
        structured_data: detect_structured_data(doc),
        page_speed: page_speed_indicators(doc),
        reading_time_minutes: reading_time_minutes(&body_text),
    }
}
