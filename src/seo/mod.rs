//! Metadata extraction and the SEO rule engine.

pub mod extractor;
pub mod insights;
pub mod preview;
pub mod report;
pub mod rules;
pub mod score;

pub use extractor::extract;
pub use preview::{format_preview, get_domain};
pub use report::{export_report, Dashboard};
pub use rules::analyze;
pub use score::{pass_rate_score, weighted_score, ScoreBand};

use crate::document::Document;
use crate::models::{AnalysisReport, MetadataMap, PageSignals};

/// Output of analyzing one parsed document.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentAnalysis {
    pub meta_tags: MetadataMap,
    pub seo_analysis: AnalysisReport,
    pub signals: PageSignals,
}

/// Extract, analyze and collect page signals for `doc`. Never fails.
pub fn analyze_document<D: Document>(doc: &D) -> DocumentAnalysis {
    let meta_tags = extract(doc);
    let seo_analysis = analyze(&meta_tags);
    DocumentAnalysis {
        seo_analysis,
        signals: insights::page_signals(doc),
        meta_tags,
    }
}
