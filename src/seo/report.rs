use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::{AnalysisSuccess, Check, CheckCategory, ExportReport, SocialPreviews};
use crate::seo::insights::{
    checks_by_category, group_meta_tags, looks_like_image_url, prioritized_recommendations,
    MetaTagGroups, Recommendation, StatusCounts,
};
use crate::seo::preview::{build_previews, get_domain};
use crate::seo::score::{pass_rate_score, weighted_score, ScoreBand};

/// Everything the dashboard shows for one successful analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dashboard {
    pub seo_score: u8,
    pub weighted_score: u8,
    pub band: ScoreBand,
    pub counts: StatusCounts,
    pub categories: BTreeMap<CheckCategory, Vec<Check>>,
    pub recommendations: Vec<Recommendation>,
    pub previews: SocialPreviews,
    pub meta_tag_groups: MetaTagGroups,
    /// `None` when the page declares no `og:image`.
    pub og_image_looks_valid: Option<bool>,
}

impl Dashboard {
    pub fn for_success(success: &AnalysisSuccess) -> Self {
        let report = &success.seo_analysis;
        let seo_score = pass_rate_score(report);

        Dashboard {
            seo_score,
            weighted_score: weighted_score(report),
            band: ScoreBand::for_score(seo_score),
            counts: StatusCounts::of(report),
            categories: checks_by_category(report),
            recommendations: prioritized_recommendations(report),
            previews: build_previews(&success.url, &success.meta_tags),
            meta_tag_groups: group_meta_tags(&success.meta_tags),
            og_image_looks_valid: success.meta_tags.get("og:image").map(looks_like_image_url),
        }
    }
}

pub fn export_report(success: &AnalysisSuccess) -> ExportReport {
    ExportReport {
        url: success.url.clone(),
        analysis_date: success.timestamp,
        seo_score: pass_rate_score(&success.seo_analysis),
        seo_analysis: success.seo_analysis.clone(),
        meta_tags: success.meta_tags.clone(),
    }
}

/// Download name for an exported report, e.g. `seo_analysis_example.com.json`.
pub fn export_filename(url: &str) -> String {
    let domain: String = get_domain(url)
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '.' | '-') { c } else { '_' })
        .collect();
    format!("seo_analysis_{domain}.json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MetadataMap, PageSignals};
    use crate::seo::rules::analyze;
    use chrono::Utc;

    fn success(tags: MetadataMap) -> AnalysisSuccess {
        AnalysisSuccess {
            url: "https://example.com/post".into(),
            timestamp: Utc::now(),
            status_code: Some(200),
            seo_analysis: analyze(&tags),
            meta_tags: tags,
            signals: PageSignals::default(),
        }
    }

    #[test]
    fn dashboard_for_empty_page() {
        let dashboard = Dashboard::for_success(&success(MetadataMap::new()));
        assert_eq!(dashboard.seo_score, 18);
        assert_eq!(dashboard.weighted_score, 63);
        assert_eq!(dashboard.band, ScoreBand::NeedsWork);
        assert_eq!(dashboard.counts.error, 2);
        assert_eq!(dashboard.recommendations.len(), 9);
        assert!(dashboard.og_image_looks_valid.is_none());
    }

    #[test]
    fn dashboard_checks_og_image() {
        let tags: MetadataMap = [("og:image", "https://example.com/share")].into_iter().collect();
        let dashboard = Dashboard::for_success(&success(tags));
        assert_eq!(dashboard.og_image_looks_valid, Some(false));
    }

    #[test]
    fn export_round_trips() {
        let tags: MetadataMap = [("title", "Hello"), ("robots", "noindex")].into_iter().collect();
        let export = export_report(&success(tags));
        let json = serde_json::to_string_pretty(&export).unwrap();
        let back: ExportReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back, export);
    }

    #[test]
    fn export_has_expected_keys() {
        let export = export_report(&success(MetadataMap::new()));
        let json = serde_json::to_value(&export).unwrap();
        for key in ["url", "analysis_date", "seo_score", "seo_analysis", "meta_tags"] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
        assert_eq!(json["seo_score"], 18);
        assert!(json["seo_analysis"]["Robots Meta Tag"]["recommendation"].is_null());
    }

    #[test]
    fn filename_uses_domain() {
        assert_eq!(
            export_filename("https://example.com/a"),
            "seo_analysis_example.com.json"
        );
        assert_eq!(
            export_filename("http://127.0.0.1:3000/"),
            "seo_analysis_127.0.0.1_3000.json"
        );
    }
}
