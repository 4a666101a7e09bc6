use serde::{Deserialize, Serialize};

use crate::models::{AnalysisReport, Status};

/// Share of checks that passed, as a percentage. Drives the dashboard and the
/// exported `seo_score`.
pub fn pass_rate_score(report: &AnalysisReport) -> u8 {
    let total = report.len();
    if total == 0 {
        return 0;
    }
    let good = report.count(Status::Good);
    percentage(100.0 * good as f64 / total as f64)
}

/// Mean of per-check points (good 100, warning 70, error 0).
pub fn weighted_score(report: &AnalysisReport) -> u8 {
    let total = report.len();
    if total == 0 {
        return 0;
    }
    let points: u32 = report
        .iter()
        .map(|(_, finding)| status_points(finding.status))
        .sum();
    percentage(f64::from(points) / total as f64)
}

fn status_points(status: Status) -> u32 {
    match status {
        Status::Good => 100,
        Status::Warning => 70,
        Status::Error => 0,
    }
}

fn percentage(value: f64) -> u8 {
    value.round().clamp(0.0, 100.0) as u8
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    Excellent,
    Good,
    NeedsWork,
}

impl ScoreBand {
    pub fn for_score(score: u8) -> Self {
        match score {
            80.. => ScoreBand::Excellent,
            60..=79 => ScoreBand::Good,
            _ => ScoreBand::NeedsWork,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MetadataMap;
    use crate::seo::rules::analyze;

    fn optimized_tags() -> MetadataMap {
        let description = "d".repeat(140);
        [
            ("title", "A well sized page title for search results"),
            ("description", description.as_str()),
            ("og:title", "Share title"),
            ("og:description", "Share description"),
            ("og:image", "https://example.com/og.png"),
            ("twitter:card", "summary"),
            ("canonical", "https://example.com/"),
            ("lang", "en"),
            ("viewport", "width=device-width, initial-scale=1"),
            ("robots", "index, follow"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn empty_report_scores_zero() {
        let report = AnalysisReport::default();
        assert_eq!(pass_rate_score(&report), 0);
        assert_eq!(weighted_score(&report), 0);
    }

    #[test]
    fn all_good_scores_hundred() {
        let report = analyze(&optimized_tags());
        assert_eq!(report.count(Status::Good), 11);
        assert_eq!(pass_rate_score(&report), 100);
        assert_eq!(weighted_score(&report), 100);
    }

    #[test]
    fn empty_map_scores() {
        // Keywords and robots pass when absent; 2 errors and 7 warnings remain.
        let report = analyze(&MetadataMap::new());
        assert_eq!(report.count(Status::Good), 2);
        assert_eq!(pass_rate_score(&report), 18);
        assert_eq!(weighted_score(&report), 63);
    }

    #[test]
    fn worst_case_scores() {
        let tags: MetadataMap = [("keywords", "a, b"), ("robots", "noindex")]
            .into_iter()
            .collect();
        let report = analyze(&tags);
        assert_eq!(report.count(Status::Error), 2);
        assert_eq!(report.count(Status::Warning), 9);
        assert_eq!(pass_rate_score(&report), 0);
        // (0 + 0 + 9 * 70) / 11 = 57.27
        assert_eq!(weighted_score(&report), 57);
    }

    #[test]
    fn bands() {
        assert_eq!(ScoreBand::for_score(100), ScoreBand::Excellent);
        assert_eq!(ScoreBand::for_score(80), ScoreBand::Excellent);
        assert_eq!(ScoreBand::for_score(79), ScoreBand::Good);
        assert_eq!(ScoreBand::for_score(60), ScoreBand::Good);
        assert_eq!(ScoreBand::for_score(59), ScoreBand::NeedsWork);
    }
}
