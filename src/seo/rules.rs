//! The fixed battery of SEO checks.
//!
//! Every rule is a pure function of the metadata map; rules never look at each
//! other's output. Lengths are counted in characters, not bytes.

use strum::IntoEnumIterator;

use crate::models::{AnalysisReport, Check, Finding, MetadataMap};

pub const TITLE_MIN_CHARS: usize = 30;
pub const TITLE_MAX_CHARS: usize = 60;
pub const DESCRIPTION_MIN_CHARS: usize = 120;
pub const DESCRIPTION_MAX_CHARS: usize = 160;
pub const OG_TITLE_MAX_CHARS: usize = 95;
pub const OG_DESCRIPTION_MAX_CHARS: usize = 300;

pub type Rule = fn(&MetadataMap) -> Finding;

impl Check {
    pub fn rule(self) -> Rule {
        match self {
            Check::TitleTag => title,
            Check::MetaDescription => description,
            Check::MetaKeywords => keywords,
            Check::OpenGraphTitle => og_title,
            Check::OpenGraphDescription => og_description,
            Check::OpenGraphImage => og_image,
            Check::TwitterCard => twitter_card,
            Check::CanonicalUrl => canonical,
            Check::LanguageDeclaration => language,
            Check::ViewportMetaTag => viewport,
            Check::RobotsMetaTag => robots,
        }
    }

    pub fn evaluate(self, tags: &MetadataMap) -> Finding {
        (self.rule())(tags)
    }
}

/// Run every check in the catalog against `tags`.
pub fn analyze(tags: &MetadataMap) -> AnalysisReport {
    Check::iter()
        .map(|check| (check, check.evaluate(tags)))
        .collect()
}

fn char_len(value: &str) -> usize {
    value.chars().count()
}

fn title(tags: &MetadataMap) -> Finding {
    let Some(title) = tags.get("title") else {
        return Finding::error(
            "Title tag is missing",
            "Add a title tag with 50-60 characters including your target keywords",
        );
    };

    let length = char_len(title);
    if length < TITLE_MIN_CHARS {
        Finding::warning(
            format!("Title is too short ({length} characters)"),
            "Expand your title to 50-60 characters for better SEO",
        )
    } else if length > TITLE_MAX_CHARS {
        Finding::warning(
            format!(
                "Title is too long ({length} characters) - may be truncated in search results"
            ),
            "Reduce title length to 50-60 characters",
        )
    } else {
        Finding::good(format!("Title length is optimal ({length} characters)"))
    }
}

fn description(tags: &MetadataMap) -> Finding {
    let Some(description) = tags.get("description") else {
        return Finding::error(
            "Meta description is missing",
            "Add a meta description with 150-160 characters describing your page content",
        );
    };

    let length = char_len(description);
    if length < DESCRIPTION_MIN_CHARS {
        Finding::warning(
            format!("Meta description is too short ({length} characters)"),
            "Expand your description to 150-160 characters for better visibility",
        )
    } else if length > DESCRIPTION_MAX_CHARS {
        Finding::warning(
            format!("Meta description is too long ({length} characters) - may be truncated"),
            "Reduce description length to 150-160 characters",
        )
    } else {
        Finding::good(format!(
            "Meta description length is optimal ({length} characters)"
        ))
    }
}

fn keywords(tags: &MetadataMap) -> Finding {
    if tags.contains_key("keywords") {
        Finding::warning(
            "Meta keywords tag found (not recommended)",
            "Remove meta keywords tag as it's not used by modern search engines and may be ignored",
        )
    } else {
        Finding::good("Meta keywords tag not found (recommended - not used by search engines)")
    }
}

fn og_title(tags: &MetadataMap) -> Finding {
    let Some(og_title) = tags.get("og:title") else {
        return Finding::warning(
            "Open Graph title is missing",
            "Add og:title for better social media sharing",
        );
    };

    let length = char_len(og_title);
    if length > OG_TITLE_MAX_CHARS {
        Finding::warning(
            format!("Open Graph title is too long ({length} characters)"),
            "Keep Open Graph title under 95 characters",
        )
    } else {
        Finding::good(format!(
            "Open Graph title is present and well-sized ({length} characters)"
        ))
    }
}

fn og_description(tags: &MetadataMap) -> Finding {
    let Some(og_description) = tags.get("og:description") else {
        return Finding::warning(
            "Open Graph description is missing",
            "Add og:description for better social media sharing",
        );
    };

    let length = char_len(og_description);
    if length > OG_DESCRIPTION_MAX_CHARS {
        Finding::warning(
            format!("Open Graph description is too long ({length} characters)"),
            "Keep Open Graph description under 300 characters",
        )
    } else {
        Finding::good(format!(
            "Open Graph description is present and well-sized ({length} characters)"
        ))
    }
}

// Good, but still carries a sizing tip.
fn og_image(tags: &MetadataMap) -> Finding {
    if tags.contains_key("og:image") {
        Finding::good("Open Graph image is present")
            .with_tip("Ensure image is 1200x630px for optimal display")
    } else {
        Finding::warning(
            "Open Graph image is missing",
            "Add og:image for better social media sharing (recommended size: 1200x630px)",
        )
    }
}

fn twitter_card(tags: &MetadataMap) -> Finding {
    match tags.get("twitter:card") {
        Some(card) => Finding::good(format!("Twitter Card type is set to \"{card}\"")),
        None => Finding::warning(
            "Twitter Card type is missing",
            "Add twitter:card meta tag (summary, summary_large_image, etc.)",
        ),
    }
}

fn canonical(tags: &MetadataMap) -> Finding {
    if tags.contains_key("canonical") {
        Finding::good("Canonical URL is present")
    } else {
        Finding::warning(
            "Canonical URL is missing",
            "Add canonical URL to prevent duplicate content issues",
        )
    }
}

fn language(tags: &MetadataMap) -> Finding {
    match tags.get("lang") {
        Some(lang) => Finding::good(format!("Language is declared as \"{lang}\"")),
        None => Finding::warning(
            "Language declaration is missing",
            "Add lang attribute to <html> tag for accessibility and SEO",
        ),
    }
}

fn viewport(tags: &MetadataMap) -> Finding {
    if tags.contains_key("viewport") {
        Finding::good("Viewport meta tag is present")
    } else {
        Finding::warning(
            "Viewport meta tag is missing",
            "Add viewport meta tag for mobile responsiveness",
        )
    }
}

fn robots(tags: &MetadataMap) -> Finding {
    match tags.get("robots") {
        None => Finding::good("No robots meta tag (default behavior)"),
        Some(directive) if directive.to_lowercase().contains("noindex") => Finding::warning(
            format!("Page is set to noindex: \"{directive}\""),
            "Review robots directive if page should be indexed",
        ),
        Some(directive) => Finding::good(format!("Robots directive: \"{directive}\"")),
    }
}
