use url::Url;

use crate::models::{CardPreview, MetadataMap, SearchPreview, SocialPreviews};

pub const NO_TEXT: &str = "No text available";

pub const GOOGLE_TITLE_CHARS: usize = 60;
pub const GOOGLE_DESCRIPTION_CHARS: usize = 160;
pub const FACEBOOK_TITLE_CHARS: usize = 95;
pub const FACEBOOK_DESCRIPTION_CHARS: usize = 160;
pub const TWITTER_TITLE_CHARS: usize = 70;
pub const TWITTER_DESCRIPTION_CHARS: usize = 125;

/// Shorten `text` to at most `max_length` characters plus an ellipsis.
///
/// Cuts at the last space of the window when that space sits in the final
/// 20% of it, otherwise cuts mid-word.
pub fn format_preview(text: Option<&str>, max_length: usize) -> String {
    let text = match text {
        Some(t) if !t.is_empty() => t,
        _ => return NO_TEXT.to_string(),
    };

    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_length {
        return text.to_string();
    }

    let window = &chars[..max_length];
    let cut = match window.iter().rposition(|c| *c == ' ') {
        Some(space) if space as f64 >= max_length as f64 * 0.8 => space,
        _ => max_length,
    };

    let mut shortened: String = window[..cut].iter().collect();
    shortened.push_str("...");
    shortened
}

/// Host (and port, if any) of `url`; the input itself when it cannot be parsed.
pub fn get_domain(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) if !parsed.authority().is_empty() => parsed.authority().to_string(),
        _ => url.to_string(),
    }
}

/// Render the Google, Facebook and Twitter/X previews for a page.
pub fn build_previews(url: &str, tags: &MetadataMap) -> SocialPreviews {
    let domain = get_domain(url);
    let title = tags.get("title");
    let description = tags.get("description");

    let google = SearchPreview {
        title: format_preview(Some(title.unwrap_or("No title found")), GOOGLE_TITLE_CHARS),
        display_url: format!("{domain} ›"),
        description: format_preview(
            Some(description.unwrap_or(
                "No description available - this will hurt your click-through rate",
            )),
            GOOGLE_DESCRIPTION_CHARS,
        ),
    };

    let facebook = CardPreview {
        domain: domain.to_uppercase(),
        title: format_preview(
            Some(tags.get("og:title").or(title).unwrap_or("No title")),
            FACEBOOK_TITLE_CHARS,
        ),
        description: format_preview(
            Some(
                tags.get("og:description")
                    .or(description)
                    .unwrap_or("No description"),
            ),
            FACEBOOK_DESCRIPTION_CHARS,
        ),
        image: tags.get("og:image").map(str::to_string),
        card_type: None,
    };

    let twitter = CardPreview {
        domain,
        title: format_preview(
            Some(tags.get("twitter:title").or(title).unwrap_or("No title")),
            TWITTER_TITLE_CHARS,
        ),
        description: format_preview(
            Some(
                tags.get("twitter:description")
                    .or(description)
                    .unwrap_or("No description"),
            ),
            TWITTER_DESCRIPTION_CHARS,
        ),
        image: tags.get("twitter:image").map(str::to_string),
        card_type: tags.get("twitter:card").map(str::to_string),
    };

    SocialPreviews {
        google,
        facebook,
        twitter,
    }
}
