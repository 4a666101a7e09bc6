use serde::{Deserialize, Serialize};

/// How the page would render as a Google search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchPreview {
    pub title: String,
    pub display_url: String,
    pub description: String,
}

/// Share card as rendered by Facebook or Twitter/X.
///
/// `image` is `None` when the page declares no image for the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardPreview {
    pub domain: String,
    pub title: String,
    pub description: String,
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub card_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialPreviews {
    pub google: SearchPreview,
    pub facebook: CardPreview,
    pub twitter: CardPreview,
}
