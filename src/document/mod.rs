//! Navigable document tree used by the extractor.
//!
//! The extractor only needs four capabilities: find the first element with a
//! tag, find all elements with a tag, read an attribute and read the text
//! content. [`HtmlDocument`] provides them on top of `scraper`; tests use an
//! in-memory tree instead.

use scraper::{ElementRef, Html, Selector};

pub trait Node {
    fn attribute(&self, name: &str) -> Option<&str>;

    /// Concatenated text of the element and all its descendants.
    fn text_content(&self) -> String;
}

pub trait Document {
    type Node<'a>: Node
    where
        Self: 'a;

    /// All elements named `tag` in document order. `"*"` matches every element.
    fn find_all(&self, tag: &str) -> Vec<Self::Node<'_>>;

    fn find_first(&self, tag: &str) -> Option<Self::Node<'_>> {
        self.find_all(tag).into_iter().next()
    }
}

/// A parsed HTML page. Parsing never fails; malformed markup is repaired the
/// way browsers do it.
pub struct HtmlDocument {
    html: Html,
}

impl HtmlDocument {
    pub fn parse(markup: &str) -> Self {
        HtmlDocument {
            html: Html::parse_document(markup),
        }
    }

    /// Decode a fetched body lossily and parse it.
    pub fn from_bytes(body: &[u8]) -> Self {
        Self::parse(&String::from_utf8_lossy(body))
    }
}

impl Document for HtmlDocument {
    type Node<'a> = ElementRef<'a>;

    fn find_all(&self, tag: &str) -> Vec<ElementRef<'_>> {
        match Selector::parse(tag) {
            Ok(selector) => self.html.select(&selector).collect(),
            Err(e) => {
                tracing::debug!(tag, error = ?e, "Ignoring unparseable tag selector");
                Vec::new()
            }
        }
    }
}

impl Node for ElementRef<'_> {
    fn attribute(&self, name: &str) -> Option<&str> {
        self.value().attr(name)
    }

    fn text_content(&self) -> String {
        self.text().collect()
    }
}
