use crate::document::{Document, Node};
use crate::models::MetadataMap;

/// Collect the page's metadata into a flat map.
///
/// Sources, in precedence order: `<title>`, `<meta name|property>`,
/// `<link rel="canonical">`, `<html lang>`. A source never overwrites a key
/// filled by an earlier one. Among meta tags the last non-empty value wins.
pub fn extract<D: Document>(doc: &D) -> MetadataMap {
    let mut tags = MetadataMap::new();

    if let Some(title) = doc.find_first("title") {
        tags.insert_non_empty("title", title.text_content().trim());
    }

    for (key, content) in meta_tags(doc).iter() {
        tags.insert_if_absent(key, content);
    }

    if let Some(href) = canonical_href(doc) {
        tags.insert_if_absent("canonical", &href);
    }

    if let Some(lang) = doc
        .find_first("html")
        .and_then(|html| html.attribute("lang").map(str::to_string))
    {
        tags.insert_if_absent("lang", &lang);
    }

    tags
}

fn meta_tags<D: Document>(doc: &D) -> MetadataMap {
    let mut tags = MetadataMap::new();
    for meta in doc.find_all("meta") {
        let key = meta
            .attribute("name")
            .filter(|name| !name.is_empty())
            .or_else(|| meta.attribute("property").filter(|p| !p.is_empty()));
        let Some(key) = key else { continue };

        let content = meta.attribute("content").unwrap_or_default().trim();
        tags.insert_non_empty(key.to_lowercase(), content);
    }
    tags
}

fn canonical_href<D: Document>(doc: &D) -> Option<String> {
    doc.find_all("link")
        .into_iter()
        .find(|link| {
            link.attribute("rel").is_some_and(|rel| {
                rel.split_ascii_whitespace()
                    .any(|r| r.eq_ignore_ascii_case("canonical"))
            })
        })
        .and_then(|link| link.attribute("href").map(str::to_string))
}

#[cfg(test)]
pub(crate) mod fake {
    use crate::document::{Document, Node};

    /// In-memory stand-in for a parsed page.
    #[derive(Default)]
    pub struct FakeDocument {
        elements: Vec<FakeElement>,
    }

    pub struct FakeElement {
        tag: String,
        attrs: Vec<(String, String)>,
        text: String,
    }

    impl FakeDocument {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with(mut self, tag: &str, attrs: &[(&str, &str)], text: &str) -> Self {
            self.elements.push(FakeElement {
                tag: tag.to_string(),
                attrs: attrs
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
                text: text.to_string(),
            });
            self
        }

        pub fn meta(self, attrs: &[(&str, &str)]) -> Self {
            self.with("meta", attrs, "")
        }
    }

    impl Node for &FakeElement {
        fn attribute(&self, name: &str) -> Option<&str> {
            self.attrs
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.as_str())
        }

        fn text_content(&self) -> String {
            self.text.clone()
        }
    }

    impl Document for FakeDocument {
        type Node<'a> = &'a FakeElement;

        fn find_all(&self, tag: &str) -> Vec<&FakeElement> {
            self.elements
                .iter()
                .filter(|e| tag == "*" || e.tag == tag)
                .collect()
        }
    }
}
