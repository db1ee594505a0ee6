use crate::config::Labels;
use crate::types::ContentNode;
use serde::Serialize;

/// Head metadata for a rendered page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MetaTags {
    pub title: String,
    pub description: Option<String>,
    pub og_image: Option<String>,
}

impl MetaTags {
    /// Metadata authored on the node, falling back to the node name for the
    /// title.
    pub fn from_node(node: &ContentNode) -> Self {
        let tags = node.content.metatags();
        let title = tags
            .map(|t| t.title.trim())
            .filter(|t| !t.is_empty())
            .unwrap_or(node.name.as_str())
            .to_string();
        MetaTags {
            title,
            description: tags.and_then(|t| non_empty(&t.description)),
            og_image: tags.and_then(|t| non_empty(&t.og_image)),
        }
    }

    /// Metadata for a request that found no content.
    pub fn not_found(labels: &Labels) -> Self {
        MetaTags {
            title: labels.not_found_title.clone(),
            description: Some(labels.not_found_description.clone()),
            og_image: None,
        }
    }

    /// Metadata for a request whose content lookup failed.
    pub fn error(labels: &Labels) -> Self {
        MetaTags {
            title: labels.error_title.clone(),
            description: Some(labels.error_description.clone()),
            og_image: None,
        }
    }

    /// Key/value pairs for `<meta>` tags.
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("title", self.title.clone()), ("og:title", self.title.clone())];
        if let Some(description) = &self.description {
            pairs.push(("description", description.clone()));
            pairs.push(("og:description", description.clone()));
        }
        if let Some(image) = &self.og_image {
            pairs.push(("og:image", image.clone()));
        }
        pairs
    }
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}
