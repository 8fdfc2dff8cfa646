use serde::{Deserialize, Serialize};

/// A static content item in the resources browser (meditation, article, tool, ...).
///
/// Only `title`, `description`, `category` and `tags` take part in filtering;
/// the optional fields are category-specific display data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub id: u32,
    pub title: String,
    pub description: String,
    /// Open-ended tag such as "meditation", "article" or "tool".
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Meditations only, e.g. "10 min".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    /// Articles only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_src: Option<String>,
    /// Tools only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_url: Option<String>,
}

impl Resource {
    /// Call-to-action shown on the resource card.
    pub fn action_label(&self) -> &'static str {
        match self.category.as_str() {
            "meditation" => "Listen Now",
            "article" => "Read Article",
            "tool" => "Open Tool",
            _ => "View Resource",
        }
    }

    /// Case-insensitive substring match against title, description and tags.
    /// `needle` must already be lowercased.
    pub(crate) fn matches_lowercase(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
            || self
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(needle))
    }
}

/// A category present in the catalog, with the number of resources in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub key: String,
    pub resource_count: usize,
}
