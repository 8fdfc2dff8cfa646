use serde::{Deserialize, Serialize};

use crate::model::Resource;

/// Category selection that disables category narrowing.
pub const ALL_CATEGORIES: &str = "all";

/// Narrow `resources` by exact category, then by case-insensitive text query.
///
/// `category == "all"` keeps every category. An empty `query` skips text
/// narrowing; it is not trimmed, so `" "` still narrows. Source order is
/// preserved and the input is never modified.
pub fn filter<'a>(resources: &'a [Resource], category: &str, query: &str) -> Vec<&'a Resource> {
    let needle = (!query.is_empty()).then(|| query.to_lowercase());

    resources
        .iter()
        .filter(|r| category == ALL_CATEGORIES || r.category == category)
        .filter(|r| match &needle {
            Some(needle) => r.matches_lowercase(needle),
            None => true,
        })
        .collect()
}

/// UI-driven filter selection. Owned by the host and passed in on each call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub category: String,
    #[serde(default)]
    pub query: String,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            category: ALL_CATEGORIES.to_string(),
            query: String::new(),
        }
    }
}

impl FilterState {
    pub fn new(category: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            query: query.into(),
        }
    }

    pub fn apply<'a>(&self, resources: &'a [Resource]) -> Vec<&'a Resource> {
        filter(resources, &self.category, &self.query)
    }
}
