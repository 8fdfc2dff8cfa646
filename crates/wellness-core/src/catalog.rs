use std::collections::HashSet;

use crate::error::CoreError;
use crate::filter::FilterState;
use crate::model::{CategorySummary, Resource};

/// The fixed, ordered resource collection, loaded once at startup.
#[derive(Debug, Clone, Default)]
pub struct ResourceCatalog {
    resources: Vec<Resource>,
}

impl ResourceCatalog {
    /// Build a catalog, rejecting duplicate ids.
    pub fn new(resources: Vec<Resource>) -> Result<Self, CoreError> {
        let mut seen = HashSet::with_capacity(resources.len());
        for resource in &resources {
            if !seen.insert(resource.id) {
                return Err(CoreError::DuplicateResourceId(resource.id));
            }
        }
        Ok(Self { resources })
    }

    /// Parse a JSON array of resources.
    pub fn from_json(text: &str) -> Result<Self, CoreError> {
        let resources: Vec<Resource> = serde_json::from_str(text)?;
        Self::new(resources)
    }

    /// The starter collection shipped with the app.
    pub fn builtin() -> Self {
        Self {
            resources: builtin_resources(),
        }
    }

    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    pub fn get(&self, id: u32) -> Option<&Resource> {
        self.resources.iter().find(|r| r.id == id)
    }

    /// Distinct categories in first-seen order.
    pub fn categories(&self) -> Vec<CategorySummary> {
        let mut categories: Vec<CategorySummary> = Vec::new();
        for resource in &self.resources {
            match categories.iter_mut().find(|c| c.key == resource.category) {
                Some(existing) => existing.resource_count += 1,
                None => categories.push(CategorySummary {
                    key: resource.category.clone(),
                    resource_count: 1,
                }),
            }
        }
        categories
    }

    pub fn filter(&self, state: &FilterState) -> Vec<&Resource> {
        state.apply(&self.resources)
    }
}

fn builtin_resources() -> Vec<Resource> {
    vec![
        Resource {
            id: 1,
            title: "Mindful Morning Meditation".to_string(),
            description: "Start your day with calm and focus. A 10-minute guided session for beginners."
                .to_string(),
            category: "meditation".to_string(),
            tags: tags(&["anxiety", "morning", "focus"]),
            content: Some(
                "This guided meditation helps you center yourself and set a positive intention \
                 for the day. Find a quiet space, sit comfortably, and allow the gentle guidance \
                 to lead you to a state of peaceful awareness. Perfect for reducing morning \
                 anxiety and improving focus throughout your day."
                    .to_string(),
            ),
            image_url: Some("https://via.placeholder.com/300x180?text=Meditation".to_string()),
            duration: Some("10 min".to_string()),
            author: None,
            audio_src: Some("#".to_string()),
            tool_url: None,
        },
        Resource {
            id: 2,
            title: "Understanding Your Emotions".to_string(),
            description: "An insightful article on emotional intelligence and self-awareness for better mental health."
                .to_string(),
            category: "article".to_string(),
            tags: tags(&["emotions", "self-awareness", "education"]),
            content: Some(
                "Emotions are powerful signals that guide our thoughts and actions. This article \
                 explores how to recognize, understand, and manage your emotions effectively. \
                 Developing emotional intelligence can lead to better mental well-being, stronger \
                 relationships, and improved decision-making. We delve into practical techniques \
                 for self-reflection and emotional regulation."
                    .to_string(),
            ),
            image_url: Some("https://via.placeholder.com/300x180?text=Article".to_string()),
            duration: None,
            author: Some("Dr. Eva Insight".to_string()),
            audio_src: None,
            tool_url: None,
        },
        Resource {
            id: 3,
            title: "Digital Detox Challenge Tool".to_string(),
            description: "A guided tool to help you reduce screen time, improve focus, and reconnect with the present."
                .to_string(),
            category: "tool".to_string(),
            tags: tags(&["digital-wellbeing", "focus", "challenge"]),
            content: Some(
                "Our Digital Detox Challenge tool provides a structured plan to help you reduce \
                 your reliance on digital devices. Improve focus, enhance your connection with the \
                 world around you, and discover tips for a healthier digital life. Track your \
                 progress and unlock achievements as you build better habits."
                    .to_string(),
            ),
            image_url: Some("https://via.placeholder.com/300x180?text=Tool".to_string()),
            duration: None,
            author: None,
            audio_src: None,
            tool_url: Some("/tools/digital-detox".to_string()),
        },
    ]
}

fn tags(values: &[&str]) -> Vec<String> {
    values.iter().map(|t| t.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_has_three_categories() {
        let catalog = ResourceCatalog::builtin();
        assert_eq!(catalog.len(), 3);
        let keys: Vec<String> = catalog.categories().into_iter().map(|c| c.key).collect();
        assert_eq!(keys, vec!["meditation", "article", "tool"]);
    }

    #[test]
    fn categories_count_resources() {
        let json = r#"[
            {"id": 1, "title": "A", "description": "", "category": "tool", "tags": []},
            {"id": 2, "title": "B", "description": "", "category": "article"},
            {"id": 3, "title": "C", "description": "", "category": "tool", "tags": ["x"]}
        ]"#;
        let catalog = ResourceCatalog::from_json(json).expect("valid catalog");
        let categories = catalog.categories();
        assert_eq!(
            categories,
            vec![
                CategorySummary { key: "tool".to_string(), resource_count: 2 },
                CategorySummary { key: "article".to_string(), resource_count: 1 },
            ]
        );
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let json = r#"[
            {"id": 7, "title": "A", "description": "", "category": "tool"},
            {"id": 7, "title": "B", "description": "", "category": "tool"}
        ]"#;
        let err = ResourceCatalog::from_json(json).unwrap_err();
        assert!(matches!(err, CoreError::DuplicateResourceId(7)));
    }

    #[test]
    fn get_by_id() {
        let catalog = ResourceCatalog::builtin();
        assert_eq!(
            catalog.get(2).map(|r| r.title.as_str()),
            Some("Understanding Your Emotions")
        );
        assert!(catalog.get(99).is_none());
    }

    #[test]
    fn filter_through_catalog() {
        let catalog = ResourceCatalog::builtin();
        let found = catalog.filter(&FilterState::new("all", "Focus"));
        let ids: Vec<u32> = found.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }
}
