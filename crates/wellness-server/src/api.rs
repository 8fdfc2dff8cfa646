use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use wellness_core::{Assessment, CategorySummary, DashboardState, Resource};

// --- Parameters ---

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ScoreCheckInParams {
    /// Question id to answer text, e.g. {"mood": "Not great", "sleep": "Nearly every day"}.
    pub answers: BTreeMap<String, Value>,
    /// When set, the result is recorded on this session's dashboard.
    pub session_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SessionParams {
    pub session_id: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetDashboardParams {
    pub session_id: String,
    /// Local hour of day (0-23) used for the greeting. Defaults to the current UTC hour.
    pub hour: Option<u8>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct FilterResourcesParams {
    /// Exact category such as "meditation", "article" or "tool" (default: "all").
    pub category: Option<String>,
    /// Case-insensitive text matched against title, description and tags.
    pub query: Option<String>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetResourceParams {
    pub id: u32,
}

// --- Responses ---

#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct MatchInfo {
    pub question: String,
    pub phrase: String,
    pub weight: u32,
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct ScoreCheckInResponse {
    pub label: String,
    pub severity: u32,
    pub matches: Vec<MatchInfo>,
    pub recorded: bool,
    pub disclaimer: String,
}

impl ScoreCheckInResponse {
    pub fn from_assessment(assessment: Assessment, recorded: bool) -> Self {
        Self {
            label: assessment.label.to_string(),
            severity: assessment.severity,
            matches: assessment
                .matches
                .into_iter()
                .map(|m| MatchInfo {
                    question: m.question,
                    phrase: m.phrase,
                    weight: m.weight,
                })
                .collect(),
            recorded,
            disclaimer: wellness_core::HEURISTIC_DISCLAIMER.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct StartSessionResponse {
    pub session_id: String,
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct OkResponse {
    pub ok: bool,
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct ActivityInfo {
    pub id: u64,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct DashboardResponse {
    pub greeting: String,
    pub mental_state: String,
    pub recent_activity: Vec<ActivityInfo>,
}

impl DashboardResponse {
    pub fn new(greeting: &str, state: DashboardState) -> Self {
        Self {
            greeting: greeting.to_string(),
            mental_state: state.current_label().to_string(),
            recent_activity: state
                .recent_activity
                .into_iter()
                .map(|a| ActivityInfo {
                    id: a.id,
                    title: a.title,
                    description: a.description,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct ResourceSummary {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub category: String,
    pub tags: Vec<String>,
    pub action: String,
}

impl From<&Resource> for ResourceSummary {
    fn from(r: &Resource) -> Self {
        Self {
            id: r.id,
            title: r.title.clone(),
            description: r.description.clone(),
            category: r.category.clone(),
            tags: r.tags.clone(),
            action: r.action_label().to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct FilterResourcesResponse {
    pub category: String,
    pub query: String,
    pub resources: Vec<ResourceSummary>,
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct ResourceDetailResponse {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub category: String,
    pub tags: Vec<String>,
    pub action: String,
    pub content: Option<String>,
    pub image_url: Option<String>,
    pub duration: Option<String>,
    pub author: Option<String>,
    pub audio_src: Option<String>,
    pub tool_url: Option<String>,
}

impl From<&Resource> for ResourceDetailResponse {
    fn from(r: &Resource) -> Self {
        Self {
            id: r.id,
            title: r.title.clone(),
            description: r.description.clone(),
            category: r.category.clone(),
            tags: r.tags.clone(),
            action: r.action_label().to_string(),
            content: r.content.clone(),
            image_url: r.image_url.clone(),
            duration: r.duration.clone(),
            author: r.author.clone(),
            audio_src: r.audio_src.clone(),
            tool_url: r.tool_url.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct CategoryInfo {
    pub key: String,
    pub resource_count: usize,
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct CategoryListResponse {
    pub categories: Vec<CategoryInfo>,
}

impl From<Vec<CategorySummary>> for CategoryListResponse {
    fn from(categories: Vec<CategorySummary>) -> Self {
        Self {
            categories: categories
                .into_iter()
                .map(|c| CategoryInfo {
                    key: c.key,
                    resource_count: c.resource_count,
                })
                .collect(),
        }
    }
}
