/// MCP server hosting the wellness check-in scorer and resource browser.
///
/// Exposes seven tools:
/// - `score_check_in`: Score questionnaire answers, optionally recording them on a session
/// - `start_session` / `end_session`: Create or clear a session's dashboard state
/// - `get_dashboard`: Greeting, latest concern label and recent activity for a session
/// - `filter_resources`: Narrow the resource catalog by category and text
/// - `get_resource`: Full record for one resource
/// - `list_categories`: Categories present in the catalog
use std::sync::Arc;

use rmcp::{
    Json, ServerHandler,
    handler::server::router::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::*,
    tool, tool_handler, tool_router,
};
use tracing::{info, warn};

use crate::api::{
    CategoryListResponse, DashboardResponse, FilterResourcesParams, FilterResourcesResponse,
    GetDashboardParams, GetResourceParams, OkResponse, ResourceDetailResponse, ResourceSummary,
    ScoreCheckInParams, ScoreCheckInResponse, SessionParams, StartSessionResponse,
};
use crate::store::{unix_millis, DashboardStore};
use wellness_core::{
    greeting, ConcernLabel, ConcernScorer, FilterState, ResourceCatalog, ALL_CATEGORIES,
};

#[derive(Clone)]
pub struct WellnessServer {
    catalog: Arc<ResourceCatalog>,
    scorer: Arc<ConcernScorer>,
    store: DashboardStore,
    tool_router: ToolRouter<WellnessServer>,
}

impl WellnessServer {
    pub fn new(catalog: ResourceCatalog, scorer: ConcernScorer, store: DashboardStore) -> Self {
        Self {
            catalog: Arc::new(catalog),
            scorer: Arc::new(scorer),
            store,
            tool_router: Self::tool_router(),
        }
    }
}

fn required(value: &str, name: &str) -> Result<String, String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(format!("{name} must not be empty"));
    }
    Ok(value.to_string())
}

fn current_utc_hour() -> u8 {
    ((unix_millis() / 3_600_000) % 24) as u8
}

#[tool_router]
impl WellnessServer {
    #[tool(description = "Score wellness check-in answers into a concern label (Awaiting Check-in, Feeling Okay, Moderate Concern, High Concern). Keyword heuristic, not a clinical assessment. Pass session_id to record the result on that session's dashboard.")]
    async fn score_check_in(
        &self,
        Parameters(params): Parameters<ScoreCheckInParams>,
    ) -> Result<Json<ScoreCheckInResponse>, String> {
        let session_id = params
            .session_id
            .as_deref()
            .map(|id| required(id, "session_id"))
            .transpose()?;

        let assessment = self.scorer.assess(&params.answers);
        info!(
            answers = params.answers.len(),
            severity = assessment.severity,
            label = %assessment.label,
            "check-in scored"
        );

        let mut recorded = false;
        if let Some(session_id) = session_id {
            if assessment.label != ConcernLabel::AwaitingCheckIn {
                let label = assessment.label;
                recorded = self
                    .store
                    .update(&session_id, |state| {
                        state.complete_check_in(label, unix_millis())
                    })
                    .await
                    .is_some();
                if !recorded {
                    warn!(session_id = %session_id, "check-in scored but not persisted");
                }
            }
        }

        Ok(Json(ScoreCheckInResponse::from_assessment(
            assessment, recorded,
        )))
    }

    #[tool(description = "Start a dashboard session and return its session_id.")]
    async fn start_session(&self) -> Result<Json<StartSessionResponse>, String> {
        let session_id = self.store.start().await;
        Ok(Json(StartSessionResponse { session_id }))
    }

    #[tool(description = "End a dashboard session and delete its stored check-in state. ok is false when no live session was stored under that id.")]
    async fn end_session(
        &self,
        Parameters(params): Parameters<SessionParams>,
    ) -> Result<Json<OkResponse>, String> {
        let session_id = required(&params.session_id, "session_id")?;
        let removed = self.store.remove(&session_id).await;
        if !removed {
            warn!(session_id = %session_id, "end_session found no stored state");
        }
        Ok(Json(OkResponse { ok: removed }))
    }

    #[tool(description = "Get a session's dashboard: time-of-day greeting, latest concern label and up to five recent activities (newest first).")]
    async fn get_dashboard(
        &self,
        Parameters(params): Parameters<GetDashboardParams>,
    ) -> Result<Json<DashboardResponse>, String> {
        let session_id = required(&params.session_id, "session_id")?;
        let hour = match params.hour {
            Some(hour) if hour > 23 => return Err(format!("hour must be 0-23, got {hour}")),
            Some(hour) => hour,
            None => current_utc_hour(),
        };

        let state = self.store.load(&session_id).await.unwrap_or_default();
        Ok(Json(DashboardResponse::new(greeting(hour), state)))
    }

    #[tool(description = "Filter wellness resources by exact category ('all', 'meditation', 'article', 'tool', ...) and a case-insensitive query over title, description and tags. Results keep catalog order.")]
    async fn filter_resources(
        &self,
        Parameters(params): Parameters<FilterResourcesParams>,
    ) -> Result<Json<FilterResourcesResponse>, String> {
        let state = FilterState::new(
            params.category.unwrap_or_else(|| ALL_CATEGORIES.to_string()),
            params.query.unwrap_or_default(),
        );

        let resources: Vec<ResourceSummary> = self
            .catalog
            .filter(&state)
            .into_iter()
            .map(ResourceSummary::from)
            .collect();

        Ok(Json(FilterResourcesResponse {
            category: state.category,
            query: state.query,
            resources,
        }))
    }

    #[tool(description = "Get the full record of a wellness resource by numeric id.")]
    async fn get_resource(
        &self,
        Parameters(params): Parameters<GetResourceParams>,
    ) -> Result<Json<ResourceDetailResponse>, String> {
        self.catalog
            .get(params.id)
            .map(|r| Json(ResourceDetailResponse::from(r)))
            .ok_or_else(|| format!("resource not found: {}", params.id))
    }

    #[tool(description = "List resource categories with the number of resources in each.")]
    async fn list_categories(&self) -> Result<Json<CategoryListResponse>, String> {
        Ok(Json(CategoryListResponse::from(self.catalog.categories())))
    }
}

#[tool_handler]
impl ServerHandler for WellnessServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_06_18,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "wellness-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: None,
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Mental-wellness companion MCP server. Use start_session, then score_check_in \
with the session_id to record questionnaire results and get_dashboard to read them back. \
Browse content with list_categories, filter_resources and get_resource. Concern labels \
come from a keyword heuristic and are not a clinical assessment."
                    .to_string(),
            ),
        }
    }
}
