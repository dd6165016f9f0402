//! services/engine/src/web/rest.rs
//!
//! Contains the Axum handlers for the REST API endpoints and the master
//! definition for the OpenAPI specification.

use crate::cycle::produce_article;
use crate::web::state::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
};
use content_quality_core::domain::{
    ArticleDraft, QualityReport, StoredReport, TopicCandidate,
};
use content_quality_core::gate::GateOutcome;
use content_quality_core::ports::PortError;
use content_quality_core::topics::{candidate_topics, GapSnapshot, UserIntent};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;
use utoipa::{IntoParams, OpenApi, ToSchema};

const DEFAULT_REPORT_LIMIT: usize = 20;
const MAX_REPORT_LIMIT: usize = 200;

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        health_handler,
        score_handler,
        rank_topics_handler,
        generate_article_handler,
        list_reports_handler,
    ),
    components(
        schemas(
            HealthResponse,
            ScoreRequest,
            ScoreProfile,
            RankRequest,
            GenerateRequest,
            GenerateResponse,
            GateVerdict,
            QualityReport,
            TopicCandidate,
            ArticleDraft,
            StoredReport,
        )
    ),
    tags(
        (name = "Content Quality Engine", description = "Scoring, topic selection and gated article generation.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// API Response and Payload Structs
//=========================================================================================

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

/// Which scoring configuration to apply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ScoreProfile {
    #[default]
    Publish,
    Audit,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ScoreRequest {
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub profile: ScoreProfile,
    #[serde(default)]
    pub topic: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct RankRequest {
    /// Free-text query; a topic keyword in it becomes the preferred topic.
    #[serde(default)]
    pub query: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GenerateRequest {
    pub topic: String,
    /// Publish the draft if the gate accepts it.
    #[serde(default)]
    pub publish: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum GateVerdict {
    Accepted,
    Abandoned,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GenerateResponse {
    pub topic: String,
    pub verdict: GateVerdict,
    /// The accepted draft, or the last scored draft when abandoned.
    pub draft: Option<ArticleDraft>,
    /// Every report produced by the gate, in attempt order.
    pub reports: Vec<QualityReport>,
    pub failures: Vec<String>,
    pub generation_calls: u32,
    pub published_id: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ReportsQuery {
    /// Maximum number of reports to return (default 20, at most 200).
    pub limit: Option<usize>,
}

//=========================================================================================
// Error Mapping
//=========================================================================================

fn port_failure(context: &str, e: PortError) -> (StatusCode, String) {
    error!("{}: {:?}", context, e);
    let status = match e {
        PortError::NotFound(_) => StatusCode::NOT_FOUND,
        PortError::Unavailable(_) => StatusCode::BAD_GATEWAY,
        PortError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, format!("{}: {}", context, e))
}

//=========================================================================================
// REST API Handlers
//=========================================================================================

/// Liveness probe.
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is running", body = HealthResponse))
)]
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
    })
}

/// Score a title and body without generating or storing anything.
#[utoipa::path(
    post,
    path = "/quality/score",
    request_body = ScoreRequest,
    responses((status = 200, description = "Quality report for the submitted content", body = QualityReport))
)]
pub async fn score_handler(
    State(app_state): State<Arc<AppState>>,
    Json(request): Json<ScoreRequest>,
) -> Json<QualityReport> {
    let scorer = match request.profile {
        ScoreProfile::Publish => &app_state.gate_scorer,
        ScoreProfile::Audit => &app_state.audit_scorer,
    };
    let draft = ArticleDraft::new(request.title, request.body, request.topic.unwrap_or_default());
    Json(scorer.score(&draft))
}

/// Rank candidate topics against the current content inventory.
#[utoipa::path(
    post,
    path = "/topics/rank",
    request_body = RankRequest,
    responses(
        (status = 200, description = "Candidates, best first", body = Vec<TopicCandidate>),
        (status = 502, description = "The content backend is unreachable")
    )
)]
pub async fn rank_topics_handler(
    State(app_state): State<Arc<AppState>>,
    Json(request): Json<RankRequest>,
) -> Result<Json<Vec<TopicCandidate>>, (StatusCode, String)> {
    let items = app_state
        .content
        .fetch_content()
        .await
        .map_err(|e| port_failure("Failed to fetch content inventory", e))?;

    let catalog = app_state.ranker.catalog();
    let gaps = GapSnapshot::from_inventory(catalog, &items);
    let intent = request
        .query
        .as_deref()
        .map(|q| UserIntent::from_query(catalog, q))
        .unwrap_or_default();
    let candidates = candidate_topics(catalog, &intent);

    Ok(Json(app_state.ranker.rank(&candidates, &gaps, &intent)))
}

/// Generate an article for a topic through the quality gate.
///
/// Only an accepted draft is ever published, and only when `publish` is set.
#[utoipa::path(
    post,
    path = "/articles/generate",
    request_body = GenerateRequest,
    responses(
        (status = 200, description = "Gate outcome with every report", body = GenerateResponse),
        (status = 400, description = "Empty topic"),
        (status = 500, description = "Storing reports or publishing failed")
    )
)]
pub async fn generate_article_handler(
    State(app_state): State<Arc<AppState>>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, (StatusCode, String)> {
    let topic = request.topic.trim();
    if topic.is_empty() {
        return Err((StatusCode::BAD_REQUEST, "topic must not be empty".to_string()));
    }

    let run = produce_article(&app_state, topic, request.publish)
        .await
        .map_err(|e| port_failure("Failed to produce article", e))?;

    let (verdict, draft, history) = match run.outcome {
        GateOutcome::Accepted { draft, history, .. } => (GateVerdict::Accepted, Some(draft), history),
        GateOutcome::Abandoned {
            last_draft, history, ..
        } => (GateVerdict::Abandoned, last_draft, history),
    };

    Ok(Json(GenerateResponse {
        topic: topic.to_string(),
        verdict,
        draft,
        reports: history.reports,
        failures: history.failures,
        generation_calls: history.generation_calls,
        published_id: run.published_id,
    }))
}

/// List the most recent stored quality reports.
#[utoipa::path(
    get,
    path = "/reports",
    params(ReportsQuery),
    responses(
        (status = 200, description = "Most recent reports first", body = Vec<StoredReport>),
        (status = 500, description = "Report store failure")
    )
)]
pub async fn list_reports_handler(
    State(app_state): State<Arc<AppState>>,
    Query(query): Query<ReportsQuery>,
) -> Result<Json<Vec<StoredReport>>, (StatusCode, String)> {
    let limit = query
        .limit
        .unwrap_or(DEFAULT_REPORT_LIMIT)
        .clamp(1, MAX_REPORT_LIMIT);
    app_state
        .reports
        .recent_reports(limit)
        .await
        .map(Json)
        .map_err(|e| port_failure("Failed to list reports", e))
}
