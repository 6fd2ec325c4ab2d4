use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use callmate_classifiers::{SuggestResult, SummaryResult};
use callmate_core::FeedbackRecord;
use callmate_telemetry::FeedbackCounts;
use serde::Deserialize;
use serde_json::json;

// ============================================================================
// Health endpoints
// ============================================================================

pub async fn root() -> impl IntoResponse {
    Json(json!({ "status": "backend up" }))
}

pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

// ============================================================================
// Assistant endpoints
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SuggestRequest {
    pub text: String,
    #[serde(alias = "conversation_id")]
    pub call_id: String,
}

pub async fn suggest(
    State(state): State<AppState>,
    Json(req): Json<SuggestRequest>,
) -> Result<Json<SuggestResult>, ApiError> {
    if req.text.trim().is_empty() {
        return Err(ApiError::Validation("text must not be empty".to_string()));
    }
    require_call_id(&req.call_id)?;

    let outcome = tokio::time::timeout(
        state.request_timeout,
        state.pipeline.suggest(&req.text, &req.call_id),
    )
    .await
    .unwrap_or(Err(callmate_core::Error::Timeout));

    match outcome {
        Ok(result) => {
            state.metrics.record_suggestion(
                result.escalation.is_recommended(),
                result.pii_redacted,
                result.latency_ms,
            );
            Ok(Json(result))
        }
        Err(e) => Err(state.failed("suggest", e)),
    }
}

pub async fn summary(
    State(state): State<AppState>,
    Path(call_id): Path<String>,
) -> Result<Json<SummaryResult>, ApiError> {
    let result = state
        .pipeline
        .summary(&call_id)
        .await
        .map_err(|e| state.failed("summary", e))?;

    state.metrics.record_summary();
    Ok(Json(result))
}

// ============================================================================
// Feedback and consent endpoints
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct FeedbackRequest {
    #[serde(alias = "conversation_id")]
    pub call_id: String,
    pub text: String,
    pub helpful: bool,
}

pub async fn record_feedback(
    State(state): State<AppState>,
    Json(req): Json<FeedbackRequest>,
) -> Result<impl IntoResponse, ApiError> {
    require_call_id(&req.call_id)?;

    state
        .feedback
        .record(&req.call_id, &req.text, req.helpful)
        .map_err(|e| state.failed("feedback", e))?;
    state.metrics.record_feedback(req.helpful);

    Ok(Json(json!({ "message": "Feedback recorded" })))
}

pub async fn feedback_summary(
    State(state): State<AppState>,
) -> Result<Json<FeedbackCounts>, ApiError> {
    let counts = state
        .feedback
        .counts()
        .map_err(|e| state.failed("feedback_summary", e))?;
    Ok(Json(counts))
}

pub async fn feedback_history(
    State(state): State<AppState>,
) -> Result<Json<Vec<FeedbackRecord>>, ApiError> {
    let history = state
        .feedback
        .history()
        .map_err(|e| state.failed("feedback_history", e))?;
    Ok(Json(history))
}

#[derive(Debug, Deserialize)]
pub struct ConsentRequest {
    #[serde(alias = "conversation_id")]
    pub call_id: String,
    pub consent: bool,
}

pub async fn record_consent(
    State(state): State<AppState>,
    Json(req): Json<ConsentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    require_call_id(&req.call_id)?;

    state
        .consent
        .record(&req.call_id, req.consent)
        .map_err(|e| state.failed("consent", e))?;
    state.metrics.record_consent();

    Ok(Json(json!({ "message": "Consent recorded" })))
}

// ============================================================================
// Monitoring endpoints
// ============================================================================

pub async fn metrics(State(state): State<AppState>) -> String {
    state
        .prometheus
        .as_ref()
        .map(|handle| handle.render())
        .unwrap_or_default()
}

pub async fn stats(State(state): State<AppState>) -> impl IntoResponse {
    let snapshot = state.metrics.snapshot();
    Json(json!({
        "suggestions": snapshot.suggestions,
        "escalations": snapshot.escalations,
        "redactions": snapshot.redactions,
        "failures": snapshot.failures,
        "summaries": snapshot.summaries,
        "feedback": snapshot.feedback,
        "consents": snapshot.consents,
        "avg_latency_ms": snapshot.avg_latency_ms(),
        "escalation_rate": snapshot.escalation_rate(),
        "active_conversations": state.pipeline.context().conversation_count(),
    }))
}

// ============================================================================
// Errors
// ============================================================================

/// Request failure as seen by the caller
#[derive(Debug)]
pub enum ApiError {
    /// Rejected at the boundary; never reached the pipeline
    Validation(String),

    /// Pipeline or store failure; details stay in the logs
    Internal(callmate_core::Error),
}

impl From<callmate_core::Error> for ApiError {
    fn from(err: callmate_core::Error) -> Self {
        ApiError::Internal(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(message) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "error": message })),
            )
                .into_response(),
            ApiError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "request failed" })),
            )
                .into_response(),
        }
    }
}

impl AppState {
    fn failed(&self, route: &'static str, err: callmate_core::Error) -> ApiError {
        tracing::error!(route, error = %err, "request failed");
        self.metrics.record_failure(route);
        ApiError::Internal(err)
    }
}

fn require_call_id(call_id: &str) -> Result<(), ApiError> {
    if call_id.trim().is_empty() {
        return Err(ApiError::Validation("call_id must not be empty".to_string()));
    }
    Ok(())
}
