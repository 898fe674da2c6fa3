use axum::{extract::rejection::JsonRejection, extract::State, Extension, Json};
use quotebox_sentiment::SentimentResult;
use serde::Deserialize;

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct ScoreRequest {
    /// Missing or null text scores as empty text.
    #[serde(default, alias = "texte")]
    pub text: Option<String>,
}

/// `POST /api/v1/sentiment` — score arbitrary text.
pub(super) async fn score_text(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<ScoreRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<SentimentResult>>, ApiError> {
    let Json(request) =
        payload.map_err(|e| ApiError::new(req_id.0.clone(), "validation_error", e.body_text()))?;

    let result = state.scorer.score(request.text.as_deref().unwrap_or_default());
    tracing::debug!(label = %result.label, compound = result.scores.compound, "scored text");

    Ok(Json(ApiResponse {
        data: result,
        meta: ResponseMeta::new(req_id.0),
    }))
}
