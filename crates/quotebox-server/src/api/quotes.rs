use axum::{
    extract::{rejection::JsonRejection, rejection::PathRejection, Path, State},
    http::StatusCode,
    Extension, Json,
};
use quotebox_core::{Quote, QuoteInput};
use quotebox_db::QuoteLookup;
use quotebox_sentiment::SentimentResult;
use serde::Serialize;
use serde_json::Value;

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Serialize, PartialEq, Eq)]
pub(super) struct WriteSummary {
    pub written_count: u64,
}

#[derive(Debug, Serialize)]
pub(super) struct QuoteSentiment {
    pub quote: Quote,
    pub sentiment: SentimentResult,
}

/// `POST /api/v1/quotes` — accepts `{text}` or `[{text}, ...]`.
pub(super) async fn create_quotes(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<WriteSummary>>), ApiError> {
    let Json(body) =
        payload.map_err(|e| ApiError::new(req_id.0.clone(), "validation_error", e.body_text()))?;

    let input = QuoteInput::from_json(body)
        .map_err(|e| ApiError::new(req_id.0.clone(), "validation_error", e.to_string()))?;

    let written_count = quotebox_db::write_quotes(&state.pool, &input)
        .await
        .map_err(|_| {
            ApiError::new(
                req_id.0.clone(),
                "storage_write_error",
                "quotes could not be saved; nothing was written",
            )
        })?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse {
            data: WriteSummary { written_count },
            meta: ResponseMeta::new(req_id.0),
        }),
    ))
}

/// `GET /api/v1/quotes` — every quote ordered by id; an empty array when none.
pub(super) async fn list_quotes(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<Vec<Quote>>> {
    let data = quotebox_db::read_all_quotes(&state.pool)
        .await
        .into_iter()
        .map(Quote::from)
        .collect();

    Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    })
}

pub(super) async fn get_quote(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<ApiResponse<Quote>>, ApiError> {
    let id = parse_id(&req_id, id)?;
    let quote = find_quote(&state, &req_id, id).await?;

    Ok(Json(ApiResponse {
        data: quote,
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn random_quote(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<Quote>>, ApiError> {
    let row = quotebox_db::read_random_quote(&state.pool)
        .await
        .ok_or_else(|| ApiError::new(req_id.0.clone(), "not_found", "no quotes stored yet"))?;

    Ok(Json(ApiResponse {
        data: row.into(),
        meta: ResponseMeta::new(req_id.0),
    }))
}

/// `GET /api/v1/quotes/{id}/sentiment` — read a quote, then score its text.
pub(super) async fn quote_sentiment(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<ApiResponse<QuoteSentiment>>, ApiError> {
    let id = parse_id(&req_id, id)?;
    let quote = find_quote(&state, &req_id, id).await?;
    let sentiment = state.scorer.score(&quote.text);

    Ok(Json(ApiResponse {
        data: QuoteSentiment { quote, sentiment },
        meta: ResponseMeta::new(req_id.0),
    }))
}

fn parse_id(req_id: &RequestId, id: Result<Path<i64>, PathRejection>) -> Result<i64, ApiError> {
    id.map(|Path(id)| id)
        .map_err(|e| ApiError::new(req_id.0.clone(), "bad_request", e.body_text()))
}

async fn find_quote(state: &AppState, req_id: &RequestId, id: i64) -> Result<Quote, ApiError> {
    match quotebox_db::read_quote_by_id(&state.pool, id).await {
        QuoteLookup::Found(row) => Ok(row.into()),
        QuoteLookup::NotFound => Err(ApiError::new(
            req_id.0.clone(),
            "not_found",
            format!("quote {id} not found"),
        )),
        QuoteLookup::Unavailable => Err(ApiError::new(
            req_id.0.clone(),
            "storage_unavailable",
            format!("quote {id} could not be read; try again later"),
        )),
    }
}
