//! Staff reviews attached to upstream shop identifiers.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{DateTime, Utc};
use gurume_core::{ReviewLabels, Score};
use gurume_db::{NewReview, ReviewRow};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{map_db_error, map_json_rejection, ApiError, ApiResponse, AppState, ResponseMeta};

const MAX_COMMENT_CHARS: usize = 2000;

// ---------------------------------------------------------------------------
// Request / response bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(super) struct CreateReviewRequest {
    pub employee_id: String,
    pub comment: Option<String>,
    pub atmosphere: Option<i64>,
    pub usecase: Option<i64>,
}

#[derive(Debug, Serialize)]
pub(super) struct ReviewItem {
    id: i64,
    store_id: String,
    employee_id: String,
    comment: Option<String>,
    atmosphere: Option<i16>,
    usecase: Option<i16>,
    labels: ReviewLabels,
    inserted_at: DateTime<Utc>,
}

impl From<ReviewRow> for ReviewItem {
    fn from(row: ReviewRow) -> Self {
        let labels = row.labels();
        Self {
            id: row.id,
            store_id: row.store_id,
            employee_id: row.employee_id,
            comment: row.comment,
            atmosphere: row.atmosphere,
            usecase: row.usecase,
            labels,
            inserted_at: row.inserted_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_score(field: &str, value: Option<i64>) -> Result<Option<Score>, ApiError> {
    value
        .map(|v| {
            Score::new(v).map_err(|_| {
                ApiError::bad_request(format!("{field} must be between 1 and 4, got {v}"))
            })
        })
        .transpose()
}

fn validate_request(store_id: String, body: CreateReviewRequest) -> Result<NewReview, ApiError> {
    let employee_id = body.employee_id.trim().to_owned();
    if employee_id.is_empty() {
        return Err(ApiError::bad_request("employee_id must not be empty"));
    }

    let comment = body
        .comment
        .map(|c| c.trim().to_owned())
        .filter(|c| !c.is_empty());
    if comment
        .as_deref()
        .is_some_and(|c| c.chars().count() > MAX_COMMENT_CHARS)
    {
        return Err(ApiError::bad_request(format!(
            "comment must be at most {MAX_COMMENT_CHARS} characters"
        )));
    }

    Ok(NewReview {
        store_id,
        employee_id,
        comment,
        atmosphere: validate_score("atmosphere", body.atmosphere)?,
        usecase: validate_score("usecase", body.usecase)?,
    })
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/shops/{id}/reviews, newest first.
pub(super) async fn list_reviews(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(store_id): Path<String>,
) -> Result<Json<ApiResponse<Vec<ReviewItem>>>, ApiError> {
    let rows = gurume_db::list_reviews_for_store(&state.pool, &store_id)
        .await
        .map_err(|e| map_db_error(&req_id.0, &e))?;

    Ok(Json(ApiResponse {
        data: rows.into_iter().map(ReviewItem::from).collect(),
        meta: ResponseMeta::new(req_id.0),
    }))
}

/// POST /api/shops/{id}/reviews
pub(super) async fn create_review(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(store_id): Path<String>,
    payload: Result<Json<CreateReviewRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<ReviewItem>>), ApiError> {
    let Json(body) = payload.map_err(|rejection| map_json_rejection(&rejection))?;
    let review = validate_request(store_id, body)?;

    let row = gurume_db::insert_review(&state.pool, &review)
        .await
        .map_err(|e| map_db_error(&req_id.0, &e))?;
    tracing::info!(review_id = row.id, store_id = %row.store_id, "review recorded");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse {
            data: ReviewItem::from(row),
            meta: ResponseMeta::new(req_id.0),
        }),
    ))
}
