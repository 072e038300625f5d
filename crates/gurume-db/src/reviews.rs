//! Database operations for the `reviews` table.

use chrono::{DateTime, Utc};
use gurume_core::{ReviewLabels, Score};
use sqlx::PgPool;

use crate::DbError;

/// A row from the `reviews` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ReviewRow {
    pub id: i64,
    pub store_id: String,
    pub employee_id: String,
    pub comment: Option<String>,
    pub atmosphere: Option<i16>,
    pub usecase: Option<i16>,
    pub inserted_at: DateTime<Utc>,
}

impl ReviewRow {
    #[must_use]
    pub fn labels(&self) -> ReviewLabels {
        ReviewLabels::from_scores(self.atmosphere, self.usecase)
    }
}

/// Fields supplied when recording a review. Scores are range-checked by
/// construction.
#[derive(Debug, Clone)]
pub struct NewReview {
    pub store_id: String,
    pub employee_id: String,
    pub comment: Option<String>,
    pub atmosphere: Option<Score>,
    pub usecase: Option<Score>,
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Inserts a review and returns the stored row.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] on database errors.
pub async fn insert_review(pool: &PgPool, review: &NewReview) -> Result<ReviewRow, DbError> {
    let row = sqlx::query_as::<_, ReviewRow>(
        "INSERT INTO reviews (store_id, employee_id, comment, atmosphere, usecase) \
         VALUES ($1, $2, $3, $4, $5) \
         RETURNING id, store_id, employee_id, comment, atmosphere, usecase, inserted_at",
    )
    .bind(&review.store_id)
    .bind(&review.employee_id)
    .bind(review.comment.as_deref())
    .bind(review.atmosphere.map(Score::get))
    .bind(review.usecase.map(Score::get))
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// Returns every review for a shop, newest first.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] on database errors.
pub async fn list_reviews_for_store(
    pool: &PgPool,
    store_id: &str,
) -> Result<Vec<ReviewRow>, DbError> {
    let rows = sqlx::query_as::<_, ReviewRow>(
        "SELECT id, store_id, employee_id, comment, atmosphere, usecase, inserted_at \
         FROM reviews \
         WHERE store_id = $1 \
         ORDER BY inserted_at DESC, id DESC",
    )
    .bind(store_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
