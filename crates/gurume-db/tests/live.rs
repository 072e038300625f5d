//! Live integration tests for gurume-db using `#[sqlx::test]`.
//!
//! Each test gets a fresh, fully-migrated Postgres database spun up by the
//! sqlx test harness. The `migrations` path is relative to the crate root
//! (`crates/gurume-db/`), so `"../../migrations"` resolves to the workspace
//! migration directory.

use gurume_core::Score;
use gurume_db::{insert_review, list_reviews_for_store, NewReview};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn make_review(store_id: &str, employee_id: &str) -> NewReview {
    NewReview {
        store_id: store_id.to_string(),
        employee_id: employee_id.to_string(),
        comment: Some("個室が広い".to_string()),
        atmosphere: Some(Score::new(2).expect("valid score")),
        usecase: Some(Score::new(3).expect("valid score")),
    }
}

/// Insert a review with an explicit timestamp offset so ordering is deterministic.
async fn insert_review_at(pool: &sqlx::PgPool, store_id: &str, minutes_ago: i32) -> i64 {
    sqlx::query_scalar::<_, i64>(
        "INSERT INTO reviews (store_id, employee_id, inserted_at) \
         VALUES ($1, 'E000', NOW() - make_interval(mins => $2)) RETURNING id",
    )
    .bind(store_id)
    .bind(minutes_ago)
    .fetch_one(pool)
    .await
    .unwrap_or_else(|e| panic!("insert_review_at failed for store '{store_id}': {e}"))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn insert_review_returns_stored_row(pool: sqlx::PgPool) {
    let row = insert_review(&pool, &make_review("J001", "E042"))
        .await
        .expect("insert_review failed");

    assert!(row.id > 0);
    assert_eq!(row.store_id, "J001");
    assert_eq!(row.employee_id, "E042");
    assert_eq!(row.comment.as_deref(), Some("個室が広い"));
    assert_eq!(row.atmosphere, Some(2));
    assert_eq!(row.usecase, Some(3));
}

#[sqlx::test(migrations = "../../migrations")]
async fn insert_review_accepts_missing_scores_and_comment(pool: sqlx::PgPool) {
    let review = NewReview {
        store_id: "J002".to_string(),
        employee_id: "E001".to_string(),
        comment: None,
        atmosphere: None,
        usecase: None,
    };

    let row = insert_review(&pool, &review)
        .await
        .expect("insert_review failed");
    assert!(row.comment.is_none());
    assert!(row.atmosphere.is_none());
    assert!(row.usecase.is_none());
}

#[sqlx::test(migrations = "../../migrations")]
async fn list_reviews_is_newest_first_and_scoped_to_store(pool: sqlx::PgPool) {
    let oldest = insert_review_at(&pool, "J001", 30).await;
    let newest = insert_review_at(&pool, "J001", 1).await;
    let middle = insert_review_at(&pool, "J001", 10).await;
    insert_review_at(&pool, "J999", 0).await;

    let rows = list_reviews_for_store(&pool, "J001")
        .await
        .expect("list_reviews_for_store failed");

    let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![newest, middle, oldest]);
    assert!(rows.iter().all(|r| r.store_id == "J001"));
}

#[sqlx::test(migrations = "../../migrations")]
async fn list_reviews_for_unknown_store_is_empty(pool: sqlx::PgPool) {
    let rows = list_reviews_for_store(&pool, "NOPE")
        .await
        .expect("list_reviews_for_store failed");
    assert!(rows.is_empty());
}

#[sqlx::test(migrations = "../../migrations")]
async fn out_of_range_scores_are_rejected_by_the_table(pool: sqlx::PgPool) {
    let result = sqlx::query(
        "INSERT INTO reviews (store_id, employee_id, atmosphere) VALUES ('J001', 'E000', 5)",
    )
    .execute(&pool)
    .await;

    assert!(result.is_err(), "check constraint should reject score 5");
}

#[sqlx::test(migrations = "../../migrations")]
async fn ping_and_health_check_succeed(pool: sqlx::PgPool) {
    gurume_db::ping(&pool).await.expect("ping failed");
    gurume_db::health_check(&pool)
        .await
        .expect("health_check failed");
}
