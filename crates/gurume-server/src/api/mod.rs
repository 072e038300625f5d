mod options;
mod reviews;
mod search;
mod shops;

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use gurume_hotpepper::{HotpepperClient, HotpepperError};
use serde::Serialize;
use sqlx::PgPool;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{request_id, RequestId, REQUEST_ID_HEADER};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub hotpepper: Arc<HotpepperClient>,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

/// Error answered to clients as `{ "error": message }`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    database: &'static str,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (
            self.status,
            Json(ErrorBody {
                error: &self.message,
            }),
        )
            .into_response()
    }
}

pub(super) fn map_upstream_error(request_id: &str, error: &HotpepperError) -> ApiError {
    let status =
        StatusCode::from_u16(error.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    if error.is_internal() {
        tracing::error!(request_id, error = %error, "upstream request failed");
        return ApiError::internal();
    }

    if status.is_server_error() {
        tracing::warn!(request_id, status = status.as_u16(), error = %error, "upstream error");
    }
    ApiError::new(status, error.to_string())
}

pub(super) fn map_db_error(request_id: &str, error: &gurume_db::DbError) -> ApiError {
    tracing::error!(request_id, error = %error, "database query failed");
    ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "database query failed")
}

pub(super) fn map_json_rejection(rejection: &JsonRejection) -> ApiError {
    ApiError::bad_request(rejection.body_text())
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static(REQUEST_ID_HEADER),
        ])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/options", get(options::list_options))
        .route(
            "/api/search",
            get(search::search_get).post(search::search_post),
        )
        .route("/api/shops/{id}", get(shops::get_shop))
        .route(
            "/api/shops/{id}/reviews",
            get(reviews::list_reviews).post(reviews::create_review),
        )
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> impl IntoResponse {
    let meta = ResponseMeta::new(req_id.0);

    match gurume_db::health_check(&state.pool).await {
        Ok(()) => (
            StatusCode::OK,
            Json(ApiResponse {
                data: HealthData {
                    status: "ok",
                    database: "ok",
                },
                meta,
            }),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "health check: database unavailable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ApiResponse {
                    data: HealthData {
                        status: "degraded",
                        database: "unavailable",
                    },
                    meta,
                }),
            )
        }
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::{app_with, get, json_body, lazy_pool};
    use super::*;

    #[test]
    fn api_error_renders_error_field_only() {
        let response = ApiError::bad_request("invalid input").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn upstream_status_is_passed_through() {
        let err = map_upstream_error("req-1", &HotpepperError::UpstreamStatus { status: 503 });
        assert_eq!(err.status, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn not_found_keeps_its_message() {
        let err = map_upstream_error(
            "req-1",
            &HotpepperError::NotFound {
                id: "J0".to_string(),
            },
        );
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.message, "No shop found");
    }

    #[test]
    fn internal_upstream_errors_are_genericized() {
        let source = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
        let err = map_upstream_error(
            "req-1",
            &HotpepperError::Deserialize {
                context: "/gourmet/v1/".to_string(),
                source,
            },
        );
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, "Internal Server Error");
    }

    #[tokio::test]
    async fn responses_carry_request_id_header() {
        let app = app_with(lazy_pool(), "http://127.0.0.1:1", Some("k"));
        let response = get(app, "/api/options").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key(REQUEST_ID_HEADER));
    }

    #[tokio::test]
    async fn health_reports_degraded_without_database() {
        let app = app_with(lazy_pool(), "http://127.0.0.1:1", Some("k"));
        let response = get(app, "/api/health").await;

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let json = json_body(response).await;
        assert_eq!(json["data"]["status"], "degraded");
        assert!(json["meta"]["request_id"].is_string());
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn health_reports_ok_with_database(pool: sqlx::PgPool) {
        let app = app_with(pool, "http://127.0.0.1:1", Some("k"));
        let response = get(app, "/api/health").await;

        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["data"]["database"], "ok");
    }
}
