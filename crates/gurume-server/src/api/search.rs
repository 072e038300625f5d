use axum::{
    extract::{rejection::JsonRejection, Query, State},
    Extension, Json,
};
use gurume_core::{SearchCriteria, SearchResult};

use crate::middleware::RequestId;

use super::{map_json_rejection, map_upstream_error, ApiError, AppState};

/// GET /api/search. Repeated `kodawari` keys accumulate.
pub(super) async fn search_get(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<SearchResult>, ApiError> {
    let criteria = SearchCriteria::from_query_pairs(&pairs);
    run_search(&state, &req_id.0, &criteria).await
}

/// POST /api/search with a JSON body of the same shape as the query.
pub(super) async fn search_post(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<SearchCriteria>, JsonRejection>,
) -> Result<Json<SearchResult>, ApiError> {
    let Json(criteria) = payload.map_err(|rejection| map_json_rejection(&rejection))?;
    run_search(&state, &req_id.0, &criteria).await
}

async fn run_search(
    state: &AppState,
    request_id: &str,
    criteria: &SearchCriteria,
) -> Result<Json<SearchResult>, ApiError> {
    tracing::debug!(request_id, ?criteria, "shop search");
    state
        .hotpepper
        .search(criteria)
        .await
        .map(Json)
        .map_err(|e| map_upstream_error(request_id, &e))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use wiremock::matchers::{method, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::super::test_support::{app_with, get, json_body, lazy_pool, post_json};

    fn page(returned: &str, ids: &[&str]) -> serde_json::Value {
        let shops: Vec<_> = ids
            .iter()
            .map(|id| serde_json::json!({ "id": id, "name": format!("店 {id}") }))
            .collect();
        serde_json::json!({
            "results": {
                "results_available": 25,
                "results_returned": returned,
                "shop": shops
            }
        })
    }

    #[tokio::test]
    async fn get_forwards_query_and_returns_bare_result() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("keyword", "那覇"))
            .and(query_param("genre", "G001"))
            .and(query_param("count", "10"))
            .and(query_param("start", "11"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page("2", &["J1", "J2"])))
            .expect(1)
            .mount(&server)
            .await;

        let app = app_with(lazy_pool(), &server.uri(), Some("secret"));
        let response = get(
            app,
            "/api/search?basho=%E9%82%A3%E8%A6%87&janru=G001&count=10&start=11&ninzu=4",
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["total_available"], 25);
        assert_eq!(json["total_returned"], 2);
        assert_eq!(json["shops"][1]["id"], "J2");
        let url = json["url"].as_str().expect("url");
        assert!(!url.contains("secret"), "key leaked: {url}");
    }

    #[tokio::test]
    async fn post_with_empty_body_defaults_page_size() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("count", "10"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page("0", &[])))
            .expect(1)
            .mount(&server)
            .await;

        let app = app_with(lazy_pool(), &server.uri(), Some("k"));
        let response = post_json(app, "/api/search", "{}").await;

        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["shops"].as_array().map(Vec::len), Some(0));
    }

    #[tokio::test]
    async fn post_accepts_wire_field_names() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("keyword", "naha"))
            .and(query_param("budget", "B008"))
            .and(query_param("special_category", "SPF9"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page("1", &["J9"])))
            .expect(1)
            .mount(&server)
            .await;

        let app = app_with(lazy_pool(), &server.uri(), Some("k"));
        let body = r#"{"basho":"naha","kane":"B008","kodawari":["個室"],"special_category":"SPF9"}"#;
        let response = post_json(app, "/api/search", body).await;

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn malformed_post_body_is_bad_request() {
        let app = app_with(lazy_pool(), "http://127.0.0.1:1", Some("k"));
        let response = post_json(app, "/api/search", "{not json").await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = json_body(response).await;
        assert!(json["error"].is_string());
    }

    #[tokio::test]
    async fn missing_key_is_a_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let app = app_with(lazy_pool(), &server.uri(), None);
        let response = get(app, "/api/search?basho=naha").await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = json_body(response).await;
        assert!(json["error"].is_string());
    }

    #[tokio::test]
    async fn unreachable_upstream_is_a_generic_server_error() {
        let app = app_with(lazy_pool(), "http://127.0.0.1:1", Some("k"));
        let response = get(app, "/api/search?basho=naha").await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = json_body(response).await;
        assert_eq!(json, serde_json::json!({ "error": "Internal Server Error" }));
    }

    #[tokio::test]
    async fn upstream_status_is_propagated() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let app = app_with(lazy_pool(), &server.uri(), Some("k"));
        let response = get(app, "/api/search").await;

        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    }
}
