use axum::{
    extract::{Path, State},
    Extension, Json,
};
use gurume_core::Shop;

use crate::middleware::RequestId;

use super::{map_upstream_error, ApiError, AppState};

/// GET /api/shops/{id}
pub(super) async fn get_shop(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(id): Path<String>,
) -> Result<Json<Shop>, ApiError> {
    state
        .hotpepper
        .get_shop(&id)
        .await
        .map(Json)
        .map_err(|e| map_upstream_error(&req_id.0, &e))
}
