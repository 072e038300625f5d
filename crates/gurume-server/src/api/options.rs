use axum::{Extension, Json};
use gurume_core::codes::{AmenityFlag, CodeOption, BUDGET_OPTIONS, GENRE_OPTIONS};
use gurume_core::{ScenePreset, SCENE_PRESETS};
use serde::Serialize;

use crate::middleware::RequestId;

use super::{ApiResponse, ResponseMeta};

#[derive(Debug, Serialize)]
pub(super) struct AmenityItem {
    id: &'static str,
    label: &'static str,
}

#[derive(Debug, Serialize)]
pub(super) struct OptionsData {
    genres: &'static [CodeOption],
    budgets: &'static [CodeOption],
    amenities: Vec<AmenityItem>,
    scenes: &'static [ScenePreset],
}

/// GET /api/options: the static tables a search form is built from.
pub(super) async fn list_options(
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<OptionsData>> {
    let amenities = AmenityFlag::ALL
        .iter()
        .map(|flag| AmenityItem {
            id: flag.id(),
            label: flag.label(),
        })
        .collect();

    Json(ApiResponse {
        data: OptionsData {
            genres: GENRE_OPTIONS,
            budgets: BUDGET_OPTIONS,
            amenities,
            scenes: SCENE_PRESETS,
        },
        meta: ResponseMeta::new(req_id.0),
    })
}
