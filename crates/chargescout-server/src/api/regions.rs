use axum::{
    extract::{Path, State},
    Extension, Json,
};
use chargescout_data::Selection;
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{map_data_error, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Serialize)]
pub(super) struct RegionItem {
    pub region_id: String,
    pub display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct OptimizeRequest {
    pub k: u32,
}

pub(super) async fn list_regions(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<Vec<RegionItem>>> {
    let data = state
        .service
        .regions()
        .map(|boundary| RegionItem {
            region_id: boundary.region_id.clone(),
            display_name: boundary.display_name.clone(),
        })
        .collect();

    Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    })
}

pub(super) async fn optimize(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(region_id): Path<String>,
    Json(request): Json<OptimizeRequest>,
) -> Result<Json<ApiResponse<Selection>>, ApiError> {
    let selection = state
        .service
        .optimize(&region_id, request.k)
        .map_err(|e| map_data_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: selection,
        meta: ResponseMeta::new(req_id.0),
    }))
}
