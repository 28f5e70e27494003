use axum::{extract::State, Extension, Json};
use osint_collectors::PlatformCollector;
use osint_core::Platform;
use serde::Serialize;

use crate::middleware::RequestId;

use super::{ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Serialize, PartialEq, Eq)]
pub(super) struct PlatformItem {
    pub platform: Platform,
    pub enabled: bool,
}

pub(super) async fn list_platforms(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<Vec<PlatformItem>>> {
    let configured: Vec<Platform> = state
        .collectors
        .iter()
        .map(PlatformCollector::platform)
        .collect();

    let data = Platform::ALL
        .into_iter()
        .map(|platform| PlatformItem {
            platform,
            enabled: configured.contains(&platform),
        })
        .collect();

    Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    })
}
