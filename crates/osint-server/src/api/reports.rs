use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use osint_core::ReportFormat;
use osint_sentiment::run_analysis;
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::analyze::AnalyzeQuery;
use super::{ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct ReportBody {
    #[serde(flatten)]
    pub query: AnalyzeQuery,
    /// Server's `REPORT_FORMAT` when absent.
    pub formats: Option<Vec<ReportFormat>>,
    #[serde(default)]
    pub charts: bool,
}

#[derive(Debug, Serialize)]
pub(super) struct ReportFiles {
    pub keyword: String,
    pub total_posts: usize,
    pub output_dir: String,
    /// Paths written. Empty when nothing was found.
    pub files: Vec<String>,
}

/// `POST /api/v1/reports`: run the analysis and save it under the output
/// directory.
pub(super) async fn generate_reports(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    body: Result<Json<ReportBody>, JsonRejection>,
) -> Result<Json<ApiResponse<ReportFiles>>, ApiError> {
    let Json(body) =
        body.map_err(|e| ApiError::new(req_id.0.clone(), "validation_error", e.body_text()))?;
    let request = body.query.into_request(state.default_limit, &req_id.0)?;

    let mut formats: Vec<ReportFormat> = Vec::new();
    for format in body
        .formats
        .unwrap_or_else(|| state.report_formats.to_vec())
    {
        if !formats.contains(&format) {
            formats.push(format);
        }
    }
    if formats.is_empty() {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            "at least one report format is required",
        ));
    }

    let report = run_analysis(
        state.collectors.as_slice(),
        &*state.analyzer,
        &request,
        state.collector_timeout,
    )
    .await;

    let writer = state.report_writer.clone();
    let output_dir = writer.output_dir().display().to_string();
    let keyword = report.keyword.clone();
    let total_posts = report.posts.len();

    let files = if report.is_empty() {
        tracing::info!(keyword = keyword.as_str(), "no results, no reports written");
        Vec::new()
    } else {
        let charts = body.charts;
        let written = tokio::task::spawn_blocking(move || {
            let mut paths = writer.write_reports(&report, &formats)?;
            if charts {
                paths.extend(writer.write_charts(&report)?);
            }
            Ok::<_, osint_report::ReportError>(paths)
        })
        .await;

        match written {
            Ok(Ok(paths)) => paths.iter().map(|p| p.display().to_string()).collect(),
            Ok(Err(e)) => {
                tracing::error!(error = %e, "failed to write reports");
                return Err(ApiError::new(
                    req_id.0,
                    "report_write_failed",
                    "reports could not be written",
                ));
            }
            Err(e) => {
                tracing::error!(error = %e, "report writer task failed");
                return Err(ApiError::new(
                    req_id.0,
                    "internal_error",
                    "reports could not be written",
                ));
            }
        }
    };

    tracing::info!(
        keyword = keyword.as_str(),
        files = files.len(),
        "reports generated"
    );
    Ok(Json(ApiResponse {
        data: ReportFiles {
            keyword,
            total_posts,
            output_dir,
            files,
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}
