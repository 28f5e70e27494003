use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Extension, Json,
};
use osint_core::Platform;
use osint_report::{chart_figure, render_text, ChartKind};
use osint_sentiment::{run_analysis, AnalysisReport, AnalysisRequest};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::middleware::RequestId;

use super::{normalize_limit, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct AnalyzeQuery {
    pub keyword: Option<String>,
    pub limit: Option<usize>,
    /// Comma-separated platform names; all platforms when absent.
    pub platforms: Option<String>,
    #[serde(default)]
    pub hashtag: bool,
}

#[derive(Debug, Serialize)]
pub(super) struct ChartView {
    pub kind: &'static str,
    pub title: String,
    pub figure: Value,
}

#[derive(Debug, Serialize)]
pub(super) struct AnalysisView {
    #[serde(flatten)]
    pub report: AnalysisReport,
    pub charts: Vec<ChartView>,
    /// The plain-text report, as the CLI prints it.
    pub text_summary: String,
}

impl AnalysisView {
    fn new(report: AnalysisReport) -> Self {
        let text_summary = render_text(&report);
        let charts = ChartKind::ALL
            .iter()
            .filter_map(|&kind| {
                chart_figure(kind, &report).map(|figure| ChartView {
                    kind: kind.slug(),
                    title: kind.title(&report.keyword),
                    figure,
                })
            })
            .collect();
        Self {
            report,
            charts,
            text_summary,
        }
    }
}

fn parse_platforms(raw: Option<&str>) -> Result<Vec<Platform>, String> {
    let Some(raw) = raw.filter(|r| !r.trim().is_empty()) else {
        return Ok(Platform::ALL.to_vec());
    };
    let mut platforms = Vec::new();
    for name in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let platform = name.parse::<Platform>().map_err(|e| e.to_string())?;
        if !platforms.contains(&platform) {
            platforms.push(platform);
        }
    }
    if platforms.is_empty() {
        return Ok(Platform::ALL.to_vec());
    }
    Ok(platforms)
}

impl AnalyzeQuery {
    /// Validate into a pipeline request. Errors are `validation_error`s.
    pub(super) fn into_request(
        self,
        default_limit: usize,
        request_id: &str,
    ) -> Result<AnalysisRequest, ApiError> {
        let keyword = self.keyword.as_deref().map(str::trim).unwrap_or_default();
        if keyword.is_empty() {
            return Err(ApiError::new(
                request_id,
                "validation_error",
                "keyword must not be empty",
            ));
        }

        let platforms = parse_platforms(self.platforms.as_deref())
            .map_err(|message| ApiError::new(request_id, "validation_error", message))?;

        Ok(AnalysisRequest {
            keyword: keyword.to_string(),
            platforms,
            limit: normalize_limit(self.limit, default_limit),
            hashtag: self.hashtag,
        })
    }
}

pub(super) async fn run_analyze(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    query: Result<Query<AnalyzeQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<AnalysisView>>, ApiError> {
    let Query(query) =
        query.map_err(|e| ApiError::new(req_id.0.clone(), "validation_error", e.body_text()))?;
    let request = query.into_request(state.default_limit, &req_id.0)?;

    let report = run_analysis(
        state.collectors.as_slice(),
        &*state.analyzer,
        &request,
        state.collector_timeout,
    )
    .await;

    Ok(Json(ApiResponse {
        data: AnalysisView::new(report),
        meta: ResponseMeta::new(req_id.0),
    }))
}
