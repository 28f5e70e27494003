use axum::response::Html;

const PAGE: &str = include_str!("dashboard.html");

/// Single-page dashboard. Everything dynamic comes from `/api/v1/analyze`.
pub(super) async fn index() -> Html<&'static str> {
    Html(PAGE)
}
