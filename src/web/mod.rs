//! Presentation layer: one embedded page, rendered entirely from the JSON
//! API. Grids, metric cards, the bar chart, and success/error banners all
//! live in the page; no business logic does.

use axum::response::Html;

const INDEX_HTML: &str = include_str!("index.html");

pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}
