//! Sitemap endpoint.

use std::sync::Arc;

use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;

use crate::error::Result;
use crate::sitemap;
use crate::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/sitemap.txt", get(sitemap_txt))
}

/// GET /sitemap.txt - One absolute URL per line.
async fn sitemap_txt(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse> {
    let body = sitemap::generate(
        state.graph.as_ref(),
        &state.config.site.base_url,
        &state.config.catalog.negative_statuses,
    )
    .await?;

    Ok(([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], body))
}
