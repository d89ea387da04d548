//! Homepage.

use std::sync::Arc;

use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;

use crate::error::Result;
use crate::home::load_home_page;
use crate::render::render_view;
use crate::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(home))
}

/// GET / - Catalog overview plus the visitor's courses in progress.
async fn home(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Result<Response> {
    let user = state.current_user(&headers).await;

    let page = load_home_page(
        state.categories.as_ref(),
        state.enrolments.as_ref(),
        user.as_ref(),
    )
    .await?;

    let rendered = render_view(state.renderer.as_ref(), "home", &page)?;
    Ok(rendered.into_response())
}
