//! Page feedback endpoints.

use std::sync::Arc;

use academy_common::widgets::FeedbackOptions;
use academy_common::FeedbackRequest;
use axum::extract::{FromRequest, Request, State};
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::feedback;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct FeedbackCreated {
    pub id: Uuid,
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/feedback/options", get(options))
}

/// GET /feedback/options
async fn options(State(state): State<Arc<AppState>>) -> Json<FeedbackOptions> {
    Json(state.config.feedback.widget_options())
}

/// Page part of a `<page>/feedback` path, if `path` is one.
fn feedback_page(path: &str) -> Option<&str> {
    path.strip_suffix("feedback")
        .filter(|page| page.ends_with('/'))
}

/// Fallback handler: `POST <page>/feedback` records feedback, anything else
/// unmatched is a 404.
pub async fn fallback(State(state): State<Arc<AppState>>, request: Request) -> Result<Response> {
    let path = request.uri().path().to_string();

    let page = match feedback_page(&path) {
        Some(page) if request.method() == Method::POST => page,
        _ => return Err(AppError::NotFound(path)),
    };

    let user = state.current_user(request.headers()).await;

    let Json(body) = Json::<FeedbackRequest>::from_request(request, &state)
        .await
        .map_err(|rejection| AppError::InvalidRequest(rejection.body_text()))?;
    body.validate().map_err(AppError::InvalidRequest)?;

    let id = feedback::record(state.graph.as_ref(), page, user.as_ref(), &body).await?;

    Ok((StatusCode::CREATED, Json(FeedbackCreated { id })).into_response())
}
