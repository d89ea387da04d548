//! Sandbox instances for the signed-in user.

use std::sync::Arc;

use axum::extract::State;
use axum::http::HeaderMap;
use axum::routing::get;
use axum::{Json, Router};

use crate::auth::bearer_token;
use crate::error::{AppError, Result};
use crate::sandbox::SandboxInstance;
use crate::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/sandboxes", get(list_sandboxes))
}

/// GET /sandboxes - Running instances, fetched with the caller's own token.
async fn list_sandboxes(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<SandboxInstance>>> {
    let user = state
        .current_user(&headers)
        .await
        .ok_or(AppError::Unauthorized)?;
    let token = bearer_token(&headers).map_err(|_| AppError::Unauthorized)?;

    let sandbox = state
        .sandbox
        .as_ref()
        .ok_or(AppError::Unavailable("sandbox API is not configured"))?;

    tracing::debug!("Listing sandboxes for {}", user.sub);
    let instances = sandbox.running_instances(token).await?;
    Ok(Json(instances))
}
