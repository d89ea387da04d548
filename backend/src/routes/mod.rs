//! HTTP routes.

pub mod feedback;
pub mod health;
pub mod home;
pub mod sandbox;
pub mod sitemap;

use std::sync::Arc;

use axum::Router;

use crate::AppState;

/// Build the site router.
///
/// Feedback posts go to `<any page>/feedback`, so they are served from the
/// fallback rather than a fixed route.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .merge(home::router())
        .merge(sitemap::router())
        .merge(health::router())
        .merge(sandbox::router())
        .merge(feedback::router())
        .fallback(feedback::fallback)
}
