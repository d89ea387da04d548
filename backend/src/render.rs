//! Page rendering seam.
//!
//! Views are produced by an external template engine. Handlers only build
//! the model and hand it over by view name.

use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Failed to serialize model for {view}: {message}")]
    Model { view: String, message: String },
    #[error("Template error in {view}: {message}")]
    Template { view: String, message: String },
}

/// Output of a renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedPage {
    pub content_type: &'static str,
    pub body: String,
}

impl IntoResponse for RenderedPage {
    fn into_response(self) -> Response {
        ([(CONTENT_TYPE, self.content_type)], self.body).into_response()
    }
}

/// Turns a view name and model into a response body.
pub trait PageRenderer: Send + Sync {
    fn render(&self, view: &str, model: &Value) -> Result<RenderedPage, RenderError>;
}

/// Serialize `model` and render it with `renderer`.
pub fn render_view<T: Serialize>(
    renderer: &dyn PageRenderer,
    view: &str,
    model: &T,
) -> Result<RenderedPage, RenderError> {
    let model = serde_json::to_value(model).map_err(|e| RenderError::Model {
        view: view.to_string(),
        message: e.to_string(),
    })?;
    renderer.render(view, &model)
}

/// Emits the model itself as JSON, for front ends that render client-side.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

impl PageRenderer for JsonRenderer {
    fn render(&self, view: &str, model: &Value) -> Result<RenderedPage, RenderError> {
        let body = serde_json::to_string(model).map_err(|e| RenderError::Template {
            view: view.to_string(),
            message: e.to_string(),
        })?;
        Ok(RenderedPage {
            content_type: "application/json",
            body,
        })
    }
}
