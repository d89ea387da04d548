//! Request error handling.
//!
//! Handlers return [`AppError`]; its `IntoResponse` impl is the one generic
//! error handler, so no route formats its own failures.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use crate::graph::GraphError;
use crate::render::RenderError;
use crate::sandbox::SandboxError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("{0}")]
    Sandbox(#[from] SandboxError),

    #[error("Authentication required")]
    Unauthorized,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Service unavailable: {0}")]
    Unavailable(&'static str),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Graph(_) | AppError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Sandbox(_) => StatusCode::BAD_GATEWAY,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Server-side details stay in the log.
        let detail = if status.is_server_error() {
            tracing::error!(status = %status.as_u16(), "Request failed: {}", self);
            "Something went wrong on our side. Please try again later.".to_string()
        } else {
            tracing::debug!(status = %status.as_u16(), "Request rejected: {}", self);
            self.to_string()
        };

        let page = format!(
            "<h1>{} {}</h1><p>{}</p>",
            status.as_u16(),
            status.canonical_reason().unwrap_or("Error"),
            escape_html(&detail)
        );

        (status, Html(page)).into_response()
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

pub type Result<T> = std::result::Result<T, AppError>;
