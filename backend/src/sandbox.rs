//! Sandbox API client.
//!
//! Sandboxes are per-user database instances provisioned for hands-on
//! lessons. The API is called with the visitor's own bearer token.

use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Placeholder body when the sandbox API sent nothing back.
pub const NO_DATA: &str = "[NO DATA]";

/// Failure talking to the sandbox API.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Sandbox {kind} ({status}) on {endpoint}: {message} ({body})")]
pub struct SandboxError {
    pub kind: String,
    pub endpoint: String,
    pub status: u16,
    pub message: String,
    pub body: String,
}

impl SandboxError {
    /// Status defaults to 500 and body to [`NO_DATA`] when missing or empty.
    pub fn new(
        kind: &str,
        endpoint: &str,
        message: impl Into<String>,
        status: Option<u16>,
        body: Option<String>,
    ) -> Self {
        Self {
            kind: kind.to_string(),
            endpoint: endpoint.to_string(),
            status: status.filter(|s| *s != 0).unwrap_or(500),
            message: message.into(),
            body: body
                .filter(|b| !b.is_empty())
                .unwrap_or_else(|| NO_DATA.to_string()),
        }
    }

    fn from_reqwest(kind: &str, endpoint: &str, error: reqwest::Error) -> Self {
        let status = error.status().map(|s| s.as_u16());
        Self::new(kind, endpoint, error.to_string(), status, None)
    }
}

/// A running sandbox instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SandboxInstance {
    pub sandbox_id: String,
    #[serde(default)]
    pub usecase: Option<String>,
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub scheme: Option<String>,
    #[serde(default)]
    pub bolt_port: Option<String>,
    /// Expiry as epoch milliseconds.
    #[serde(default)]
    pub expires: Option<i64>,
}

pub struct SandboxClient {
    http_client: Client,
    base_url: String,
}

impl SandboxClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http_client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Instances currently running for the owner of `token`.
    pub async fn running_instances(&self, token: &str) -> Result<Vec<SandboxInstance>, SandboxError> {
        let endpoint = "/SandboxGetRunningInstancesForUser";
        let url = format!("{}{}", self.base_url, endpoint);

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| SandboxError::from_reqwest("GET", endpoint, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.ok();
            return Err(SandboxError::new(
                "GET",
                endpoint,
                format!("Request failed with status code {}", status.as_u16()),
                Some(status.as_u16()),
                body,
            ));
        }

        response
            .json()
            .await
            .map_err(|e| SandboxError::from_reqwest("GET", endpoint, e))
    }
}
