//! Neo4j HTTP transactional API client.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{GraphError, GraphStore, Row};
use crate::config::Neo4jConfig;

/// Runs Cypher through `POST /db/{database}/tx/commit`.
///
/// Every call is its own auto-committed transaction.
pub struct Neo4jClient {
    http_client: Client,
    commit_url: String,
    username: String,
    password: String,
}

impl Neo4jClient {
    pub fn new(config: &Neo4jConfig) -> Self {
        Self {
            http_client: Client::new(),
            commit_url: format!(
                "{}/db/{}/tx/commit",
                config.uri.trim_end_matches('/'),
                config.database
            ),
            username: config.username.clone(),
            password: config.password.clone(),
        }
    }

    async fn run(&self, query: &str, params: Value, read_only: bool) -> Result<Vec<Row>, GraphError> {
        let body = CommitRequest {
            statements: vec![Statement {
                statement: query,
                parameters: params,
                result_data_contents: ["row"],
            }],
        };

        let mut request = self
            .http_client
            .post(&self.commit_url)
            .basic_auth(&self.username, Some(&self.password))
            .json(&body);
        if read_only {
            request = request.header("access-mode", "READ");
        }

        let response = request
            .send()
            .await
            .map_err(|e| GraphError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(GraphError::Request(format!("HTTP {}: {}", status, text)));
        }

        let response: CommitResponse = response
            .json()
            .await
            .map_err(|e| GraphError::InvalidResponse(e.to_string()))?;

        into_rows(response)
    }
}

#[async_trait]
impl GraphStore for Neo4jClient {
    async fn read(&self, query: &str, params: Value) -> Result<Vec<Row>, GraphError> {
        self.run(query, params, true).await
    }

    async fn write(&self, query: &str, params: Value) -> Result<Vec<Row>, GraphError> {
        self.run(query, params, false).await
    }
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Serialize)]
struct CommitRequest<'a> {
    statements: Vec<Statement<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Statement<'a> {
    statement: &'a str,
    parameters: Value,
    result_data_contents: [&'static str; 1],
}

#[derive(Debug, Deserialize)]
struct CommitResponse {
    #[serde(default)]
    results: Vec<StatementResult>,
    #[serde(default)]
    errors: Vec<Neo4jError>,
}

#[derive(Debug, Deserialize)]
struct StatementResult {
    columns: Vec<String>,
    #[serde(default)]
    data: Vec<DataEntry>,
}

#[derive(Debug, Deserialize)]
struct DataEntry {
    row: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct Neo4jError {
    code: String,
    message: String,
}

/// Flatten the single statement result into rows, surfacing the first error.
fn into_rows(response: CommitResponse) -> Result<Vec<Row>, GraphError> {
    if let Some(error) = response.errors.into_iter().next() {
        return Err(GraphError::Query {
            code: error.code,
            message: error.message,
        });
    }

    let result = response
        .results
        .into_iter()
        .next()
        .ok_or_else(|| GraphError::InvalidResponse("no statement result".to_string()))?;

    let columns = Arc::new(result.columns);
    Ok(result
        .data
        .into_iter()
        .map(|entry| Row::new(columns.clone(), entry.row))
        .collect())
}
