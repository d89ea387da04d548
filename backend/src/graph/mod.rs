//! Graph data access.
//!
//! This module defines the `GraphStore` trait that runs Cypher against the
//! course graph and hands back rows of named fields. The Neo4j HTTP API is
//! the production implementation; tests substitute in-memory stores.

mod neo4j;

pub use neo4j::Neo4jClient;

use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("Graph request failed: {0}")]
    Request(String),
    #[error("Invalid graph response: {0}")]
    InvalidResponse(String),
    #[error("Query failed ({code}): {message}")]
    Query { code: String, message: String },
    #[error("Missing field: {0}")]
    MissingField(String),
    #[error("Invalid field {field}: {message}")]
    InvalidField { field: String, message: String },
}

/// One result row. Fields are addressed by the names in the query's RETURN clause.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    columns: Arc<Vec<String>>,
    values: Vec<Value>,
}

impl Row {
    pub fn new(columns: Arc<Vec<String>>, values: Vec<Value>) -> Self {
        Self { columns, values }
    }

    /// Build a row from `(name, value)` pairs.
    pub fn from_pairs<K: Into<String>>(pairs: impl IntoIterator<Item = (K, Value)>) -> Self {
        let (columns, values): (Vec<String>, Vec<Value>) =
            pairs.into_iter().map(|(k, v)| (k.into(), v)).unzip();
        Self::new(Arc::new(columns), values)
    }

    /// Raw value of a field, `None` if the query returned no such column.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.columns
            .iter()
            .position(|c| c == key)
            .and_then(|i| self.values.get(i))
    }

    /// Decode a field that must be present and non-null.
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Result<T, GraphError> {
        self.get_opt(key)?
            .ok_or_else(|| GraphError::MissingField(key.to_string()))
    }

    /// Decode a field that may be absent or null.
    pub fn get_opt<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, GraphError> {
        match self.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => serde_json::from_value(value.clone())
                .map(Some)
                .map_err(|e| GraphError::InvalidField {
                    field: key.to_string(),
                    message: e.to_string(),
                }),
        }
    }
}

/// Cypher executor.
#[async_trait]
pub trait GraphStore: Send + Sync {
    /// Run a read-only query.
    async fn read(&self, query: &str, params: Value) -> Result<Vec<Row>, GraphError>;

    /// Run a query that may write.
    async fn write(&self, query: &str, params: Value) -> Result<Vec<Row>, GraphError>;
}
