//! In-memory stand-ins for the graph and catalog services.

mod jwt;

pub use jwt::{sign_token, sign_token_expiring, test_jwks, TEST_KID};

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use academy_common::{Category, EnrolmentsResponse};
use async_trait::async_trait;
use serde_json::Value;

use crate::auth::AuthUser;
use crate::catalog::{CategoryService, EnrolmentService};
use crate::config::Config;
use crate::graph::{GraphError, GraphStore, Row};
use crate::render::JsonRenderer;
use crate::AppState;

/// Graph that answers every read with the same rows and records each call.
pub struct FakeGraph {
    rows: Vec<Row>,
    fail: bool,
    calls: Mutex<Vec<(String, Value)>>,
}

impl FakeGraph {
    pub fn with_rows(rows: Vec<Row>) -> Self {
        Self {
            rows,
            fail: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            rows: Vec::new(),
            fail: true,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// `(query, params)` of every call so far.
    pub fn calls(&self) -> Vec<(String, Value)> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, query: &str, params: Value) -> Result<(), GraphError> {
        self.calls.lock().unwrap().push((query.to_string(), params));
        if self.fail {
            return Err(GraphError::Request("connection refused".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl GraphStore for FakeGraph {
    async fn read(&self, query: &str, params: Value) -> Result<Vec<Row>, GraphError> {
        self.record(query, params)?;
        Ok(self.rows.clone())
    }

    async fn write(&self, query: &str, params: Value) -> Result<Vec<Row>, GraphError> {
        self.record(query, params)?;
        Ok(Vec::new())
    }
}

/// Fixed taxonomy, or a failing catalog.
pub struct FakeCategories {
    categories: Option<Vec<Category>>,
}

impl FakeCategories {
    pub fn new(categories: Vec<Category>) -> Self {
        Self {
            categories: Some(categories),
        }
    }

    pub fn failing() -> Self {
        Self { categories: None }
    }
}

#[async_trait]
impl CategoryService for FakeCategories {
    async fn categories(&self, _user: Option<&AuthUser>) -> Result<Vec<Category>, GraphError> {
        self.categories
            .clone()
            .ok_or_else(|| GraphError::Request("catalog unavailable".to_string()))
    }
}

/// Fixed enrolments for every user, or a failing lookup. Counts calls.
pub struct FakeEnrolments {
    response: Option<EnrolmentsResponse>,
    calls: AtomicUsize,
}

impl FakeEnrolments {
    pub fn ok(response: EnrolmentsResponse) -> Self {
        Self {
            response: Some(response),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            response: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EnrolmentService for FakeEnrolments {
    async fn user_enrolments(&self, _sub: &str) -> Result<EnrolmentsResponse, GraphError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.response
            .clone()
            .ok_or_else(|| GraphError::InvalidResponse("enrolments unavailable".to_string()))
    }
}

pub fn test_config() -> Config {
    let mut config = Config::default();
    config.server.host = "127.0.0.1".to_string();
    config.site.base_url = "https://academy.test".to_string();
    config.logging.level = "debug".to_string();
    config
}

/// Anonymous-only state over the given fakes.
pub fn create_test_state(
    graph: Arc<dyn GraphStore>,
    categories: Arc<dyn CategoryService>,
    enrolments: Arc<dyn EnrolmentService>,
) -> AppState {
    AppState {
        config: test_config(),
        auth: None,
        graph,
        categories,
        enrolments,
        renderer: Arc::new(JsonRenderer),
        sandbox: None,
    }
}
