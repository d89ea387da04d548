//! Catalog and enrolment lookups.
//!
//! Both services read the course graph. They are traits so the homepage can
//! be assembled against fakes in tests.

mod categories;
mod enrolments;

use std::sync::Arc;

use academy_common::{Category, CourseStatus, EnrolmentsResponse};
use async_trait::async_trait;

use crate::auth::AuthUser;
use crate::graph::{GraphError, GraphStore};

/// Source of the course taxonomy.
#[async_trait]
pub trait CategoryService: Send + Sync {
    /// Top-level categories with their children and listed courses.
    ///
    /// When `user` is given, courses they are enrolled in are flagged.
    async fn categories(&self, user: Option<&AuthUser>) -> Result<Vec<Category>, GraphError>;
}

/// Source of per-user enrolments.
#[async_trait]
pub trait EnrolmentService: Send + Sync {
    async fn user_enrolments(&self, sub: &str) -> Result<EnrolmentsResponse, GraphError>;
}

/// Graph-backed implementation of both services.
pub struct GraphCatalog {
    graph: Arc<dyn GraphStore>,
    negative_statuses: Vec<CourseStatus>,
}

impl GraphCatalog {
    pub fn new(graph: Arc<dyn GraphStore>, negative_statuses: Vec<CourseStatus>) -> Self {
        Self {
            graph,
            negative_statuses,
        }
    }

    /// Negative statuses as query parameters. `redirect` is always hidden.
    fn hidden_statuses(&self) -> Vec<&'static str> {
        let mut hidden: Vec<&'static str> =
            self.negative_statuses.iter().map(CourseStatus::as_str).collect();
        if !hidden.contains(&CourseStatus::Redirect.as_str()) {
            hidden.push(CourseStatus::Redirect.as_str());
        }
        hidden
    }
}
