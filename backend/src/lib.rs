pub mod auth;
pub mod catalog;
pub mod config;
pub mod error;
pub mod feedback;
pub mod graph;
pub mod home;
pub mod logging;
pub mod render;
pub mod routes;
pub mod sandbox;
pub mod sitemap;
pub mod test_util;

pub use auth::{AuthUser, JwksClient};
pub use catalog::{CategoryService, EnrolmentService, GraphCatalog};
pub use config::Config;
pub use error::AppError;
pub use graph::{GraphStore, Neo4jClient};
pub use home::HomePage;
pub use render::{JsonRenderer, PageRenderer};
pub use sandbox::SandboxClient;

use std::sync::Arc;

use axum::http::{HeaderMap, HeaderValue};
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    /// Token validation. `None` when no OIDC issuer is configured.
    pub auth: Option<JwksClient>,
    pub graph: Arc<dyn GraphStore>,
    pub categories: Arc<dyn CategoryService>,
    pub enrolments: Arc<dyn EnrolmentService>,
    pub renderer: Arc<dyn PageRenderer>,
    /// Sandbox API client. `None` when not configured.
    pub sandbox: Option<SandboxClient>,
}

impl AppState {
    /// Build production state: Neo4j-backed services, JSON rendering, and
    /// the optional OIDC and sandbox integrations.
    pub async fn from_config(config: Config) -> Result<Self, auth::AuthError> {
        let graph: Arc<dyn GraphStore> = Arc::new(Neo4jClient::new(&config.neo4j));
        let catalog = Arc::new(GraphCatalog::new(
            graph.clone(),
            config.catalog.negative_statuses.clone(),
        ));

        let auth = match config.auth {
            Some(ref auth) => Some(JwksClient::new(&auth.issuer).await?),
            None => {
                tracing::warn!("No OIDC issuer configured, all visitors are anonymous");
                None
            }
        };

        let sandbox = config
            .sandbox
            .as_ref()
            .map(|sandbox| SandboxClient::new(&sandbox.base_url));

        Ok(Self {
            config,
            auth,
            graph,
            categories: catalog.clone(),
            enrolments: catalog,
            renderer: Arc::new(JsonRenderer),
            sandbox,
        })
    }

    /// The signed-in visitor, or `None` for anonymous requests.
    pub async fn current_user(&self, headers: &HeaderMap) -> Option<AuthUser> {
        match self.auth {
            Some(ref auth) => auth.current_user(headers).await,
            None => None,
        }
    }
}

/// Build the full application router with its middleware stack.
pub fn app(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.config.cors.origins);

    routes::router()
        .layer(axum::middleware::from_fn(logging::request_logger))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(origins: &str) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if origins.trim() == "*" {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();
    layer.allow_origin(AllowOrigin::list(origins))
}
