//! Academy website backend.

use std::sync::Arc;

use tokio::net::TcpListener;

use academy_backend::{app, logging, AppState, Config};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::load().map_err(|e| {
        format!(
            "Failed to load configuration: {}. \
             Check config.toml or the ACADEMY__SECTION__KEY environment variables.",
            e
        )
    })?;

    logging::init(&config.logging.level);

    tracing::info!("Starting academy backend");
    tracing::info!(
        "Using Neo4j at {} (database {})",
        config.neo4j.uri,
        config.neo4j.database
    );

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = Arc::new(AppState::from_config(config).await?);

    let router = app(state);

    tracing::info!("Listening on {}", addr);
    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
