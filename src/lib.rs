pub mod app;
pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;

use std::sync::Arc;

use config::Config;
use error::StartupError;
use repository::Repository;
use service::NoteService;

/// Connects to the database, bootstraps the schema and serves the API until
/// the listener fails.
pub async fn run(config: Config) -> Result<(), StartupError> {
    // Repository creation and bootstrap
    let mut repo = Repository::new(&config.database_url).await?;
    repo.bootstrap().await?;

    // Service creation
    let service = Arc::new(NoteService::new(Arc::new(repo)));

    let router = app::build_router(service, &config);

    let listener = tokio::net::TcpListener::bind(config.socket_addr()).await?;

    tracing::info!("REST server starting, listening on {}", listener.local_addr()?);
    tracing::info!("Allowed frontend origin: {}", config.frontend_origin);

    axum::serve(listener, router).await?;

    Ok(())
}
