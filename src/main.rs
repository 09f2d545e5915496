// Folio service entry point.
// Bootstraps configuration, the GitHub client, the cache, and the Axum server.

mod cache;
mod config;
mod error;
mod github;
mod projects;
mod routes;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::cache::{MemoryCache, SystemClock};
use crate::config::Config;
use crate::error::Result;
use crate::github::GitHubClient;
use crate::projects::ProjectProvider;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("folio=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env();
    let client = GitHubClient::new(config.token.as_deref())?;
    if !client.has_token() {
        tracing::warn!("GITHUB_TOKEN not set, featured projects will be empty");
    }
    let cache = MemoryCache::new(config.cache_ttl, Arc::new(SystemClock));
    let provider = Arc::new(ProjectProvider::new(
        Arc::new(client),
        cache,
        config.login.clone(),
    ));

    let app = routes::router(provider);

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    tracing::info!(addr = %config.bind, login = %config.login, "starting folio server");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        tracing::info!("shutdown signal received");
    }
}
