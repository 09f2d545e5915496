// Service configuration.
// Reads settings from the environment, falling back to defaults with a warning.

use std::net::SocketAddr;
use std::time::Duration;

use crate::cache::DEFAULT_TTL;

const DEFAULT_LOGIN: &str = "octocat";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;

/// Runtime configuration for the folio service.
#[derive(Debug, Clone)]
pub struct Config {
    /// GitHub account whose repositories are served.
    pub login: String,
    /// Optional bearer token; without it the featured view is empty.
    pub token: Option<String>,
    /// Address the HTTP server binds to.
    pub bind: SocketAddr,
    /// TTL for the in-memory cache.
    pub cache_ttl: Duration,
}

impl Config {
    /// Build a configuration from environment variables.
    ///
    /// Invalid values log a warning and fall back to defaults; configuration
    /// never aborts startup.
    pub fn from_env() -> Self {
        let login =
            std::env::var("PORTFOLIO_LOGIN").unwrap_or_else(|_| DEFAULT_LOGIN.to_string());
        let token = std::env::var("GITHUB_TOKEN").ok().filter(|t| !t.is_empty());

        Self {
            login,
            token,
            bind: parse_bind(
                std::env::var("BIND_HOST").ok(),
                std::env::var("PORT").ok(),
            ),
            cache_ttl: parse_ttl_hours(std::env::var("CACHE_TTL_HOURS").ok()),
        }
    }
}

fn parse_ttl_hours(raw: Option<String>) -> Duration {
    match raw {
        None => DEFAULT_TTL,
        Some(value) => match value.parse::<u64>() {
            Ok(hours) if hours > 0 => Duration::from_secs(hours * 60 * 60),
            _ => {
                tracing::warn!(value = %value, "invalid CACHE_TTL_HOURS, using default");
                DEFAULT_TTL
            }
        },
    }
}

fn parse_bind(host: Option<String>, port: Option<String>) -> SocketAddr {
    let host = host.unwrap_or_else(|| DEFAULT_HOST.to_string());
    let port = port
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(DEFAULT_PORT);

    format!("{}:{}", host, port).parse().unwrap_or_else(|_| {
        tracing::warn!(host = %host, "invalid bind host, using default");
        SocketAddr::from(([0, 0, 0, 0], port))
    })
}
