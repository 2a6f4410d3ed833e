use std::env;
use std::net::SocketAddr;

use anyhow::Context;
use coach_relay::{
    config::{self, EnvCredential, server, upstream},
    infer::Endpoint,
    relay::{self, Relay},
};
use tracing_subscriber::EnvFilter;

fn log_credential_presence(stage: &str) {
    match env::var(upstream::API_KEY_VAR) {
        Ok(key) if !key.is_empty() => {
            tracing::debug!(stage, length = key.len(), "{} is set", upstream::API_KEY_VAR)
        }
        _ => tracing::debug!(stage, "{} is missing or empty", upstream::API_KEY_VAR),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    log_credential_presence("before .env");
    match config::load_env_file() {
        Some(path) => tracing::info!("Loaded environment from {}", path.display()),
        None => tracing::info!("No .env file found, using process environment"),
    }
    if let Ok(cwd) = env::current_dir() {
        tracing::debug!("Working directory: {}", cwd.display());
    }
    log_credential_presence("after .env");
    config::validate();

    let endpoint = Endpoint::from_config().context("Failed to build upstream HTTP client")?;
    tracing::info!("Relaying chat completions to {}", endpoint.base_url());

    let relay = Relay::new(EnvCredential::default(), endpoint);
    let addr = SocketAddr::new(*server::HOST, *server::PORT);
    relay::serve(relay, addr)
        .await
        .with_context(|| format!("Server on {} failed", addr))
}
