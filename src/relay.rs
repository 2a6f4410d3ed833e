use std::net::SocketAddr;
use std::sync::Arc;

use tokio::signal;

pub mod dto;
mod handlers;

pub use handlers::build_router;

use crate::{
    config::CredentialProvider,
    infer::{DEFAULT_MODEL, Endpoint},
    prompts, service,
};

/// Everything a chat call needs. Shared read-only between requests.
pub struct Relay {
    credentials: Box<dyn CredentialProvider>,
    endpoint: Endpoint,
}

impl Relay {
    pub fn new(credentials: impl CredentialProvider, endpoint: Endpoint) -> Self {
        Self {
            credentials: Box::new(credentials),
            endpoint,
        }
    }

    /// Relays one user message upstream and returns the model's reply.
    ///
    /// The credential is resolved anew on every call.
    pub async fn chat(&self, message: &str) -> service::Result<Option<Box<str>>> {
        let credential = self.credentials.get_credential();
        let client = self.endpoint.connect(credential.as_deref()).map_err(|error| {
            tracing::error!("Upstream client unavailable: {}", error);
            service::Error::from(error)
        })?;

        let exchange = prompts::coach_exchange(message);
        let reply = client.complete(DEFAULT_MODEL, &exchange).await.map_err(|error| {
            tracing::error!("Chat completion failed: {:?}", error);
            service::Error::from(error)
        })?;

        if reply.is_none() {
            tracing::warn!("Upstream returned a choice without content");
        }
        Ok(reply)
    }
}

pub async fn serve(relay: Relay, addr: SocketAddr) -> std::io::Result<()> {
    let router = build_router(Arc::new(relay));

    tracing::info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", error);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(error) => {
                tracing::error!("Failed to install SIGTERM handler: {}", error);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            tracing::info!("Received terminate signal, shutting down");
        },
    }
}
