//! Web server for depot.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use crate::config::{Config, ServerConfig};
use crate::upload::{MessageCatalog, UploadPipeline};
use crate::{DepotError, Result};

use super::handlers::AppState;
use super::router::{create_health_router, create_router, create_swagger_router};
use super::staging::Stager;

/// Web server for the upload API.
pub struct WebServer {
    /// Server address.
    addr: SocketAddr,
    /// Application state.
    app_state: Arc<AppState>,
    /// Server configuration.
    server_config: ServerConfig,
}

impl WebServer {
    /// Create a new web server from the full configuration.
    ///
    /// Creates the staging and upload roots and loads the message catalog.
    pub fn new(config: &Config) -> Result<Self> {
        let addr = format!("{}:{}", config.server.host, config.server.port)
            .parse()
            .map_err(|e| DepotError::Config(format!("invalid server address: {e}")))?;

        let catalog = Arc::new(MessageCatalog::load_or_builtin(
            &config.catalog.locale,
            &config.catalog.path,
        )?);
        tracing::info!("Message catalog loaded (locale: {})", catalog.locale());

        let pipeline = UploadPipeline::from_config(&config.storage, catalog)?;
        let stager = Stager::from_config(&config.storage)?;
        tracing::info!(
            "Storage initialized (staging: {}, upload: {})",
            config.storage.staging_path,
            config.storage.upload_path
        );

        Ok(Self::with_state(
            addr,
            AppState::new(pipeline, stager),
            config.server.clone(),
        ))
    }

    /// Create a web server from prepared state.
    pub fn with_state(addr: SocketAddr, app_state: AppState, server_config: ServerConfig) -> Self {
        Self {
            addr,
            app_state: Arc::new(app_state),
            server_config,
        }
    }

    /// Get the server address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    fn build_router(&self) -> axum::Router {
        create_router(self.app_state.clone(), &self.server_config)
            .merge(create_health_router())
            .merge(create_swagger_router())
    }

    /// Run the web server until Ctrl-C.
    pub async fn run(self) -> std::result::Result<(), std::io::Error> {
        let router = self.build_router();

        let listener = TcpListener::bind(self.addr).await?;
        let local_addr = listener.local_addr()?;

        tracing::info!("Web server listening on http://{}", local_addr);

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }

    /// Run the server in the background and return the actual bound address.
    ///
    /// This is useful for testing when binding to port 0.
    pub async fn run_with_addr(self) -> std::result::Result<SocketAddr, std::io::Error> {
        let router = self.build_router();

        let listener = TcpListener::bind(self.addr).await?;
        let local_addr = listener.local_addr()?;

        tracing::info!("Web server listening on http://{}", local_addr);

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).await {
                tracing::error!("Web server error: {}", e);
            }
        });

        Ok(local_addr)
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
