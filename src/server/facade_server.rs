use crate::config::ServerConfig;
use crate::error::{FacadeError, Result};
use crate::server::handlers;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use log::{debug, info};
use tokio::sync::mpsc;

/// Shared handler state: the shutdown trigger for the `/shutdown` endpoint
#[derive(Clone)]
pub struct AppState {
    pub(crate) shutdown: mpsc::Sender<()>,
}

/// Local HTTP facade over the model registry, validation adapter and
/// datastack codec.
///
/// One server instance serves one local desktop client; every request is a
/// bounded synchronous computation over the immutable registry, so no
/// cross-request state exists beyond the shutdown channel.
pub struct FacadeServer {
    config: ServerConfig,
    state: AppState,
    shutdown_rx: Option<mpsc::Receiver<()>>,
}

impl FacadeServer {
    pub fn new(config: ServerConfig) -> Self {
        let (shutdown_tx, shutdown_rx) = mpsc::channel(1);
        Self {
            config,
            state: AppState {
                shutdown: shutdown_tx,
            },
            shutdown_rx: Some(shutdown_rx),
        }
    }

    /// Build the router with every endpoint the desktop client calls
    pub fn router(&self) -> Router {
        debug!("building facade router");
        Router::new()
            .route("/ready", get(handlers::get_ready))
            .route("/shutdown", get(handlers::get_shutdown))
            .route("/models", get(handlers::get_models))
            .route("/getspec", post(handlers::post_getspec))
            .route("/validate", post(handlers::post_validate))
            .route("/post_datastack_file", post(handlers::post_datastack_file))
            .route(
                "/write_parameter_set_file",
                post(handlers::post_write_parameter_set_file),
            )
            .route("/save_to_python", post(handlers::post_save_to_python))
            .layer(DefaultBodyLimit::max(self.config.max_payload_bytes))
            .with_state(self.state.clone())
    }

    /// Bind and serve until `/shutdown` is requested
    pub async fn run(&mut self) -> Result<()> {
        self.config
            .validate()
            .map_err(|e| FacadeError::Io(std::io::Error::new(std::io::ErrorKind::InvalidInput, e)))?;

        let address = self.config.address();
        let listener = tokio::net::TcpListener::bind(address).await?;
        info!("modelstack facade listening on http://{}", address);

        let mut shutdown_rx = self
            .shutdown_rx
            .take()
            .expect("run called twice on the same server");
        axum::serve(listener, self.router())
            .with_graceful_shutdown(async move {
                shutdown_rx.recv().await;
                info!("shutdown requested, draining connections");
            })
            .await?;

        info!("modelstack facade stopped");
        Ok(())
    }
}
