//! Development server implementation.

use std::net::SocketAddr;
use std::path::PathBuf;

use axum::{response::IntoResponse, routing::get, Json, Router};
use serde_json::json;
use tower_http::services::ServeDir;

/// Configuration for the development server.
#[derive(Debug, Clone)]
pub struct DevServerConfig {
    /// Directory `static_dir` is resolved against
    pub base_path: PathBuf,

    /// Build output directory to serve
    pub static_dir: PathBuf,

    /// Port to listen on
    pub port: u16,

    /// Host to bind to
    pub host: String,

    /// Open browser on start
    pub open: bool,
}

impl DevServerConfig {
    /// Directory static files are served from.
    pub fn serve_dir(&self) -> PathBuf {
        self.base_path.join(&self.static_dir)
    }
}

impl Default for DevServerConfig {
    fn default() -> Self {
        Self {
            base_path: PathBuf::from("."),
            static_dir: PathBuf::from("dist"),
            port: 9000,
            host: "127.0.0.1".to_string(),
            open: false,
        }
    }
}

/// Errors that can occur with the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Invalid address {0}")]
    InvalidAddress(String),

    #[error("Failed to bind to {0}: {1}")]
    BindError(SocketAddr, String),

    #[error("Server error on {0}: {1}")]
    ServeError(SocketAddr, String),
}

/// Development server.
pub struct DevServer {
    config: DevServerConfig,
}

impl DevServer {
    /// Create a new development server.
    pub fn new(config: DevServerConfig) -> Self {
        Self { config }
    }

    /// Address the server binds to.
    pub fn addr(&self) -> Result<SocketAddr, ServerError> {
        let addr = format!("{}:{}", self.config.host, self.config.port);
        addr.parse().map_err(|_| ServerError::InvalidAddress(addr))
    }

    /// Start the development server.
    pub async fn start(self) -> Result<(), ServerError> {
        let addr = self.addr()?;
        let serve_dir = self.config.serve_dir();

        if !serve_dir.is_dir() {
            tracing::warn!(
                "Static directory {} does not exist yet. Run 'pagepack build' first.",
                serve_dir.display()
            );
        }

        let app = router(&self.config);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::BindError(addr, e.to_string()))?;

        tracing::info!("Starting server on port: {}", self.config.port);
        tracing::info!("Serving {} at http://{}", serve_dir.display(), addr);

        if self.config.open {
            let url = format!("http://{}", addr);
            let _ = open::that(&url);
        }

        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::ServeError(addr, e.to_string()))?;

        Ok(())
    }
}

/// Build the router: two canned routes, everything else from the static directory.
pub fn router(config: &DevServerConfig) -> Router {
    Router::new()
        .route("/path", get(path_handler))
        .route("/data", get(data_handler))
        .fallback_service(ServeDir::new(config.serve_dir()))
}

/// Handler for `/path`.
async fn path_handler() -> impl IntoResponse {
    "hi there"
}

/// Handler for `/data`.
async fn data_handler() -> impl IntoResponse {
    Json(json!({ "key": "value" }))
}
