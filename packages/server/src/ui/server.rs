//! Server execution logic.

use std::sync::Arc;

use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use super::{
    handler::{debug_context, health_check, root, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Path of the WebSocket endpoint.
pub const WEBSOCKET_PATH: &str = "/ws/chat";

/// Video chat assistant server
///
/// # Example
///
/// ```ignore
/// let server = Server::new(app_state);
/// server.run("127.0.0.1".to_string(), 8000).await?;
/// ```
pub struct Server {
    state: Arc<AppState>,
}

impl Server {
    pub fn new(state: AppState) -> Self {
        Self {
            state: Arc::new(state),
        }
    }

    /// Build the router with every endpoint and request tracing.
    pub fn into_router(self) -> Router {
        let trace_layer = TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_response(DefaultOnResponse::new().level(Level::DEBUG));

        Router::new()
            // WebSocket エンドポイント
            .route(WEBSOCKET_PATH, get(websocket_handler))
            // HTTP エンドポイント
            .route("/", get(root))
            .route("/health", get(health_check))
            .route("/debug/context", get(debug_context))
            .layer(trace_layer)
            .with_state(self.state)
    }

    /// Bind to `host:port` and serve until a shutdown signal arrives.
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), BoxError> {
        let bind_addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&bind_addr).await?;
        self.serve(listener).await
    }

    /// Serve on an already bound listener until a shutdown signal arrives.
    pub async fn serve(self, listener: TcpListener) -> Result<(), BoxError> {
        let local_addr = listener.local_addr()?;
        tracing::info!("Video chat assistant listening on {}", local_addr);
        tracing::info!("Connect to: ws://{}{}", local_addr, WEBSOCKET_PATH);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        axum::serve(listener, self.into_router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
