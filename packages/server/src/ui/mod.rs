//! UI layer: the axum router, WebSocket session handling and HTTP endpoints.

mod handler;
mod server;
mod signal;
pub mod state;

pub use server::{Server, WEBSOCKET_PATH};
pub use state::{AppState, AssistantSettings};
