//! Request handlers.

mod http;
mod session;
mod websocket;

pub use http::{debug_context, health_check, root};
pub use websocket::websocket_handler;
