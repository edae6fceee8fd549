//! Data Transfer Objects (DTOs) for the assistant.
//!
//! DTOs are organized by protocol:
//! - `websocket`: WebSocket message DTOs (the wire codec)
//! - `http`: HTTP API response DTOs

pub mod conversion;
pub mod http;
pub mod websocket;
