//! Video chat assistant server.
//!
//! Clients report the video they are watching and ask questions about it over
//! a WebSocket; answers come from Gemini.
//!
//! Layers, from the inside out:
//! - `domain`: value objects, entities, classification and prompt rules, ports
//! - `usecase`: one struct per operation
//! - `infrastructure`: in-memory stores, the WebSocket pusher, the Gemini
//!   adapter and wire DTOs
//! - `ui`: the axum router and per-connection session handling

pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
