//! Terminal client for the video chat assistant.
//!
//! Speaks the same WebSocket protocol as the browser extension so the server
//! can be exercised by hand.

pub mod domain;
pub mod error;
pub mod formatter;
mod runner;
mod session;
mod ui;

pub use runner::{ClientSettings, run_client};
