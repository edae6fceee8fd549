//! Error types for the client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// Connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Gave up after the configured number of reconnect attempts
    #[error("Failed to reconnect after {0} attempts")]
    ReconnectExhausted(u32),
}

/// Errors in a line typed by the user
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Usage: {0}")]
    MissingArgument(&'static str),

    #[error("'{0}' is not a valid number of seconds")]
    InvalidSeconds(String),

    #[error("No video set yet. Use /video first")]
    NoVideo,

    #[error("Unknown command '{0}'. Type /help for the list of commands")]
    UnknownCommand(String),
}
