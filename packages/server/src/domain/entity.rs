//! Entities: records the assistant keeps in memory.

use super::value_object::{Credential, ModelSelector, Timestamp};

/// Configuration a connection supplied with its last `config` message.
///
/// Replaced wholesale by newer `config` messages, never merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    pub credential: Credential,
    pub model: ModelSelector,
}

impl ConnectionConfig {
    pub fn new(credential: Credential, model: ModelSelector) -> Self {
        Self { credential, model }
    }
}

/// The video currently being watched, as last reported by any client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewingContext {
    pub title: Option<String>,
    pub platform: Option<String>,
    pub duration_seconds: u64,
    pub url: Option<String>,
    pub current_time_seconds: u64,
}

impl ViewingContext {
    pub fn title_or_unknown(&self) -> &str {
        self.title.as_deref().unwrap_or(UNKNOWN)
    }

    pub fn platform_or_unknown(&self) -> &str {
        self.platform.as_deref().unwrap_or(UNKNOWN)
    }

    pub fn url_or_unknown(&self) -> &str {
        self.url.as_deref().unwrap_or(UNKNOWN)
    }
}

const UNKNOWN: &str = "Unknown";

/// One completed question/answer exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatHistoryEntry {
    pub user_text: String,
    pub assistant_text: String,
    pub recorded_at: Timestamp,
}

impl ChatHistoryEntry {
    pub fn new(user_text: String, assistant_text: String, recorded_at: Timestamp) -> Self {
        Self {
            user_text,
            assistant_text,
            recorded_at,
        }
    }
}
