//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

use super::websocket::VideoDataDto;

/// `GET /` response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootDto {
    pub message: String,
}

/// `GET /health` response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthDto {
    pub status: String,
    pub active_connections: usize,
    pub has_video_context: bool,
    pub supported_models: Vec<String>,
}

/// `GET /debug/context` response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextSnapshotDto {
    pub video: Option<VideoDataDto>,
    pub history: Vec<HistoryEntryDto>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntryDto {
    pub user: String,
    pub assistant: String,
    /// RFC 3339 (UTC)
    pub recorded_at: String,
}
