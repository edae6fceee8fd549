//! Conversion logic between DTOs and domain entities.

use vidchat_shared::time::timestamp_to_rfc3339;

use crate::domain::entity::{ChatHistoryEntry, ViewingContext};
use crate::infrastructure::dto::{http::HistoryEntryDto, websocket::VideoDataDto};

/// Floor a client-reported number of seconds; negative, NaN or missing → 0.
fn whole_seconds(value: Option<f64>) -> u64 {
    match value {
        Some(seconds) if seconds.is_finite() && seconds > 0.0 => seconds.floor() as u64,
        _ => 0,
    }
}

// ========================================
// DTO → Domain Entity
// ========================================

impl From<VideoDataDto> for ViewingContext {
    fn from(dto: VideoDataDto) -> Self {
        Self {
            title: dto.title,
            platform: dto.platform,
            duration_seconds: whole_seconds(dto.duration),
            url: dto.url,
            current_time_seconds: whole_seconds(dto.current_time),
        }
    }
}

// ========================================
// Domain Entity → DTO
// ========================================

impl From<ViewingContext> for VideoDataDto {
    fn from(model: ViewingContext) -> Self {
        Self {
            title: model.title,
            platform: model.platform,
            duration: Some(model.duration_seconds as f64),
            url: model.url,
            current_time: Some(model.current_time_seconds as f64),
        }
    }
}

impl From<ChatHistoryEntry> for HistoryEntryDto {
    fn from(model: ChatHistoryEntry) -> Self {
        Self {
            user: model.user_text,
            assistant: model.assistant_text,
            recorded_at: timestamp_to_rfc3339(model.recorded_at.value()),
        }
    }
}
