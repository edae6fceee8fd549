//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::{
    infrastructure::dto::http::{ContextSnapshotDto, HealthDto, RootDto},
    ui::state::AppState,
};

/// Liveness message
pub async fn root() -> Json<RootDto> {
    Json(RootDto {
        message: "Video Chat Assistant backend is running!".to_string(),
    })
}

/// Health check endpoint
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthDto> {
    let report = state.get_health_usecase.execute().await;

    // Domain Model から DTO への変換
    Json(HealthDto {
        status: "healthy".to_string(),
        active_connections: report.active_connections,
        has_video_context: report.has_video_context,
        supported_models: report
            .supported_models
            .into_iter()
            .map(str::to_string)
            .collect(),
    })
}

/// Debug endpoint to inspect the shared viewing context and history
pub async fn debug_context(State(state): State<Arc<AppState>>) -> Json<ContextSnapshotDto> {
    let snapshot = state.get_context_snapshot_usecase.execute().await;

    Json(ContextSnapshotDto {
        video: snapshot.video.map(Into::into),
        history: snapshot.history.into_iter().map(Into::into).collect(),
    })
}
