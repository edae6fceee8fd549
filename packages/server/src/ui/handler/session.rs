//! Per-connection message dispatch.
//!
//! Frames from one connection are handled one at a time. A chat question runs
//! in its own task so that the engine call survives the connection closing;
//! its reply is then dropped by the pusher.

use std::sync::Arc;

use crate::{
    domain::{ConnectionId, MessagePushError},
    infrastructure::dto::websocket::{ClientMessage, ServerMessage, VideoDataDto},
    ui::state::AppState,
};

pub const INVALID_MESSAGE: &str = "Invalid message format";
pub const VIDEO_UPDATED: &str = "Video context updated";

pub struct Session {
    state: Arc<AppState>,
    connection_id: ConnectionId,
}

impl Session {
    pub fn new(state: Arc<AppState>, connection_id: ConnectionId) -> Self {
        Self {
            state,
            connection_id,
        }
    }

    /// Decode one text frame and handle it to completion.
    pub async fn handle_frame(&self, text: &str) {
        let message = match serde_json::from_str::<ClientMessage>(text) {
            Ok(message) => message,
            Err(e) => {
                tracing::warn!(
                    "Failed to parse message from '{}': {}",
                    self.connection_id,
                    e
                );
                self.reply(ServerMessage::error(INVALID_MESSAGE)).await;
                return;
            }
        };

        match message {
            ClientMessage::Config { api_key, model } => self.configure(api_key, model).await,
            ClientMessage::VideoUpdate { video_data } => self.update_video(video_data).await,
            ClientMessage::Chat { message } => self.chat(message).await,
        }
    }

    /// Answer a frame that could not be read as text.
    pub async fn reject_frame(&self) {
        self.reply(ServerMessage::error(INVALID_MESSAGE)).await;
    }

    async fn configure(&self, api_key: String, model: Option<String>) {
        let reply = match self
            .state
            .configure_session_usecase
            .execute(&self.connection_id, api_key, model)
            .await
        {
            Ok(model) => {
                tracing::info!(
                    "Connection '{}' configured with model '{}'",
                    self.connection_id,
                    model
                );
                ServerMessage::status(format!("Configuration updated (model: {model})"))
            }
            Err(e) => {
                tracing::warn!(
                    "Rejected configuration for '{}': {}",
                    self.connection_id,
                    e
                );
                ServerMessage::error(e.to_string())
            }
        };
        self.reply(reply).await;
    }

    async fn update_video(&self, video_data: VideoDataDto) {
        // DTO から Domain Model への変換
        self.state
            .update_video_context_usecase
            .execute(video_data.into())
            .await;
        self.reply(ServerMessage::status(VIDEO_UPDATED)).await;
    }

    async fn chat(&self, utterance: String) {
        let state = self.state.clone();
        let connection_id = self.connection_id;

        let task = tokio::spawn(async move {
            let reply = match state
                .answer_question_usecase
                .execute(&connection_id, &utterance)
                .await
            {
                Ok(reply) => ServerMessage::chat_response(reply.into_message()),
                Err(e) => ServerMessage::error(e.to_string()),
            };
            push(&state, &connection_id, &reply).await;
        });

        if let Err(e) = task.await {
            tracing::error!("Chat task for '{}' failed: {}", self.connection_id, e);
        }
    }

    async fn reply(&self, message: ServerMessage) {
        push(&self.state, &self.connection_id, &message).await;
    }
}

async fn push(state: &AppState, connection_id: &ConnectionId, message: &ServerMessage) {
    let json = match serde_json::to_string(message) {
        Ok(json) => json,
        Err(e) => {
            tracing::error!("Failed to serialize reply: {}", e);
            return;
        }
    };

    match state.message_pusher.push_to(connection_id, &json).await {
        Ok(()) => {}
        Err(MessagePushError::ClientNotFound(_)) => {
            tracing::debug!("Connection '{}' is gone, dropping reply", connection_id);
        }
        Err(e) => {
            tracing::warn!("Failed to push reply to '{}': {}", connection_id, e);
        }
    }
}
