//! WebSocket message DTOs.
//!
//! Every frame is a JSON object with a `type` discriminator.

use serde::{Deserialize, Serialize};

/// Messages sent by clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Set (or replace) this connection's API key and model.
    Config {
        api_key: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        model: Option<String>,
    },
    /// Replace the shared viewing context.
    VideoUpdate { video_data: VideoDataDto },
    /// Ask a question about the current video.
    Chat { message: String },
}

/// The video a client is watching. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VideoDataDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    /// Length in seconds; browsers may report fractions or `null`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Playback position in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_time: Option<f64>,
}

/// Messages sent by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    Status { message: String },
    ChatResponse { message: String },
    Error { message: String },
}

impl ServerMessage {
    pub fn status(message: impl Into<String>) -> Self {
        Self::Status {
            message: message.into(),
        }
    }

    pub fn chat_response(message: impl Into<String>) -> Self {
        Self::ChatResponse {
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Status { message } | Self::ChatResponse { message } | Self::Error { message } => {
                message
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_config_without_model() {
        // テスト項目: model を省略した config メッセージをデコードできる
        // given (前提条件):
        let json = r#"{"type": "config", "api_key": "AIzaKey"}"#;

        // when (操作):
        let message: ClientMessage = serde_json::from_str(json).unwrap();

        // then (期待する結果):
        assert_eq!(
            message,
            ClientMessage::Config {
                api_key: "AIzaKey".to_string(),
                model: None,
            }
        );
    }

    #[test]
    fn test_decode_video_update_from_browser() {
        // テスト項目: ブラウザ拡張が送る video_update をデコードできる（null や小数を含む）
        // given (前提条件):
        let json = r#"{
            "type": "video_update",
            "video_data": {
                "title": "Rust in 100 Seconds",
                "platform": "YouTube",
                "url": "https://www.youtube.com/watch?v=5C_HPTJg5ek",
                "currentTime": 42,
                "duration": null,
                "timestamp": 1700000000000
            }
        }"#;

        // when (操作):
        let message: ClientMessage = serde_json::from_str(json).unwrap();

        // then (期待する結果):
        let ClientMessage::VideoUpdate { video_data } = message else {
            panic!("expected video_update");
        };
        assert_eq!(video_data.title.as_deref(), Some("Rust in 100 Seconds"));
        assert_eq!(video_data.current_time, Some(42.0));
        assert_eq!(video_data.duration, None);
    }

    #[test]
    fn test_decode_chat_and_reject_unknown_type() {
        // テスト項目: chat はデコードでき、未知の type はエラーになる
        // given (前提条件):
        let chat = r#"{"type": "chat", "message": "What is this about?"}"#;
        let unknown = r#"{"type": "dance", "message": "?"}"#;

        // when (操作):
        let chat_result = serde_json::from_str::<ClientMessage>(chat);
        let unknown_result = serde_json::from_str::<ClientMessage>(unknown);

        // then (期待する結果):
        assert_eq!(
            chat_result.unwrap(),
            ClientMessage::Chat {
                message: "What is this about?".to_string()
            }
        );
        assert!(unknown_result.is_err());
    }

    #[test]
    fn test_encode_server_messages() {
        // テスト項目: サーバーメッセージが type 付きの JSON にエンコードされる
        // given (前提条件):
        let messages = [
            (
                ServerMessage::status("Video context updated"),
                r#"{"type":"status","message":"Video context updated"}"#,
            ),
            (
                ServerMessage::chat_response("Hi"),
                r#"{"type":"chat_response","message":"Hi"}"#,
            ),
            (
                ServerMessage::error("API key and model not configured"),
                r#"{"type":"error","message":"API key and model not configured"}"#,
            ),
        ];

        for (message, expected) in messages {
            // when (操作):
            let json = serde_json::to_string(&message).unwrap();

            // then (期待する結果):
            assert_eq!(json, expected);
        }
    }
}
