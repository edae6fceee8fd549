//! Message formatting utilities for client display.

use chrono::{DateTime, Local, Utc};
use vidchat_server::infrastructure::dto::websocket::ServerMessage;

use crate::error::InputError;

const RULE: &str = "------------------------------------------------------------";

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format a reply from the server
    ///
    /// # Arguments
    ///
    /// * `message` - The decoded server message
    /// * `received_at` - Unix timestamp when the reply arrived (milliseconds)
    pub fn format_server_message(message: &ServerMessage, received_at: i64) -> String {
        let time = Self::format_clock(received_at);
        match message {
            ServerMessage::Status { message } => format!("\n* {message} ({time})\n"),
            ServerMessage::ChatResponse { message } => {
                format!("\n\n{RULE}\n@assistant ({time}):\n{message}\n{RULE}\n")
            }
            ServerMessage::Error { message } => format!("\n! Error: {message}\n"),
        }
    }

    /// Format a frame that is not a known server message
    pub fn format_raw_message(text: &str) -> String {
        format!("\n[raw] {}\n", text)
    }

    /// Format a problem with a typed line
    pub fn format_input_error(error: &InputError) -> String {
        format!("! {}\n", error)
    }

    /// Format the list of commands
    pub fn format_help() -> String {
        [
            "Commands:",
            "  /config <api_key> [model]                              set the API key and model",
            "  /video <title> | <platform> | <duration_secs> | <url>  report the video being watched",
            "  /seek <seconds | MM:SS>                                move the playback position",
            "  /help                                                  show this list",
            "  /quit                                                  exit",
            "Anything else is sent as a question about the video.",
        ]
        .join("\n")
            + "\n"
    }

    /// Local wall-clock time (`HH:MM:SS`) of a Unix timestamp in milliseconds
    pub fn format_clock(timestamp_millis: i64) -> String {
        DateTime::<Utc>::from_timestamp_millis(timestamp_millis)
            .map(|t| t.with_timezone(&Local).format("%H:%M:%S").to_string())
            .unwrap_or_else(|| "--:--:--".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_chat_response() {
        // テスト項目: chat_response は区切り線で囲まれ、本文をそのまま含む
        // given (前提条件):
        let message = ServerMessage::chat_response("The video explains ownership.");

        // when (操作):
        let result = MessageFormatter::format_server_message(&message, 0);

        // then (期待する結果):
        assert!(result.contains("@assistant ("));
        assert!(result.contains("\nThe video explains ownership.\n"));
        assert_eq!(result.matches(RULE).count(), 2);
    }

    #[test]
    fn test_format_status_and_error() {
        // テスト項目: status と error はそれぞれ異なる記号で表示される
        // given (前提条件):
        let status = ServerMessage::status("Video context updated");
        let error = ServerMessage::error("API key and model not configured");

        // when (操作):
        let status = MessageFormatter::format_server_message(&status, 0);
        let error = MessageFormatter::format_server_message(&error, 0);

        // then (期待する結果):
        assert!(status.starts_with("\n* Video context updated ("));
        assert_eq!(error, "\n! Error: API key and model not configured\n");
    }

    #[test]
    fn test_format_input_error() {
        // テスト項目: 入力エラーはメッセージ付きで表示される
        // given (前提条件):
        let error = InputError::NoVideo;

        // when (操作):
        let result = MessageFormatter::format_input_error(&error);

        // then (期待する結果):
        assert_eq!(result, "! No video set yet. Use /video first\n");
    }

    #[test]
    fn test_format_clock_shape() {
        // テスト項目: 時刻は HH:MM:SS 形式になる（タイムゾーンには依存しない形で確認）
        // given (前提条件):
        let timestamp = 1_700_000_000_000;

        // when (操作):
        let result = MessageFormatter::format_clock(timestamp);

        // then (期待する結果):
        assert_eq!(result.len(), 8);
        assert_eq!(result.matches(':').count(), 2);
    }

    #[test]
    fn test_format_help_lists_commands() {
        // テスト項目: ヘルプにすべてのコマンドが含まれる
        // given (前提条件) / when (操作):
        let help = MessageFormatter::format_help();

        // then (期待する結果):
        for command in ["/config", "/video", "/seek", "/help", "/quit"] {
            assert!(help.contains(command), "missing {command}");
        }
    }
}
