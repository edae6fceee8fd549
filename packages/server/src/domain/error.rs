//! Domain error types.

use thiserror::Error;

/// Value object の生成エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    /// API キーが空
    #[error("API key must not be empty")]
    EmptyCredential,

    /// モデル名が空
    #[error("model name must not be empty")]
    EmptyModelSelector,
}

/// Repository 操作のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// 登録されていない接続
    #[error("Connection '{0}' is not registered")]
    ConnectionNotFound(String),
}

/// MessagePusher のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    /// 送信先の接続が存在しない（既に切断済み）
    #[error("Client '{0}' not found")]
    ClientNotFound(String),

    /// チャンネルへの送信に失敗
    #[error("Failed to push message: {0}")]
    PushFailed(String),
}
