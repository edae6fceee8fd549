//! UseCase 層のエラー型

use thiserror::Error;

use crate::domain::{RepositoryError, ValueObjectError};

/// 設定更新時のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigureError {
    /// API キーやモデル名が不正
    #[error(transparent)]
    Invalid(#[from] ValueObjectError),

    /// 既に切断された接続への設定
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// 質問応答時のエラー
///
/// answer engine の失敗はエラーではなく `ChatReply::Failure` として返す。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnswerError {
    #[error("API key and model not configured")]
    Unconfigured,
}
