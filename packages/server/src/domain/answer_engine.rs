//! Answer engine port and the policy wrapped around every call.
//!
//! ## 責務
//!
//! - `AnswerEngine` trait: 外部の生成モデルを呼び出すインターフェース
//! - `generate_with_fallback`: タイムアウトとモデルのフォールバック（1 回のみ）
//! - `truncate_brief`: brief 指定時の事後的な切り詰め

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use super::{
    classifier::ResponseLength,
    value_object::{Credential, ModelSelector},
};

/// Brief answers longer than this many characters are cut to one sentence.
pub const BRIEF_CHAR_LIMIT: usize = 150;

/// Default bound on a single engine call.
pub const DEFAULT_ENGINE_TIMEOUT: Duration = Duration::from_secs(60);

/// Failures reported by an answer engine.
///
/// The `Display` text is what the error classifier inspects.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The engine does not know or refuses the requested model.
    #[error("model '{model}' not found: {message}")]
    ModelRejected { model: String, message: String },

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("response blocked by safety filters ({0})")]
    Blocked(String),

    #[error("the engine returned an empty response")]
    EmptyResponse,

    #[error("transport error: {0}")]
    Transport(String),

    #[error("request timed out after {0:?}")]
    Timeout(Duration),
}

/// 外部の生成モデル（answer engine）へのインターフェース
///
/// 認証情報は呼び出しごとに渡され、実装側でプロセス全体に保持してはならない。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnswerEngine: Send + Sync {
    /// `prompt` に対する応答テキストを生成する
    async fn generate(
        &self,
        prompt: &str,
        credential: &Credential,
        model: &ModelSelector,
    ) -> Result<String, EngineError>;
}

/// Retry and timeout policy for engine calls.
#[derive(Debug, Clone)]
pub struct AnswerPolicy {
    /// Model retried once when the requested one is rejected.
    pub fallback_model: ModelSelector,
    /// Bound on each individual attempt.
    pub timeout: Duration,
}

impl Default for AnswerPolicy {
    fn default() -> Self {
        Self {
            fallback_model: ModelSelector::default(),
            timeout: DEFAULT_ENGINE_TIMEOUT,
        }
    }
}

/// Call the engine, falling back once to `policy.fallback_model` when the
/// requested model is rejected.
pub async fn generate_with_fallback(
    engine: &dyn AnswerEngine,
    prompt: &str,
    credential: &Credential,
    model: &ModelSelector,
    policy: &AnswerPolicy,
) -> Result<String, EngineError> {
    match attempt(engine, prompt, credential, model, policy.timeout).await {
        Err(EngineError::ModelRejected { message, .. }) if *model != policy.fallback_model => {
            tracing::warn!(
                "Model '{}' rejected ({}), retrying with '{}'",
                model,
                message,
                policy.fallback_model
            );
            attempt(
                engine,
                prompt,
                credential,
                &policy.fallback_model,
                policy.timeout,
            )
            .await
        }
        result => result,
    }
}

async fn attempt(
    engine: &dyn AnswerEngine,
    prompt: &str,
    credential: &Credential,
    model: &ModelSelector,
    timeout: Duration,
) -> Result<String, EngineError> {
    tokio::time::timeout(timeout, engine.generate(prompt, credential, model))
        .await
        .map_err(|_| EngineError::Timeout(timeout))?
}

/// Cut an over-long brief answer down to its first sentence.
///
/// Splits on the literal `". "` and keeps the first segment plus one period,
/// even when that leaves the text unchanged apart from the added period.
pub fn truncate_brief(answer: &str, length: ResponseLength) -> String {
    if length != ResponseLength::Brief || answer.chars().count() <= BRIEF_CHAR_LIMIT {
        return answer.to_string();
    }
    let first = answer.split(". ").next().unwrap_or_default();
    format!("{first}.")
}
