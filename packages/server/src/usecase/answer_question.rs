//! UseCase: 動画についての質問に答える
//!
//! ## 処理の流れ
//!
//! 1. 接続の設定を確認（未設定なら `AnswerError::Unconfigured`）
//! 2. 視聴コンテキストを確認（未更新なら固定メッセージ、分類もプロンプト生成もしない）
//! 3. 発話を分類し、直近の履歴とあわせてプロンプトを組み立てる
//! 4. answer engine を呼び出す（タイムアウトと 1 回だけのフォールバック付き）
//! 5. 成功時のみ brief の切り詰めを行い、履歴に追加する
//!
//! ストアのロックは各呼び出しの中で解放されるため、engine を待つ間は
//! 他の接続の処理を妨げない。

use std::sync::Arc;

use vidchat_shared::time::Clock;

use crate::domain::{
    AnswerEngine, AnswerPolicy, ChatHistoryEntry, ConnectionId, ConnectionRegistry, ErrorCategory,
    PromptBuilder, Timestamp, ViewingContextStore,
    answer_engine::{generate_with_fallback, truncate_brief},
    classifier::classify,
    prompt::{PROMPT_HISTORY_LEN, PromptInput},
};

use super::error::AnswerError;

/// Shown when a chat arrives before any video was reported.
pub const NO_VIDEO_MESSAGE: &str = "❌ No video detected. Please open a video page first.";

/// 質問に対する応答
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatReply {
    /// engine の応答（brief の場合は切り詰め済み）
    Answer(String),
    /// 視聴コンテキストがまだない
    NoVideo,
    /// engine の失敗をユーザー向けに分類したもの
    Failure {
        category: ErrorCategory,
        message: String,
    },
}

impl ChatReply {
    /// クライアントに送る本文
    pub fn into_message(self) -> String {
        match self {
            ChatReply::Answer(text) => text,
            ChatReply::NoVideo => NO_VIDEO_MESSAGE.to_string(),
            ChatReply::Failure { message, .. } => message,
        }
    }
}

/// 質問応答のユースケース
pub struct AnswerQuestionUseCase {
    registry: Arc<dyn ConnectionRegistry>,
    store: Arc<dyn ViewingContextStore>,
    engine: Arc<dyn AnswerEngine>,
    prompt_builder: PromptBuilder,
    policy: AnswerPolicy,
    clock: Arc<dyn Clock>,
}

impl AnswerQuestionUseCase {
    pub fn new(
        registry: Arc<dyn ConnectionRegistry>,
        store: Arc<dyn ViewingContextStore>,
        engine: Arc<dyn AnswerEngine>,
        prompt_builder: PromptBuilder,
        policy: AnswerPolicy,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            registry,
            store,
            engine,
            prompt_builder,
            policy,
            clock,
        }
    }

    /// 質問に答える
    ///
    /// # Returns
    ///
    /// * `Ok(ChatReply)` - 応答（engine の失敗も `ChatReply::Failure` として含む）
    /// * `Err(AnswerError::Unconfigured)` - 接続が未設定
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        utterance: &str,
    ) -> Result<ChatReply, AnswerError> {
        let config = self
            .registry
            .get_config(connection_id)
            .await
            .ok_or(AnswerError::Unconfigured)?;

        let Some(video) = self.store.get_video().await else {
            return Ok(ChatReply::NoVideo);
        };

        let classification = classify(utterance);
        let history = self.store.recent_history(PROMPT_HISTORY_LEN).await;
        tracing::debug!(
            "Classified utterance from '{}': {:?}",
            connection_id,
            classification
        );

        let prompt = self.prompt_builder.build(&PromptInput {
            video: &video,
            history: &history,
            classification: &classification,
            utterance,
            model: &config.model,
        });

        match generate_with_fallback(
            self.engine.as_ref(),
            &prompt,
            &config.credential,
            &config.model,
            &self.policy,
        )
        .await
        {
            Ok(answer) => {
                let answer = truncate_brief(&answer, classification.response_length);
                self.store
                    .append_history(ChatHistoryEntry::new(
                        utterance.to_string(),
                        answer.clone(),
                        Timestamp::new(self.clock.now_millis()),
                    ))
                    .await;
                Ok(ChatReply::Answer(answer))
            }
            Err(e) => {
                let raw = e.to_string();
                let category = ErrorCategory::classify(&raw);
                tracing::warn!(
                    "Answer engine failed for '{}' ({:?}): {}",
                    connection_id,
                    category,
                    raw
                );
                Ok(ChatReply::Failure {
                    category,
                    message: category.user_message(&config.model, &raw),
                })
            }
        }
    }
}
