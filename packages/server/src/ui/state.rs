//! Shared application state.

use std::sync::Arc;

use vidchat_shared::time::{Clock, SystemClock};

use crate::{
    domain::{AnswerEngine, AnswerPolicy, MessagePusher, PromptBuilder},
    infrastructure::{
        message_pusher::WebSocketMessagePusher,
        repository::{
            DEFAULT_HISTORY_CAPACITY, InMemoryConnectionRegistry, InMemoryViewingContextStore,
        },
    },
    usecase::{
        AnswerQuestionUseCase, ConfigureSessionUseCase, ConnectSessionUseCase,
        DisconnectSessionUseCase, GetContextSnapshotUseCase, GetHealthUseCase,
        UpdateVideoContextUseCase,
    },
};

/// Shared application state
pub struct AppState {
    /// ConnectSessionUseCase（接続開始）
    pub connect_session_usecase: Arc<ConnectSessionUseCase>,
    /// DisconnectSessionUseCase（接続終了）
    pub disconnect_session_usecase: Arc<DisconnectSessionUseCase>,
    /// ConfigureSessionUseCase（API キーとモデルの設定）
    pub configure_session_usecase: Arc<ConfigureSessionUseCase>,
    /// UpdateVideoContextUseCase（視聴コンテキストの更新）
    pub update_video_context_usecase: Arc<UpdateVideoContextUseCase>,
    /// AnswerQuestionUseCase（質問応答）
    pub answer_question_usecase: Arc<AnswerQuestionUseCase>,
    /// GetHealthUseCase（ヘルスチェック）
    pub get_health_usecase: Arc<GetHealthUseCase>,
    /// GetContextSnapshotUseCase（デバッグ用のコンテキスト取得）
    pub get_context_snapshot_usecase: Arc<GetContextSnapshotUseCase>,
    /// MessagePusher（応答の送信）
    pub message_pusher: Arc<dyn MessagePusher>,
}

/// Settings that shape how questions are answered.
#[derive(Debug, Clone)]
pub struct AssistantSettings {
    /// Number of exchanges kept in the shared history.
    pub history_capacity: usize,
    pub policy: AnswerPolicy,
    /// Include the `INTENT CONTEXT` line in prompts.
    pub intent_guidance: bool,
}

impl Default for AssistantSettings {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            policy: AnswerPolicy::default(),
            intent_guidance: true,
        }
    }
}

impl AppState {
    /// Wire the in-memory stores and the WebSocket pusher around `engine`.
    ///
    /// Dependencies are created in order:
    /// 1. Repositories
    /// 2. MessagePusher
    /// 3. UseCases
    pub fn with_engine(engine: Arc<dyn AnswerEngine>, settings: AssistantSettings) -> Self {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);

        // 1. Repositories (in-memory)
        let registry = Arc::new(InMemoryConnectionRegistry::new());
        let store = Arc::new(InMemoryViewingContextStore::new(settings.history_capacity));

        // 2. MessagePusher (WebSocket implementation)
        let message_pusher = Arc::new(WebSocketMessagePusher::new());

        // 3. UseCases
        Self {
            connect_session_usecase: Arc::new(ConnectSessionUseCase::new(
                registry.clone(),
                message_pusher.clone(),
                clock.clone(),
            )),
            disconnect_session_usecase: Arc::new(DisconnectSessionUseCase::new(
                registry.clone(),
                message_pusher.clone(),
            )),
            configure_session_usecase: Arc::new(ConfigureSessionUseCase::new(registry.clone())),
            update_video_context_usecase: Arc::new(UpdateVideoContextUseCase::new(store.clone())),
            answer_question_usecase: Arc::new(AnswerQuestionUseCase::new(
                registry.clone(),
                store.clone(),
                engine,
                PromptBuilder::new().with_intent_guidance(settings.intent_guidance),
                settings.policy,
                clock,
            )),
            get_health_usecase: Arc::new(GetHealthUseCase::new(registry, store.clone())),
            get_context_snapshot_usecase: Arc::new(GetContextSnapshotUseCase::new(store)),
            message_pusher,
        }
    }
}
