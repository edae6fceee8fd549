//! UseCase: 視聴コンテキストと会話履歴の取得（デバッグ用）

use std::sync::Arc;

use crate::domain::{ChatHistoryEntry, ViewingContext, ViewingContextStore};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextSnapshot {
    pub video: Option<ViewingContext>,
    pub history: Vec<ChatHistoryEntry>,
}

pub struct GetContextSnapshotUseCase {
    store: Arc<dyn ViewingContextStore>,
}

impl GetContextSnapshotUseCase {
    pub fn new(store: Arc<dyn ViewingContextStore>) -> Self {
        Self { store }
    }

    pub async fn execute(&self) -> ContextSnapshot {
        let (video, history) = self.store.snapshot().await;
        ContextSnapshot { video, history }
    }
}
