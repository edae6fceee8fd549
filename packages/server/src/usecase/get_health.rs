//! UseCase: ヘルスチェック

use std::sync::Arc;

use crate::domain::{ConnectionRegistry, ViewingContextStore, value_object::SUPPORTED_MODELS};

/// ヘルスチェックの結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthReport {
    pub active_connections: usize,
    pub has_video_context: bool,
    pub supported_models: Vec<&'static str>,
}

pub struct GetHealthUseCase {
    registry: Arc<dyn ConnectionRegistry>,
    store: Arc<dyn ViewingContextStore>,
}

impl GetHealthUseCase {
    pub fn new(registry: Arc<dyn ConnectionRegistry>, store: Arc<dyn ViewingContextStore>) -> Self {
        Self { registry, store }
    }

    pub async fn execute(&self) -> HealthReport {
        HealthReport {
            active_connections: self.registry.count().await,
            has_video_context: self.store.get_video().await.is_some(),
            supported_models: SUPPORTED_MODELS.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{ConnectionId, Timestamp, ViewingContext},
        infrastructure::repository::{InMemoryConnectionRegistry, InMemoryViewingContextStore},
    };

    #[tokio::test]
    async fn test_health_reports_connections_and_video() {
        // テスト項目: 接続数・動画の有無・対応モデル一覧が報告される
        // given (前提条件):
        let registry = Arc::new(InMemoryConnectionRegistry::new());
        let store = Arc::new(InMemoryViewingContextStore::default());
        let usecase = GetHealthUseCase::new(registry.clone(), store.clone());
        registry
            .register(ConnectionId::generate(), Timestamp::new(0))
            .await;
        registry
            .register(ConnectionId::generate(), Timestamp::new(0))
            .await;

        // when (操作):
        let before_video = usecase.execute().await;
        store.set_video(ViewingContext::default()).await;
        let after_video = usecase.execute().await;

        // then (期待する結果):
        assert_eq!(before_video.active_connections, 2);
        assert!(!before_video.has_video_context);
        assert!(after_video.has_video_context);
        assert_eq!(after_video.supported_models.len(), 8);
        assert_eq!(after_video.supported_models[0], "gemini-2.5-flash");
        assert_eq!(after_video.supported_models[7], "gemini-1.5-flash-8b");
    }
}
