//! UseCase: 接続終了処理

use std::sync::Arc;

use crate::domain::{ConnectionId, ConnectionRegistry, MessagePusher};

/// 接続終了のユースケース
///
/// 共有の視聴コンテキストと会話履歴には触れない。
pub struct DisconnectSessionUseCase {
    registry: Arc<dyn ConnectionRegistry>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl DisconnectSessionUseCase {
    pub fn new(
        registry: Arc<dyn ConnectionRegistry>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            registry,
            message_pusher,
        }
    }

    /// 接続の設定と送信チャンネルを削除する（冪等）
    pub async fn execute(&self, connection_id: &ConnectionId) {
        self.message_pusher.unregister_client(connection_id).await;
        self.registry.remove(connection_id).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{ConnectionConfig, Credential, MessagePushError, ModelSelector, Timestamp},
        infrastructure::{
            message_pusher::WebSocketMessagePusher, repository::InMemoryConnectionRegistry,
        },
    };
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn test_disconnect_removes_config_and_channel() {
        // テスト項目: 切断で設定と送信チャンネルが削除され、2 回目の切断も安全に終わる
        // given (前提条件):
        let registry = Arc::new(InMemoryConnectionRegistry::new());
        let pusher = Arc::new(WebSocketMessagePusher::new());
        let connection_id = ConnectionId::generate();
        let (tx, _rx) = mpsc::unbounded_channel();
        registry.register(connection_id, Timestamp::new(0)).await;
        registry
            .set_config(
                &connection_id,
                ConnectionConfig::new(
                    Credential::new("AIzaKey".to_string()).unwrap(),
                    ModelSelector::default(),
                ),
            )
            .await
            .unwrap();
        pusher.register_client(connection_id, tx).await;
        let usecase = DisconnectSessionUseCase::new(registry.clone(), pusher.clone());

        // when (操作):
        usecase.execute(&connection_id).await;
        usecase.execute(&connection_id).await;

        // then (期待する結果):
        assert_eq!(registry.count().await, 0);
        assert_eq!(registry.get_config(&connection_id).await, None);
        assert_eq!(
            pusher.push_to(&connection_id, "late").await,
            Err(MessagePushError::ClientNotFound(connection_id.to_string()))
        );
    }
}
