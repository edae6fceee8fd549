//! UseCase: 接続開始処理

use std::sync::Arc;

use vidchat_shared::time::Clock;

use crate::domain::{ConnectionId, ConnectionRegistry, MessagePusher, PusherChannel, Timestamp};

/// 接続開始のユースケース
///
/// 接続は未設定状態で登録され、応答用の送信チャンネルが MessagePusher に登録される。
pub struct ConnectSessionUseCase {
    registry: Arc<dyn ConnectionRegistry>,
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl ConnectSessionUseCase {
    pub fn new(
        registry: Arc<dyn ConnectionRegistry>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            registry,
            message_pusher,
            clock,
        }
    }

    /// 接続を登録し、接続時刻を返す
    pub async fn execute(&self, connection_id: ConnectionId, sender: PusherChannel) -> Timestamp {
        let connected_at = Timestamp::new(self.clock.now_millis());
        self.registry.register(connection_id, connected_at).await;
        self.message_pusher
            .register_client(connection_id, sender)
            .await;
        connected_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::{
        message_pusher::WebSocketMessagePusher, repository::InMemoryConnectionRegistry,
    };
    use tokio::sync::mpsc;
    use vidchat_shared::time::FixedClock;

    #[tokio::test]
    async fn test_connect_registers_unconfigured_connection() {
        // テスト項目: 接続時に未設定状態で登録され、固定時刻が接続時刻になる
        // given (前提条件):
        let registry = Arc::new(InMemoryConnectionRegistry::new());
        let pusher = Arc::new(WebSocketMessagePusher::new());
        let usecase = ConnectSessionUseCase::new(
            registry.clone(),
            pusher.clone(),
            Arc::new(FixedClock::new(1_700_000_000_000)),
        );
        let connection_id = ConnectionId::generate();
        let (tx, mut rx) = mpsc::unbounded_channel();

        // when (操作):
        let connected_at = usecase.execute(connection_id, tx).await;

        // then (期待する結果):
        assert_eq!(connected_at.value(), 1_700_000_000_000);
        assert_eq!(registry.count().await, 1);
        assert_eq!(registry.get_config(&connection_id).await, None);
        pusher.push_to(&connection_id, "hello").await.unwrap();
        assert_eq!(rx.recv().await, Some("hello".to_string()));
    }
}
