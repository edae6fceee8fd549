//! InMemory Connection Registry 実装
//!
//! HashMap をインメモリ DB として使用します。接続ごとのエントリは
//! その接続のループが所有しますが、ヘルスチェックのように全体を読む操作も
//! あるため、マップ全体を 1 つの Mutex で保護します。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    ConnectionConfig, ConnectionId, ConnectionRegistry, RepositoryError, Timestamp,
};

/// 登録中の接続 1 件分の情報
#[derive(Debug, Clone)]
struct ConnectionEntry {
    connected_at: Timestamp,
    config: Option<ConnectionConfig>,
}

/// インメモリ Connection Registry 実装
#[derive(Debug, Default)]
pub struct InMemoryConnectionRegistry {
    connections: Mutex<HashMap<ConnectionId, ConnectionEntry>>,
}

impl InMemoryConnectionRegistry {
    /// 新しい InMemoryConnectionRegistry を作成
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConnectionRegistry for InMemoryConnectionRegistry {
    async fn register(&self, connection_id: ConnectionId, connected_at: Timestamp) {
        let mut connections = self.connections.lock().await;
        connections.insert(
            connection_id,
            ConnectionEntry {
                connected_at,
                config: None,
            },
        );
        tracing::debug!(
            "Connection '{}' registered at {}",
            connection_id,
            connected_at.value()
        );
    }

    async fn set_config(
        &self,
        connection_id: &ConnectionId,
        config: ConnectionConfig,
    ) -> Result<(), RepositoryError> {
        let mut connections = self.connections.lock().await;
        let entry = connections
            .get_mut(connection_id)
            .ok_or_else(|| RepositoryError::ConnectionNotFound(connection_id.to_string()))?;
        entry.config = Some(config);
        Ok(())
    }

    async fn get_config(&self, connection_id: &ConnectionId) -> Option<ConnectionConfig> {
        let connections = self.connections.lock().await;
        connections
            .get(connection_id)
            .and_then(|entry| entry.config.clone())
    }

    async fn remove(&self, connection_id: &ConnectionId) {
        let mut connections = self.connections.lock().await;
        if let Some(entry) = connections.remove(connection_id) {
            tracing::debug!(
                "Connection '{}' removed (connected at {})",
                connection_id,
                entry.connected_at.value()
            );
        }
    }

    async fn count(&self) -> usize {
        let connections = self.connections.lock().await;
        connections.len()
    }
}
