//! UseCase: 接続設定（API キーとモデル）の更新

use std::sync::Arc;

use crate::domain::{ConnectionConfig, ConnectionId, ConnectionRegistry, Credential, ModelSelector};

use super::error::ConfigureError;

/// 接続設定更新のユースケース
pub struct ConfigureSessionUseCase {
    registry: Arc<dyn ConnectionRegistry>,
}

impl ConfigureSessionUseCase {
    pub fn new(registry: Arc<dyn ConnectionRegistry>) -> Self {
        Self { registry }
    }

    /// 設定を丸ごと置き換え、有効になったモデルを返す
    ///
    /// `model` が未指定または空白のみの場合は既定モデルを使う。
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        api_key: String,
        model: Option<String>,
    ) -> Result<ModelSelector, ConfigureError> {
        let credential = Credential::new(api_key)?;
        let model = match model.filter(|m| !m.trim().is_empty()) {
            Some(name) => ModelSelector::new(name)?,
            None => ModelSelector::default(),
        };

        self.registry
            .set_config(
                connection_id,
                ConnectionConfig::new(credential, model.clone()),
            )
            .await?;

        Ok(model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{RepositoryError, Timestamp, ValueObjectError},
        infrastructure::repository::InMemoryConnectionRegistry,
    };

    async fn setup() -> (Arc<InMemoryConnectionRegistry>, ConnectionId) {
        let registry = Arc::new(InMemoryConnectionRegistry::new());
        let connection_id = ConnectionId::generate();
        registry.register(connection_id, Timestamp::new(0)).await;
        (registry, connection_id)
    }

    #[tokio::test]
    async fn test_configure_with_explicit_model() {
        // テスト項目: 指定したモデルで設定が保存される
        // given (前提条件):
        let (registry, connection_id) = setup().await;
        let usecase = ConfigureSessionUseCase::new(registry.clone());

        // when (操作):
        let result = usecase
            .execute(
                &connection_id,
                "AIzaKey".to_string(),
                Some("gemini-2.5-pro".to_string()),
            )
            .await;

        // then (期待する結果):
        assert_eq!(result.unwrap().as_str(), "gemini-2.5-pro");
        let config = registry.get_config(&connection_id).await.unwrap();
        assert_eq!(config.credential.expose(), "AIzaKey");
        assert_eq!(config.model.as_str(), "gemini-2.5-pro");
    }

    #[tokio::test]
    async fn test_configure_without_model_uses_default() {
        // テスト項目: モデル未指定・空文字の場合は既定モデルになる
        // given (前提条件):
        let (registry, connection_id) = setup().await;
        let usecase = ConfigureSessionUseCase::new(registry.clone());

        // when (操作):
        let omitted = usecase
            .execute(&connection_id, "AIzaKey".to_string(), None)
            .await;
        let blank = usecase
            .execute(&connection_id, "AIzaKey".to_string(), Some("  ".to_string()))
            .await;

        // then (期待する結果):
        assert_eq!(omitted.unwrap().as_str(), "gemini-2.5-flash");
        assert_eq!(blank.unwrap().as_str(), "gemini-2.5-flash");
    }

    #[tokio::test]
    async fn test_configure_replaces_previous_config() {
        // テスト項目: 再設定は既存の設定を丸ごと置き換える
        // given (前提条件):
        let (registry, connection_id) = setup().await;
        let usecase = ConfigureSessionUseCase::new(registry.clone());
        usecase
            .execute(
                &connection_id,
                "first-key".to_string(),
                Some("gemini-2.5-pro".to_string()),
            )
            .await
            .unwrap();

        // when (操作):
        usecase
            .execute(&connection_id, "second-key".to_string(), None)
            .await
            .unwrap();

        // then (期待する結果):
        let config = registry.get_config(&connection_id).await.unwrap();
        assert_eq!(config.credential.expose(), "second-key");
        assert_eq!(config.model.as_str(), "gemini-2.5-flash");
    }

    #[tokio::test]
    async fn test_configure_blank_key_keeps_state() {
        // テスト項目: 空白の API キーはエラーになり、既存の状態は変わらない
        // given (前提条件):
        let (registry, connection_id) = setup().await;
        let usecase = ConfigureSessionUseCase::new(registry.clone());

        // when (操作):
        let result = usecase
            .execute(&connection_id, "   ".to_string(), None)
            .await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(ConfigureError::Invalid(ValueObjectError::EmptyCredential))
        );
        assert_eq!(registry.get_config(&connection_id).await, None);
    }

    #[tokio::test]
    async fn test_configure_unknown_connection() {
        // テスト項目: 登録されていない接続への設定は ConnectionNotFound になる
        // given (前提条件):
        let registry = Arc::new(InMemoryConnectionRegistry::new());
        let usecase = ConfigureSessionUseCase::new(registry);
        let connection_id = ConnectionId::generate();

        // when (操作):
        let result = usecase
            .execute(&connection_id, "AIzaKey".to_string(), None)
            .await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(ConfigureError::Repository(
                RepositoryError::ConnectionNotFound(connection_id.to_string())
            ))
        );
    }
}
