//! UseCase: 視聴コンテキストの更新

use std::sync::Arc;

use crate::domain::{ViewingContext, ViewingContextStore};

/// 視聴コンテキスト更新のユースケース
///
/// どの接続からの更新も、接続の設定状態に関係なく受け付ける（後勝ち）。
pub struct UpdateVideoContextUseCase {
    store: Arc<dyn ViewingContextStore>,
}

impl UpdateVideoContextUseCase {
    pub fn new(store: Arc<dyn ViewingContextStore>) -> Self {
        Self { store }
    }

    pub async fn execute(&self, video: ViewingContext) {
        tracing::debug!(
            "Viewing context updated: '{}' at {}s",
            video.title_or_unknown(),
            video.current_time_seconds
        );
        self.store.set_video(video).await;
    }
}
