//! Repository trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。
//!
//! どちらの trait も全操作が 1 回のロック区間で完結し、呼び出し側が
//! ロックを保持したまま answer engine を待つことはありません。

use async_trait::async_trait;

use super::{
    ChatHistoryEntry, ConnectionConfig, ConnectionId, RepositoryError, Timestamp, ViewingContext,
};

/// Connection Registry trait
///
/// 接続ごとの設定（API キーとモデル）を管理する。
#[async_trait]
pub trait ConnectionRegistry: Send + Sync {
    /// 未設定状態の接続を登録
    async fn register(&self, connection_id: ConnectionId, connected_at: Timestamp);

    /// 接続の設定を置き換える（マージはしない）
    async fn set_config(
        &self,
        connection_id: &ConnectionId,
        config: ConnectionConfig,
    ) -> Result<(), RepositoryError>;

    /// 接続の設定を取得（未設定または未登録なら None）
    async fn get_config(&self, connection_id: &ConnectionId) -> Option<ConnectionConfig>;

    /// 接続を削除（冪等）
    async fn remove(&self, connection_id: &ConnectionId);

    /// 登録中の接続数
    async fn count(&self) -> usize;
}

/// Viewing Context Store trait
///
/// 全接続で共有される視聴中の動画と会話履歴を管理する。
#[async_trait]
pub trait ViewingContextStore: Send + Sync {
    /// 視聴コンテキストを丸ごと置き換える
    async fn set_video(&self, video: ViewingContext);

    /// 現在の視聴コンテキストを取得（一度も更新されていなければ None）
    async fn get_video(&self) -> Option<ViewingContext>;

    /// 会話履歴を 1 件追加
    async fn append_history(&self, entry: ChatHistoryEntry);

    /// 直近 `n` 件の会話履歴を古い順に取得
    async fn recent_history(&self, n: usize) -> Vec<ChatHistoryEntry>;

    /// 保持している会話履歴の件数
    async fn history_len(&self) -> usize;

    /// 視聴コンテキストと保持中の履歴を一貫した状態で取得
    async fn snapshot(&self) -> (Option<ViewingContext>, Vec<ChatHistoryEntry>);
}
