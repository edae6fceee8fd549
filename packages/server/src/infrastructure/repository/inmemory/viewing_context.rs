//! InMemory Viewing Context Store 実装
//!
//! 視聴中の動画と会話履歴を 1 つのレコードとして 1 つの Mutex で保護します。
//! 動画の更新は常に丸ごと置き換えなので、他の接続から中途半端な状態が
//! 見えることはありません。
//!
//! 会話履歴は `capacity` 件のリングとして保持し、古いものは追加時に破棄します。

use std::collections::VecDeque;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ChatHistoryEntry, ViewingContext, ViewingContextStore};

/// 保持する会話履歴のデフォルト件数
pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

/// プロンプトが参照する件数を下回らないための下限
const MIN_HISTORY_CAPACITY: usize = crate::domain::prompt::PROMPT_HISTORY_LEN;

#[derive(Debug, Default)]
struct ViewingState {
    video: Option<ViewingContext>,
    history: VecDeque<ChatHistoryEntry>,
}

/// インメモリ Viewing Context Store 実装
#[derive(Debug)]
pub struct InMemoryViewingContextStore {
    state: Mutex<ViewingState>,
    capacity: usize,
}

impl InMemoryViewingContextStore {
    /// 新しい InMemoryViewingContextStore を作成
    ///
    /// `capacity` はプロンプトが使う件数（3 件）未満にはならない。
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(MIN_HISTORY_CAPACITY);
        Self {
            state: Mutex::new(ViewingState {
                video: None,
                history: VecDeque::with_capacity(capacity),
            }),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for InMemoryViewingContextStore {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

#[async_trait]
impl ViewingContextStore for InMemoryViewingContextStore {
    async fn set_video(&self, video: ViewingContext) {
        let mut state = self.state.lock().await;
        state.video = Some(video);
    }

    async fn get_video(&self) -> Option<ViewingContext> {
        let state = self.state.lock().await;
        state.video.clone()
    }

    async fn append_history(&self, entry: ChatHistoryEntry) {
        let mut state = self.state.lock().await;
        while state.history.len() >= self.capacity {
            state.history.pop_front();
        }
        state.history.push_back(entry);
    }

    async fn recent_history(&self, n: usize) -> Vec<ChatHistoryEntry> {
        let state = self.state.lock().await;
        let skip = state.history.len().saturating_sub(n);
        state.history.iter().skip(skip).cloned().collect()
    }

    async fn history_len(&self) -> usize {
        let state = self.state.lock().await;
        state.history.len()
    }

    async fn snapshot(&self) -> (Option<ViewingContext>, Vec<ChatHistoryEntry>) {
        let state = self.state.lock().await;
        (state.video.clone(), state.history.iter().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::Timestamp;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - 視聴コンテキストの丸ごと置き換え（last-write-wins）
    // - 会話履歴の追加順序と直近 n 件の取得
    // - 保持件数を超えた履歴の破棄
    // - 並行追加で履歴が失われない・重複しないこと
    // ========================================

    fn video(title: &str, current_time: u64) -> ViewingContext {
        ViewingContext {
            title: Some(title.to_string()),
            platform: Some("YouTube".to_string()),
            duration_seconds: 600,
            url: Some(format!("https://example.com/{title}")),
            current_time_seconds: current_time,
        }
    }

    fn entry(n: i64) -> ChatHistoryEntry {
        ChatHistoryEntry::new(format!("q{n}"), format!("a{n}"), Timestamp::new(n))
    }

    #[tokio::test]
    async fn test_video_is_absent_before_first_update() {
        // テスト項目: 一度も更新されていなければ視聴コンテキストは存在しない
        // given (前提条件):
        let store = InMemoryViewingContextStore::default();

        // when (操作):
        let result = store.get_video().await;

        // then (期待する結果):
        assert_eq!(result, None);
    }

    #[tokio::test]
    async fn test_set_video_replaces_whole_record() {
        // テスト項目: 更新は項目ごとのマージではなく丸ごと置き換えになる
        // given (前提条件):
        let store = InMemoryViewingContextStore::default();
        store.set_video(video("first", 10)).await;

        // when (操作):
        let partial = ViewingContext {
            title: Some("second".to_string()),
            ..ViewingContext::default()
        };
        store.set_video(partial.clone()).await;

        // then (期待する結果):
        let current = store.get_video().await.unwrap();
        assert_eq!(current, partial);
        assert_eq!(current.platform, None);
        assert_eq!(current.current_time_seconds, 0);
    }

    #[tokio::test]
    async fn test_recent_history_returns_latest_in_chronological_order() {
        // テスト項目: 直近 n 件が古い順に返される
        // given (前提条件):
        let store = InMemoryViewingContextStore::default();
        for n in 1..=5 {
            store.append_history(entry(n)).await;
        }

        // when (操作):
        let recent = store.recent_history(3).await;

        // then (期待する結果):
        let texts: Vec<&str> = recent.iter().map(|e| e.user_text.as_str()).collect();
        assert_eq!(texts, vec!["q3", "q4", "q5"]);
    }

    #[tokio::test]
    async fn test_recent_history_with_fewer_entries() {
        // テスト項目: 件数が n 未満なら全件が返される
        // given (前提条件):
        let store = InMemoryViewingContextStore::default();
        store.append_history(entry(1)).await;

        // when (操作):
        let recent = store.recent_history(3).await;

        // then (期待する結果):
        assert_eq!(recent, vec![entry(1)]);
    }

    #[tokio::test]
    async fn test_history_is_pruned_at_capacity() {
        // テスト項目: 保持件数を超えると古い履歴から破棄される
        // given (前提条件):
        let store = InMemoryViewingContextStore::new(4);

        // when (操作):
        for n in 1..=6 {
            store.append_history(entry(n)).await;
        }

        // then (期待する結果):
        assert_eq!(store.history_len().await, 4);
        let (_, history) = store.snapshot().await;
        assert_eq!(history.first(), Some(&entry(3)));
        assert_eq!(history.last(), Some(&entry(6)));
    }

    #[tokio::test]
    async fn test_capacity_never_drops_below_prompt_window() {
        // テスト項目: 保持件数はプロンプトが使う 3 件を下回らない
        // given (前提条件):
        let store = InMemoryViewingContextStore::new(1);

        // when (操作):
        for n in 1..=3 {
            store.append_history(entry(n)).await;
        }

        // then (期待する結果):
        assert_eq!(store.capacity(), 3);
        assert_eq!(store.recent_history(3).await.len(), 3);
    }

    #[tokio::test]
    async fn test_concurrent_appends_are_not_lost() {
        // テスト項目: 並行に追加しても履歴が失われず重複もしない
        // given (前提条件):
        let store = Arc::new(InMemoryViewingContextStore::new(100));

        // when (操作):
        let handles: Vec<_> = (0..20)
            .map(|n| {
                let store = store.clone();
                tokio::spawn(async move { store.append_history(entry(n)).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap();
        }

        // then (期待する結果):
        let (_, history) = store.snapshot().await;
        assert_eq!(history.len(), 20);
        let mut stamps: Vec<i64> = history.iter().map(|e| e.recorded_at.value()).collect();
        stamps.sort();
        assert_eq!(stamps, (0..20).collect::<Vec<i64>>());
    }

    #[tokio::test]
    async fn test_concurrent_video_updates_are_never_torn() {
        // テスト項目: 並行更新後の視聴コンテキストはいずれかの更新と完全に一致する
        // given (前提条件):
        let store = Arc::new(InMemoryViewingContextStore::default());

        // when (操作):
        let handles: Vec<_> = (0..20u64)
            .map(|n| {
                let store = store.clone();
                tokio::spawn(async move { store.set_video(video(&format!("v{n}"), n)).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap();
        }

        // then (期待する結果):
        let current = store.get_video().await.unwrap();
        let n = current.current_time_seconds;
        assert_eq!(current, video(&format!("v{n}"), n));
    }
}
