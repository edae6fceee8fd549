//! Repository 実装
//!
//! - `inmemory`: プロセス内メモリを使った実装（再起動で消える）

pub mod inmemory;

pub use inmemory::{
    DEFAULT_HISTORY_CAPACITY, InMemoryConnectionRegistry, InMemoryViewingContextStore,
};
