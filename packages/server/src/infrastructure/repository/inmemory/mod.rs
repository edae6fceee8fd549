//! InMemory Repository 実装

mod connection_registry;
mod viewing_context;

pub use connection_registry::InMemoryConnectionRegistry;
pub use viewing_context::{DEFAULT_HISTORY_CAPACITY, InMemoryViewingContextStore};
