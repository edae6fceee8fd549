//! Domain layer: value objects, entities and the pure rules of the assistant.
//!
//! Traits for everything that touches the outside world (stores, the answer
//! engine, outbound message delivery) are declared here and implemented by the
//! infrastructure layer.

pub mod answer_engine;
pub mod classifier;
pub mod entity;
pub mod error;
pub mod error_category;
pub mod message_pusher;
pub mod playback;
pub mod prompt;
pub mod repository;
pub mod value_object;

pub use answer_engine::{AnswerEngine, AnswerPolicy, EngineError};
pub use classifier::{Classification, Intent, ResponseLength};
pub use entity::{ChatHistoryEntry, ConnectionConfig, ViewingContext};
pub use error::{MessagePushError, RepositoryError, ValueObjectError};
pub use error_category::ErrorCategory;
pub use message_pusher::{MessagePusher, PusherChannel};
pub use prompt::PromptBuilder;
pub use repository::{ConnectionRegistry, ViewingContextStore};
pub use value_object::{ConnectionId, Credential, ModelSelector, Timestamp};
