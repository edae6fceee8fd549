//! UseCase layer: one struct per operation a connection or the HTTP API can
//! trigger. Each use case depends only on domain traits.

pub mod answer_question;
pub mod configure_session;
pub mod connect_session;
pub mod disconnect_session;
pub mod error;
pub mod get_context_snapshot;
pub mod get_health;
pub mod update_video_context;

pub use answer_question::{AnswerQuestionUseCase, ChatReply};
pub use configure_session::ConfigureSessionUseCase;
pub use connect_session::ConnectSessionUseCase;
pub use disconnect_session::DisconnectSessionUseCase;
pub use error::{AnswerError, ConfigureError};
pub use get_context_snapshot::{ContextSnapshot, GetContextSnapshotUseCase};
pub use get_health::{GetHealthUseCase, HealthReport};
pub use update_video_context::UpdateVideoContextUseCase;
