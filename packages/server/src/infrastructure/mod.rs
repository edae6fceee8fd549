//! Infrastructure layer: implementations of the domain ports.

pub mod answer_engine;
pub mod dto;
pub mod message_pusher;
pub mod repository;
