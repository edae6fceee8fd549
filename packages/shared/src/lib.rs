//! Utilities shared by the vidchat server and client.

pub mod logger;
pub mod time;
