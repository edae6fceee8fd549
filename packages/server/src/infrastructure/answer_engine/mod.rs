//! Answer engine adapters.
//!
//! - `gemini`: Google Gemini `generateContent` REST API

pub mod gemini;

pub use gemini::{DEFAULT_GEMINI_BASE_URL, GeminiAnswerEngine};
