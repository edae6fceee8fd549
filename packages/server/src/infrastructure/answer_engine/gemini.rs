//! Gemini REST adapter for the `AnswerEngine` port.
//!
//! Each call sends the connection's own API key in the `x-goog-api-key`
//! header; the shared `reqwest::Client` carries no credentials.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{AnswerEngine, Credential, EngineError, ModelSelector};

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Gemini implementation of `AnswerEngine`.
#[derive(Debug, Clone)]
pub struct GeminiAnswerEngine {
    client: reqwest::Client,
    base_url: String,
}

impl GeminiAnswerEngine {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, model: &ModelSelector) -> String {
        format!("{}/models/{}:generateContent", self.base_url, model)
    }
}

impl Default for GeminiAnswerEngine {
    fn default() -> Self {
        Self::new(DEFAULT_GEMINI_BASE_URL)
    }
}

#[async_trait]
impl AnswerEngine for GeminiAnswerEngine {
    async fn generate(
        &self,
        prompt: &str,
        credential: &Credential,
        model: &ModelSelector,
    ) -> Result<String, EngineError> {
        tracing::debug!(
            "Calling Gemini model '{}' ({} prompt chars)",
            model,
            prompt.chars().count()
        );

        let response = self
            .client
            .post(self.endpoint(model))
            .header(API_KEY_HEADER, credential.expose())
            .json(&GenerateContentRequest::from_prompt(prompt))
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(transport_error)?;
        interpret_response(status, &body, model)
    }
}

// reqwest errors embed the request URL, which names the model and would
// mislead the error classifier.
fn transport_error(error: reqwest::Error) -> EngineError {
    EngineError::Transport(error.without_url().to_string())
}

/// Turn an HTTP status and body into the engine result.
fn interpret_response(status: u16, body: &str, model: &ModelSelector) -> Result<String, EngineError> {
    if !(200..300).contains(&status) {
        let message = error_message(status, body);
        return Err(if status == 404 {
            EngineError::ModelRejected {
                model: model.to_string(),
                message,
            }
        } else {
            EngineError::Api { status, message }
        });
    }

    let response: GenerateContentResponse = serde_json::from_str(body)
        .map_err(|e| EngineError::Transport(format!("invalid response body: {e}")))?;

    if let Some(reason) = response
        .prompt_feedback
        .and_then(|feedback| feedback.block_reason)
    {
        return Err(EngineError::Blocked(reason));
    }

    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or(EngineError::EmptyResponse)?;

    let text: String = candidate
        .content
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect()
        })
        .unwrap_or_default();
    let text = text.trim();

    if text.is_empty() {
        return Err(match candidate.finish_reason.as_deref() {
            Some("SAFETY") => EngineError::Blocked("SAFETY".to_string()),
            _ => EngineError::EmptyResponse,
        });
    }
    Ok(text.to_string())
}

/// `"<STATUS>: <message> [<reason>]"`, or the raw body when it is not a
/// Google API error envelope.
fn error_message(status: u16, body: &str) -> String {
    let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(body) else {
        let body = body.trim();
        return if body.is_empty() {
            format!("HTTP {status}")
        } else {
            body.to_string()
        };
    };

    let error = envelope.error;
    let mut message = match error.status {
        Some(status) => format!("{}: {}", status, error.message),
        None => error.message,
    };
    for reason in error.details.into_iter().filter_map(|detail| detail.reason) {
        message.push_str(&format!(" [{reason}]"));
    }
    message
}

// ─── Wire types ──────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: [RequestContent<'a>; 1],
}

impl<'a> GenerateContentRequest<'a> {
    fn from_prompt(prompt: &'a str) -> Self {
        Self {
            contents: [RequestContent {
                role: "user",
                parts: [RequestPart { text: prompt }],
            }],
        }
    }
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    role: &'static str,
    parts: [RequestPart<'a>; 1],
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: String,
    status: Option<String>,
    #[serde(default)]
    details: Vec<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    reason: Option<String>,
}
