//! Prompt assembly for the answer engine.
//!
//! The prompt is plain text made of labelled blocks: the viewing context, the
//! recent conversation, a response style directive, optional intent and model
//! hints, general instructions and finally the user's utterance followed by a
//! `Response:` cue.

use super::{
    classifier::{Classification, Intent, ResponseLength},
    entity::{ChatHistoryEntry, ViewingContext},
    playback::format_time,
    value_object::ModelSelector,
};

/// Number of past exchanges surfaced to a prompt.
pub const PROMPT_HISTORY_LEN: usize = 3;

const DETAILED_STYLE: &str = "RESPONSE STYLE: Provide a comprehensive and detailed response. Include:
- Thorough explanations with context
- Multiple paragraphs if needed
- Specific examples or steps
- Background information when relevant
- Be as helpful and informative as possible";

const BRIEF_STYLE: &str = "RESPONSE STYLE: Keep response concise:
- 1-2 sentences maximum
- Direct and to the point
- Essential information only";

const STANDARD_STYLE: &str = "RESPONSE STYLE: Provide a helpful, balanced response:
- 2-4 sentences typically
- Include key information without overwhelming
- Clear and informative
- Add context when it helps understanding";

/// Capability hints keyed by a substring of the model name. First match wins.
const CAPABILITY_HINTS: &[(&str, &str)] = &[
    (
        "2.5",
        "You are running on a model with enhanced reasoning. Think through multi-step questions carefully before answering.",
    ),
    (
        "2.0",
        "You are running on a fast next-generation multimodal model. Favour crisp, well-structured answers.",
    ),
    (
        "1.5",
        "You are running on a stable, well-established model. Prefer reliable, conservative answers.",
    ),
];

/// Everything a prompt is built from.
#[derive(Debug, Clone, Copy)]
pub struct PromptInput<'a> {
    pub video: &'a ViewingContext,
    pub history: &'a [ChatHistoryEntry],
    pub classification: &'a Classification,
    pub utterance: &'a str,
    pub model: &'a ModelSelector,
}

/// Builds the text prompt sent to the answer engine.
#[derive(Debug, Clone, Copy)]
pub struct PromptBuilder {
    intent_guidance: bool,
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self {
            intent_guidance: true,
        }
    }
}

impl PromptBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle the `INTENT CONTEXT` line. Enabled by default.
    pub fn with_intent_guidance(mut self, enabled: bool) -> Self {
        self.intent_guidance = enabled;
        self
    }

    pub fn build(&self, input: &PromptInput<'_>) -> String {
        let needs_timestamp = input.classification.needs_timestamp;
        let mut prompt = String::new();

        prompt.push_str(&video_block(input.video, needs_timestamp));
        prompt.push('\n');

        let history = recent(input.history);
        if !history.is_empty() {
            prompt.push_str("\nRecent conversation:\n");
            for (index, entry) in history.iter().enumerate() {
                let number = index + 1;
                prompt.push_str(&format!(
                    "Q{number}: {}\nA{number}: {}\n",
                    entry.user_text, entry.assistant_text
                ));
            }
        }

        prompt.push('\n');
        prompt.push_str(style_directive(input.classification.response_length));
        prompt.push_str("\n\n");

        if self.intent_guidance {
            prompt.push_str(&format!(
                "INTENT CONTEXT: {}\n\n",
                intent_directive(input.classification.intent)
            ));
        }

        if let Some(hint) = capability_hint(input.model) {
            prompt.push_str(&format!("MODEL CAPABILITY: {hint}\n\n"));
        }

        prompt.push_str("INSTRUCTIONS:\n");
        prompt.push_str("- Base your response on the video context provided\n");
        prompt.push_str("- Be accurate and helpful\n");
        prompt.push_str("- Reference the video content when relevant\n");
        if needs_timestamp {
            prompt.push_str("- Reference the current viewing position when relevant\n");
            prompt.push_str("- Use MM:SS or HH:MM:SS format for any timestamps mentioned\n");
        }
        prompt.push_str("- Maintain a conversational and friendly tone\n");
        prompt.push_str(
            "- Do NOT mention timestamps or current time unless the user specifically asks about timing\n",
        );

        prompt.push_str(&format!("\nUser's question: {}\n\nResponse:", input.utterance));
        prompt
    }
}

fn video_block(video: &ViewingContext, needs_timestamp: bool) -> String {
    let mut block = format!(
        "Current Video Context:\n- Title: {}\n- Platform: {}\n- Video duration: {}\n- URL: {}",
        video.title_or_unknown(),
        video.platform_or_unknown(),
        format_time(video.duration_seconds),
        video.url_or_unknown(),
    );
    // The position is only ever shown when the user asked about timing.
    if needs_timestamp {
        block.push_str(&format!(
            "\n- Current viewing position: {}",
            format_time(video.current_time_seconds)
        ));
    }
    block
}

fn recent(history: &[ChatHistoryEntry]) -> &[ChatHistoryEntry] {
    let start = history.len().saturating_sub(PROMPT_HISTORY_LEN);
    &history[start..]
}

fn style_directive(length: ResponseLength) -> &'static str {
    match length {
        ResponseLength::Detailed => DETAILED_STYLE,
        ResponseLength::Brief => BRIEF_STYLE,
        ResponseLength::Standard => STANDARD_STYLE,
    }
}

fn intent_directive(intent: Intent) -> &'static str {
    match intent {
        Intent::Summary => {
            "Provide a clear summary of the video content, focusing on main topics and key messages."
        }
        Intent::Explanation => {
            "Explain the concept or process clearly, using examples from the video when possible."
        }
        Intent::Timestamp => {
            "The user is asking about something time-specific. Reference the current viewing position and what's happening at that moment in the video."
        }
        Intent::KeyPoints => {
            "Organize response as key points or bullet points when listing multiple items."
        }
        Intent::Tutorial => "Provide step-by-step guidance or instructions based on the video content.",
        Intent::Question => {
            "Answer the specific question directly, providing context from the video."
        }
        Intent::General => "Respond helpfully to the user's request using information from the video.",
    }
}

/// Advisory hint about the selected model, if its name is recognised.
pub fn capability_hint(model: &ModelSelector) -> Option<&'static str> {
    CAPABILITY_HINTS
        .iter()
        .find(|(marker, _)| model.as_str().contains(marker))
        .map(|(_, hint)| *hint)
}
