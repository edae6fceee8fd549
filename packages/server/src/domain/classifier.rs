//! Intent and response-style classification of user utterances.
//!
//! Every decision is a case-insensitive substring match against the whole
//! utterance. The rules live in ordered tables; the first matching row wins.

/// What the user is trying to get out of the assistant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Summary,
    Explanation,
    Timestamp,
    KeyPoints,
    Tutorial,
    Question,
    General,
}

/// How long the user wants the answer to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseLength {
    Brief,
    Standard,
    Detailed,
}

/// Result of classifying one utterance. Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub intent: Intent,
    pub response_length: ResponseLength,
    pub needs_timestamp: bool,
}

const TIMESTAMP_KEYWORDS: &[&str] = &[
    "timestamp",
    "time",
    "when",
    "at what time",
    "minute",
    "second",
    "current time",
    "where am i",
    "at this point",
    "right now",
    "at this moment",
    "here",
    "this part",
    "this section",
    "what's happening now",
    "currently",
    "at this timestamp",
];

const DETAIL_KEYWORDS: &[&str] = &[
    "detailed",
    "details",
    "elaborate",
    "explain in detail",
    "more info",
    "comprehensive",
    "thorough",
    "step by step",
    "breakdown",
    "deep dive",
    "everything about",
    "tell me more",
    "expand on",
    "fully explain",
    "complete explanation",
    "in depth",
    "extensively",
];

const BRIEF_KEYWORDS: &[&str] = &[
    "quickly",
    "brief",
    "short",
    "simply",
    "just tell me",
    "in summary",
    "tldr",
    "quick answer",
    "simple answer",
    "one sentence",
];

const SUMMARY_KEYWORDS: &[&str] = &["summary", "summarize", "what is this", "about", "overview"];

const EXPLANATION_KEYWORDS: &[&str] = &["explain", "how does", "why does", "what does", "meaning"];

const KEY_POINT_KEYWORDS: &[&str] = &[
    "key points",
    "important",
    "highlights",
    "main ideas",
    "takeaways",
];

const TUTORIAL_KEYWORDS: &[&str] = &["how to", "tutorial", "learn", "teach me", "show me"];

/// A predicate over an utterance.
#[derive(Debug, Clone, Copy)]
enum Rule {
    /// Any keyword occurs as a substring of the lowercased utterance.
    AnyKeyword(&'static [&'static str]),
    /// The utterance asks about the playback position.
    NeedsTimestamp,
    /// The trimmed utterance ends with a question mark.
    EndsWithQuestionMark,
}

impl Rule {
    fn matches(self, utterance: &Utterance<'_>) -> bool {
        match self {
            Rule::AnyKeyword(keywords) => utterance.contains_any(keywords),
            Rule::NeedsTimestamp => utterance.contains_any(TIMESTAMP_KEYWORDS),
            Rule::EndsWithQuestionMark => utterance.raw.trim_end().ends_with('?'),
        }
    }
}

const INTENT_RULES: &[(Rule, Intent)] = &[
    (Rule::AnyKeyword(SUMMARY_KEYWORDS), Intent::Summary),
    (Rule::AnyKeyword(EXPLANATION_KEYWORDS), Intent::Explanation),
    (Rule::NeedsTimestamp, Intent::Timestamp),
    (Rule::AnyKeyword(KEY_POINT_KEYWORDS), Intent::KeyPoints),
    (Rule::AnyKeyword(TUTORIAL_KEYWORDS), Intent::Tutorial),
    (Rule::EndsWithQuestionMark, Intent::Question),
];

// Detail is checked before brevity.
const LENGTH_RULES: &[(Rule, ResponseLength)] = &[
    (Rule::AnyKeyword(DETAIL_KEYWORDS), ResponseLength::Detailed),
    (Rule::AnyKeyword(BRIEF_KEYWORDS), ResponseLength::Brief),
];

struct Utterance<'a> {
    raw: &'a str,
    lowered: String,
}

impl<'a> Utterance<'a> {
    fn new(raw: &'a str) -> Self {
        Self {
            raw,
            lowered: raw.to_lowercase(),
        }
    }

    fn contains_any(&self, keywords: &[&str]) -> bool {
        keywords.iter().any(|keyword| self.lowered.contains(keyword))
    }

    fn first_match<T: Copy>(&self, rules: &[(Rule, T)]) -> Option<T> {
        rules
            .iter()
            .find(|(rule, _)| rule.matches(self))
            .map(|(_, category)| *category)
    }
}

/// Classify an utterance along all three axes.
pub fn classify(utterance: &str) -> Classification {
    let utterance = Utterance::new(utterance);
    Classification {
        intent: utterance
            .first_match(INTENT_RULES)
            .unwrap_or(Intent::General),
        response_length: utterance
            .first_match(LENGTH_RULES)
            .unwrap_or(ResponseLength::Standard),
        needs_timestamp: Rule::NeedsTimestamp.matches(&utterance),
    }
}

pub fn needs_timestamp(utterance: &str) -> bool {
    Rule::NeedsTimestamp.matches(&Utterance::new(utterance))
}

pub fn detect_response_length(utterance: &str) -> ResponseLength {
    Utterance::new(utterance)
        .first_match(LENGTH_RULES)
        .unwrap_or(ResponseLength::Standard)
}

pub fn detect_intent(utterance: &str) -> Intent {
    Utterance::new(utterance)
        .first_match(INTENT_RULES)
        .unwrap_or(Intent::General)
}
