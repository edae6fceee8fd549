//! Mapping of answer engine failures to user-facing error categories.
//!
//! The mapping only decides what text the user sees. It never influences
//! retries.

use super::value_object::ModelSelector;

/// Closed set of user-facing failure categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Auth,
    ModelUnavailable,
    Quota,
    Safety,
    Unknown,
}

/// Substrings (lowercase) that select a category. First matching row wins.
const CATEGORY_RULES: &[(&[&str], ErrorCategory)] = &[
    (&["api_key", "authentication"], ErrorCategory::Auth),
    (&["model", "not found"], ErrorCategory::ModelUnavailable),
    (&["quota", "limit"], ErrorCategory::Quota),
    (&["safety"], ErrorCategory::Safety),
];

impl ErrorCategory {
    /// Classify a failure by its message text, ignoring case.
    pub fn classify(failure: &str) -> Self {
        let lowered = failure.to_lowercase();
        CATEGORY_RULES
            .iter()
            .find(|(needles, _)| needles.iter().any(|needle| lowered.contains(needle)))
            .map(|(_, category)| *category)
            .unwrap_or(ErrorCategory::Unknown)
    }

    /// Message shown to the user for this category.
    ///
    /// `model` is the model the connection asked for; `raw` is the unmodified
    /// failure text, echoed only for unknown failures.
    pub fn user_message(&self, model: &ModelSelector, raw: &str) -> String {
        match self {
            ErrorCategory::Auth => {
                "❌ Invalid API key. Please check your Gemini API key in the extension settings."
                    .to_string()
            }
            ErrorCategory::ModelUnavailable => format!(
                "❌ Model '{model}' is not available. Please choose a different model in the extension settings."
            ),
            ErrorCategory::Quota => {
                "⏳ API quota exceeded or rate limit reached. Please wait a moment and try again."
                    .to_string()
            }
            ErrorCategory::Safety => {
                "🛡️ The response was blocked by content safety filters. Please rephrase your question."
                    .to_string()
            }
            ErrorCategory::Unknown => format!("⚠️ Sorry, I encountered an error: {raw}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> ModelSelector {
        ModelSelector::new("gemini-2.5-pro".to_string()).unwrap()
    }

    #[test]
    fn test_classify_each_category() {
        // テスト項目: エラーメッセージの部分文字列から各カテゴリが判定される
        // given (前提条件):
        let cases = [
            ("API error (400): API_KEY_INVALID", ErrorCategory::Auth),
            ("Authentication failed", ErrorCategory::Auth),
            ("model 'x' not found: gone", ErrorCategory::ModelUnavailable),
            ("resource not found", ErrorCategory::ModelUnavailable),
            ("Quota exceeded for this project", ErrorCategory::Quota),
            ("rate LIMIT reached", ErrorCategory::Quota),
            ("response blocked by safety filters (SAFETY)", ErrorCategory::Safety),
            ("connection reset by peer", ErrorCategory::Unknown),
        ];

        for (failure, expected) in cases {
            // when (操作):
            let result = ErrorCategory::classify(failure);

            // then (期待する結果):
            assert_eq!(result, expected, "failure: {failure}");
        }
    }

    #[test]
    fn test_classify_quota_ignores_case() {
        // テスト項目: "quota exceeded" は大文字小文字に関係なく quota の固定メッセージになる
        // given (前提条件):
        let failures = ["quota exceeded", "QUOTA EXCEEDED", "Quota Exceeded"];

        for failure in failures {
            // when (操作):
            let category = ErrorCategory::classify(failure);

            // then (期待する結果):
            assert_eq!(category, ErrorCategory::Quota);
            assert_eq!(
                category.user_message(&model(), failure),
                "⏳ API quota exceeded or rate limit reached. Please wait a moment and try again."
            );
        }
    }

    #[test]
    fn test_classify_uses_priority_order() {
        // テスト項目: 複数のカテゴリに一致する場合は優先順位の高いものが選ばれる
        // given (前提条件):
        let auth_and_quota = "api_key quota";
        let model_and_quota = "Quota exceeded for model gemini-2.5-pro";
        let quota_and_safety = "safety limit";

        // when (操作) / then (期待する結果):
        assert_eq!(ErrorCategory::classify(auth_and_quota), ErrorCategory::Auth);
        assert_eq!(
            ErrorCategory::classify(model_and_quota),
            ErrorCategory::ModelUnavailable
        );
        assert_eq!(ErrorCategory::classify(quota_and_safety), ErrorCategory::Quota);
    }

    #[test]
    fn test_user_message_names_model_and_echoes_unknown() {
        // テスト項目: モデル不可メッセージはモデル名を含み、不明なエラーは原文を含む
        // given (前提条件):
        let model = model();

        // when (操作):
        let unavailable = ErrorCategory::ModelUnavailable.user_message(&model, "irrelevant");
        let unknown = ErrorCategory::Unknown.user_message(&model, "connection reset");

        // then (期待する結果):
        assert!(unavailable.contains("'gemini-2.5-pro'"));
        assert_eq!(unknown, "⚠️ Sorry, I encountered an error: connection reset");
    }
}
