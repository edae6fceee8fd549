//! Logging setup utilities for the vidchat binaries.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Build the default `EnvFilter` directive for the given crates.
///
/// Every crate target gets the same `default_log_level`. Crate names may be
/// given in their Cargo form (`vidchat-server`); they are converted to the
/// module path form tracing uses (`vidchat_server`).
pub fn default_directive(crate_names: &[&str], default_log_level: &str) -> String {
    crate_names
        .iter()
        .map(|name| format!("{}={}", name.replace('-', "_"), default_log_level))
        .collect::<Vec<_>>()
        .join(",")
}

/// Initialize the tracing subscriber with the specified default log level.
///
/// The log level can be overridden using the `RUST_LOG` environment variable.
///
/// # Arguments
///
/// * `crate_names` - Crates (library and binary) whose events should be shown
/// * `default_log_level` - The default log level (e.g., "debug", "info", "warn", "error")
///
/// # Examples
///
/// ```no_run
/// use vidchat_shared::logger::setup_logger;
///
/// setup_logger(&["vidchat-server", "tower_http"], "debug");
/// ```
pub fn setup_logger(crate_names: &[&str], default_log_level: &str) {
    let directive = default_directive(crate_names, default_log_level);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| directive.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive_converts_crate_names() {
        // テスト項目: Cargo のクレート名がモジュールパス形式に変換される
        // given (前提条件):
        let crates = ["vidchat-server", "vidchat_shared"];

        // when (操作):
        let directive = default_directive(&crates, "info");

        // then (期待する結果):
        assert_eq!(directive, "vidchat_server=info,vidchat_shared=info");
    }

    #[test]
    fn test_default_directive_with_no_crates() {
        // テスト項目: クレートが指定されない場合は空文字列になる
        // given (前提条件):
        let crates: [&str; 0] = [];

        // when (操作):
        let directive = default_directive(&crates, "debug");

        // then (期待する結果):
        assert!(directive.is_empty());
    }
}
