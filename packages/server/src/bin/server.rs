//! Video chat assistant server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin vidchat-server
//! cargo run --bin vidchat-server -- --host 0.0.0.0 --port 8000
//! ```

use std::{sync::Arc, time::Duration};

use clap::Parser;
use vidchat_server::{
    domain::AnswerPolicy,
    infrastructure::answer_engine::{DEFAULT_GEMINI_BASE_URL, GeminiAnswerEngine},
    ui::{AppState, AssistantSettings, Server},
};
use vidchat_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "vidchat-server")]
#[command(about = "Answers questions about the video a client is watching", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8000")]
    port: u16,

    /// Base URL of the Gemini REST API
    #[arg(long, default_value = DEFAULT_GEMINI_BASE_URL)]
    gemini_base_url: String,

    /// Timeout for a single answer engine call, in seconds
    #[arg(long, default_value = "60")]
    engine_timeout_secs: u64,

    /// Number of question/answer exchanges kept in memory
    #[arg(long, default_value = "50")]
    history_capacity: usize,

    /// Leave the intent guidance line out of prompts
    #[arg(long)]
    no_intent_guidance: bool,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(&[env!("CARGO_BIN_NAME"), "tower_http"], "debug");

    let args = Args::parse();

    let engine = Arc::new(GeminiAnswerEngine::new(&args.gemini_base_url));
    let settings = AssistantSettings {
        history_capacity: args.history_capacity,
        policy: AnswerPolicy {
            timeout: Duration::from_secs(args.engine_timeout_secs),
            ..AnswerPolicy::default()
        },
        intent_guidance: !args.no_intent_guidance,
    };
    tracing::info!(
        "Answer engine: {} (timeout {}s, fallback model '{}')",
        args.gemini_base_url,
        args.engine_timeout_secs,
        settings.policy.fallback_model
    );

    let server = Server::new(AppState::with_engine(engine, settings));
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
