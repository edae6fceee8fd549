//! Terminal client for the video chat assistant.
//!
//! Reports a video with `/video`, sets the API key with `/config` (or
//! `--api-key`) and sends every other line as a question. Automatically
//! reconnects on disconnection (max 5 attempts with 5 second interval),
//! re-sending the config and video each time.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin vidchat-client -- --api-key AIza...
//! cargo run --bin vidchat-client -- --url ws://127.0.0.1:8000/ws/chat --model gemini-2.5-pro
//! ```

use clap::Parser;
use vidchat_client::{ClientSettings, run_client};
use vidchat_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "vidchat-client")]
#[command(about = "Ask the video chat assistant about a video from the terminal", long_about = None)]
struct Args {
    /// WebSocket server URL
    #[arg(short = 'u', long, default_value = "ws://127.0.0.1:8000/ws/chat")]
    url: String,

    /// Gemini API key, sent as soon as the connection opens
    #[arg(short = 'k', long)]
    api_key: Option<String>,

    /// Model to use (the server default when omitted)
    #[arg(short = 'm', long)]
    model: Option<String>,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(&[env!("CARGO_BIN_NAME")], "info");

    let args = Args::parse();

    let settings = ClientSettings {
        url: args.url,
        api_key: args.api_key,
        model: args.model,
    };

    if let Err(e) = run_client(settings).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
