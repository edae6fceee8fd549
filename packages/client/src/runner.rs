//! Client execution logic with reconnection support.

use std::time::Duration;

use crate::{
    domain::{ClientMemory, should_attempt_reconnect},
    error::ClientError,
    session::run_client_session,
    ui::spawn_line_reader,
};

const MAX_RECONNECT_ATTEMPTS: u32 = 5;
const RECONNECT_INTERVAL_SECS: u64 = 5;

/// Connection settings given on the command line
#[derive(Debug, Clone)]
pub struct ClientSettings {
    /// WebSocket URL of the server's chat endpoint
    pub url: String,
    /// API key sent as soon as the connection opens
    pub api_key: Option<String>,
    pub model: Option<String>,
}

/// Run the client with reconnection logic
pub async fn run_client(settings: ClientSettings) -> Result<(), ClientError> {
    let mut memory = ClientMemory::new(settings.api_key, settings.model);
    let mut input_rx = spawn_line_reader();
    let mut reconnect_count = 0;

    loop {
        tracing::info!(
            "Attempting to connect to {} (attempt {}/{})",
            settings.url,
            reconnect_count + 1,
            MAX_RECONNECT_ATTEMPTS
        );

        match run_client_session(&settings.url, &mut memory, &mut input_rx).await {
            Ok(()) => {
                tracing::info!("Client session ended normally");
                // If the user exited, don't reconnect
                break;
            }
            Err(e) => {
                tracing::warn!("Connection lost: {}", e);
                reconnect_count += 1;

                if !should_attempt_reconnect(reconnect_count, MAX_RECONNECT_ATTEMPTS) {
                    return Err(ClientError::ReconnectExhausted(MAX_RECONNECT_ATTEMPTS));
                }

                tracing::info!(
                    "Reconnecting in {} seconds... (attempt {}/{})",
                    RECONNECT_INTERVAL_SECS,
                    reconnect_count + 1,
                    MAX_RECONNECT_ATTEMPTS
                );

                tokio::time::sleep(Duration::from_secs(RECONNECT_INTERVAL_SECS)).await;
            }
        }
    }

    Ok(())
}
