//! WebSocket client session management.

use futures_util::{SinkExt, StreamExt, stream::SplitSink};
use tokio::{net::TcpStream, sync::mpsc};
use tokio_tungstenite::{
    MaybeTlsStream, WebSocketStream, connect_async, tungstenite::protocol::Message,
};
use vidchat_server::infrastructure::dto::websocket::{ClientMessage, ServerMessage};
use vidchat_shared::time::get_timestamp;

use crate::{
    domain::{ClientCommand, ClientMemory, parse_input},
    error::ClientError,
    formatter::MessageFormatter,
    ui::redisplay_prompt,
};

type WsWriter = SplitSink<WebSocketStream<MaybeTlsStream<TcpStream>>, Message>;

/// Run one WebSocket session until the user quits or the connection drops.
///
/// # Returns
///
/// * `Ok(())` - The user quit (`/quit`, Ctrl+C or Ctrl+D)
/// * `Err(ClientError)` - The connection could not be opened or was lost
pub async fn run_client_session(
    url: &str,
    memory: &mut ClientMemory,
    input_rx: &mut mpsc::UnboundedReceiver<String>,
) -> Result<(), ClientError> {
    let (ws_stream, _response) = connect_async(url)
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;

    tracing::info!("Connected to video chat assistant!");
    println!("\nAsk questions about the video you are watching. Type /help for commands.\n");

    let (mut write, mut read) = ws_stream.split();

    // Restore config and video on the fresh connection
    for message in memory.replay() {
        send_message(&mut write, &message).await?;
    }

    // Spawn a task to print replies from the server
    let mut read_task = tokio::spawn(async move {
        while let Some(message) = read.next().await {
            match message {
                Ok(Message::Text(text)) => {
                    let formatted = match serde_json::from_str::<ServerMessage>(&text) {
                        Ok(reply) => {
                            MessageFormatter::format_server_message(&reply, get_timestamp())
                        }
                        Err(_) => MessageFormatter::format_raw_message(&text),
                    };
                    print!("{}", formatted);
                    redisplay_prompt();
                }
                Ok(Message::Close(_)) => {
                    tracing::info!("Server closed the connection");
                    break;
                }
                Err(e) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    break;
                }
                _ => {}
            }
        }
    });

    loop {
        tokio::select! {
            _ = &mut read_task => {
                return Err(ClientError::ConnectionError("Connection lost".to_string()));
            }
            line = input_rx.recv() => {
                // Input closed: Ctrl+C or Ctrl+D
                let Some(line) = line else {
                    read_task.abort();
                    write.close().await.ok();
                    return Ok(());
                };

                let command = match parse_input(&line) {
                    Ok(ClientCommand::Quit) => {
                        read_task.abort();
                        write.close().await.ok();
                        return Ok(());
                    }
                    Ok(ClientCommand::Help) => {
                        print!("{}", MessageFormatter::format_help());
                        redisplay_prompt();
                        continue;
                    }
                    Ok(command) => command,
                    Err(e) => {
                        print!("{}", MessageFormatter::format_input_error(&e));
                        redisplay_prompt();
                        continue;
                    }
                };

                match memory.apply(command) {
                    Ok(Some(message)) => {
                        if let Err(e) = send_message(&mut write, &message).await {
                            read_task.abort();
                            return Err(e);
                        }
                    }
                    Ok(None) => {}
                    Err(e) => {
                        print!("{}", MessageFormatter::format_input_error(&e));
                        redisplay_prompt();
                    }
                }
            }
        }
    }
}

async fn send_message(write: &mut WsWriter, message: &ClientMessage) -> Result<(), ClientError> {
    let json = serde_json::to_string(message)
        .map_err(|e| ClientError::ConnectionError(format!("Failed to serialize message: {e}")))?;
    write
        .send(Message::text(json))
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))
}
