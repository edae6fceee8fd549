//! Domain logic for client-side operations.
//!
//! Pure functions and state without I/O: parsing typed lines into commands,
//! remembering what must be re-sent after a reconnect, and the reconnect rule.

use vidchat_server::infrastructure::dto::websocket::{ClientMessage, VideoDataDto};

use crate::error::InputError;

const CONFIG_USAGE: &str = "/config <api_key> [model]";
const VIDEO_USAGE: &str = "/video <title> | <platform> | <duration_secs> | <url>";
const SEEK_USAGE: &str = "/seek <seconds | MM:SS | HH:MM:SS>";

/// A line typed by the user, interpreted.
#[derive(Debug, Clone, PartialEq)]
pub enum ClientCommand {
    Config {
        api_key: String,
        model: Option<String>,
    },
    Video(VideoDataDto),
    Seek(u64),
    Chat(String),
    Help,
    Quit,
}

/// Interpret one input line. Lines not starting with `/` are questions.
pub fn parse_input(line: &str) -> Result<ClientCommand, InputError> {
    let line = line.trim();
    let Some(command) = line.strip_prefix('/') else {
        return Ok(ClientCommand::Chat(line.to_string()));
    };

    let (name, rest) = command
        .split_once(char::is_whitespace)
        .map(|(name, rest)| (name, rest.trim()))
        .unwrap_or((command, ""));

    match name {
        "config" => parse_config(rest),
        "video" => parse_video(rest),
        "seek" => parse_seek(rest),
        "help" => Ok(ClientCommand::Help),
        "quit" | "exit" => Ok(ClientCommand::Quit),
        other => Err(InputError::UnknownCommand(format!("/{other}"))),
    }
}

fn parse_config(rest: &str) -> Result<ClientCommand, InputError> {
    let mut args = rest.split_whitespace();
    let api_key = args
        .next()
        .ok_or(InputError::MissingArgument(CONFIG_USAGE))?;
    Ok(ClientCommand::Config {
        api_key: api_key.to_string(),
        model: args.next().map(str::to_string),
    })
}

fn parse_video(rest: &str) -> Result<ClientCommand, InputError> {
    if rest.is_empty() {
        return Err(InputError::MissingArgument(VIDEO_USAGE));
    }
    let mut fields = rest.split('|').map(str::trim);
    let mut next_text = || fields.next().filter(|f| !f.is_empty()).map(str::to_string);

    let title = next_text();
    let platform = next_text();
    let duration = next_text()
        .map(|d| parse_seconds(&d).map(|s| s as f64))
        .transpose()?;
    let url = next_text();

    Ok(ClientCommand::Video(VideoDataDto {
        title,
        platform,
        duration,
        url,
        current_time: Some(0.0),
    }))
}

fn parse_seek(rest: &str) -> Result<ClientCommand, InputError> {
    if rest.is_empty() {
        return Err(InputError::MissingArgument(SEEK_USAGE));
    }
    parse_seconds(rest).map(ClientCommand::Seek)
}

/// Parse `90`, `01:30` or `1:02:05` into seconds.
pub fn parse_seconds(text: &str) -> Result<u64, InputError> {
    let invalid = || InputError::InvalidSeconds(text.to_string());
    let parts = text
        .split(':')
        .map(|part| part.trim().parse::<u64>().map_err(|_| invalid()))
        .collect::<Result<Vec<_>, _>>()?;

    match parts.as_slice() {
        [seconds] => Ok(*seconds),
        [minutes, seconds] if *seconds < 60 => Ok(minutes * 60 + seconds),
        [hours, minutes, seconds] if *minutes < 60 && *seconds < 60 => {
            Ok(hours * 3600 + minutes * 60 + seconds)
        }
        _ => Err(invalid()),
    }
}

/// What the client has told the server so far.
///
/// Server-side configuration dies with the connection, so both the config and
/// the last video are replayed after every reconnect.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientMemory {
    config: Option<(String, Option<String>)>,
    video: Option<VideoDataDto>,
}

impl ClientMemory {
    pub fn new(api_key: Option<String>, model: Option<String>) -> Self {
        Self {
            config: api_key.map(|key| (key, model)),
            video: None,
        }
    }

    /// Turn a command into the message to send, remembering config and video.
    ///
    /// Returns `Ok(None)` for commands that send nothing.
    pub fn apply(&mut self, command: ClientCommand) -> Result<Option<ClientMessage>, InputError> {
        let message = match command {
            ClientCommand::Config { api_key, model } => {
                self.config = Some((api_key.clone(), model.clone()));
                ClientMessage::Config { api_key, model }
            }
            ClientCommand::Video(video) => {
                self.video = Some(video.clone());
                ClientMessage::VideoUpdate { video_data: video }
            }
            ClientCommand::Seek(seconds) => {
                let video = self.video.as_mut().ok_or(InputError::NoVideo)?;
                video.current_time = Some(seconds as f64);
                ClientMessage::VideoUpdate {
                    video_data: video.clone(),
                }
            }
            ClientCommand::Chat(message) => ClientMessage::Chat { message },
            ClientCommand::Help | ClientCommand::Quit => return Ok(None),
        };
        Ok(Some(message))
    }

    /// Messages that restore this client's state on a fresh connection.
    pub fn replay(&self) -> Vec<ClientMessage> {
        let config = self
            .config
            .clone()
            .map(|(api_key, model)| ClientMessage::Config { api_key, model });
        let video = self
            .video
            .clone()
            .map(|video_data| ClientMessage::VideoUpdate { video_data });
        config.into_iter().chain(video).collect()
    }
}

/// Check if the client should attempt to reconnect.
///
/// # Arguments
///
/// * `current_attempt` - The number of failed attempts so far
/// * `max_attempts` - The maximum number of attempts allowed
pub fn should_attempt_reconnect(current_attempt: u32, max_attempts: u32) -> bool {
    current_attempt < max_attempts
}
