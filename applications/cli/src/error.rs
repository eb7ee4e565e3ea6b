/// CLI error types
use rockem_core::RockemError;
use rockem_playback::PlaybackError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid command: {0}")]
    Command(String),

    #[error("Song library error: {0}")]
    Library(#[from] RockemError),

    #[error("Playback error: {0}")]
    Playback(#[from] PlaybackError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub fn command(msg: impl Into<String>) -> Self {
        Self::Command(msg.into())
    }
}
