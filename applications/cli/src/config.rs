/// Player configuration
use crate::error::{CliError, Result};
use rockem_playback::QueueConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "rockem.toml";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CliConfig {
    #[serde(default = "default_player")]
    pub player: PlayerSettings,

    #[serde(default)]
    pub queue: QueueConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PlayerSettings {
    /// Backend API root, e.g. `http://localhost:8000/api/v1`
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// JSON song list (the backend's `GET /songs` response)
    #[serde(default)]
    pub songs_file: Option<PathBuf>,
}

impl CliConfig {
    /// Load configuration from file and environment
    ///
    /// `path` must exist when given; otherwise `rockem.toml` is read if present.
    /// Environment variables override both, e.g. `ROCKEM_QUEUE__REPEAT=all`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path).required(true));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        // Override with environment variables (prefixed with ROCKEM_)
        settings = settings.add_source(
            config::Environment::with_prefix("ROCKEM")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| CliError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| CliError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let url = self.player.api_base_url.as_str();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(CliError::Config(format!(
                "API base URL must be http(s), got {:?}",
                url
            )));
        }

        if let Some(songs_file) = &self.player.songs_file {
            if !songs_file.exists() {
                return Err(CliError::Config(format!(
                    "Songs file not found at {:?}",
                    songs_file
                )));
            }
        }

        Ok(())
    }
}

// Default values
fn default_player() -> PlayerSettings {
    PlayerSettings {
        api_base_url: default_api_base_url(),
        songs_file: None,
    }
}

fn default_api_base_url() -> String {
    "http://localhost:8000/api/v1".to_string()
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            player: default_player(),
            queue: QueueConfig::default(),
        }
    }
}
