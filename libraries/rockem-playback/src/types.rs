//! Core types for queue management

use rockem_core::Song;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Repeat mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatMode {
    /// Stop when the active queue ends
    #[default]
    None,

    /// Loop the current song
    One,

    /// Wrap around the active queue
    All,
}

impl RepeatMode {
    /// Next mode in the toggle cycle: none -> one -> all -> none
    #[must_use]
    pub fn cycle(self) -> Self {
        match self {
            RepeatMode::None => RepeatMode::One,
            RepeatMode::One => RepeatMode::All,
            RepeatMode::All => RepeatMode::None,
        }
    }

    /// Status text shown when the mode changes
    pub fn label(&self) -> &'static str {
        match self {
            RepeatMode::None => "Repeat off",
            RepeatMode::One => "Repeat one",
            RepeatMode::All => "Repeat all",
        }
    }

    /// Button glyph
    pub fn icon(&self) -> &'static str {
        match self {
            RepeatMode::One => "🔂",
            RepeatMode::None | RepeatMode::All => "🔁",
        }
    }
}

impl fmt::Display for RepeatMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RepeatMode::None => "none",
            RepeatMode::One => "one",
            RepeatMode::All => "all",
        };
        write!(f, "{}", name)
    }
}

/// Configuration for the queue manager
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueueConfig {
    /// Start with shuffle enabled (default: false)
    pub shuffle: bool,

    /// Initial repeat mode (default: none)
    pub repeat: RepeatMode,

    /// Fixed RNG seed for reproducible shuffles (default: entropy)
    pub shuffle_seed: Option<u64>,

    /// How long mode-change notifications stay up (default: 2000ms)
    pub notification_duration_ms: u64,
}

impl QueueConfig {
    /// Display time for mode-change notifications
    pub fn notification_duration(&self) -> Duration {
        Duration::from_millis(self.notification_duration_ms)
    }
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            shuffle: false,
            repeat: RepeatMode::None,
            shuffle_seed: None,
            notification_duration_ms: 2000,
        }
    }
}

/// One row of the active queue, as a queue list renders it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueueEntry {
    /// Position in the active queue (what `set_current_index` takes)
    pub position: usize,

    /// Position in the canonical queue (what `remove_from_queue` takes)
    pub canonical_index: usize,

    /// The song
    pub song: Song,

    /// Whether the cursor is on this row
    pub is_current: bool,
}

/// Read-only snapshot of the queue manager
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueueInfo {
    /// Canonical queue, insertion order
    pub queue: Vec<Song>,

    /// Active queue rows (shuffled order when shuffle is on)
    pub active: Vec<QueueEntry>,

    /// Cursor into the active queue
    pub current_index: usize,

    /// Shuffle flag
    pub shuffle_mode: bool,

    /// Repeat mode
    pub repeat_mode: RepeatMode,

    /// Song under the cursor
    pub current_song: Option<Song>,

    /// Song `next()` would move to
    pub next_song: Option<Song>,

    /// Song `previous()` would move to
    pub previous_song: Option<Song>,
}

impl QueueInfo {
    /// Queue button text: "📋 (3)" or just the glyph when empty
    pub fn button_label(&self) -> String {
        if self.queue.is_empty() {
            "📋".to_string()
        } else {
            format!("📋 ({})", self.queue.len())
        }
    }

    /// Queue button tooltip
    pub fn button_title(&self) -> String {
        if self.queue.is_empty() {
            "Show queue".to_string()
        } else {
            format!("Queue ({} songs)", self.queue.len())
        }
    }

    /// Shuffle button tooltip
    pub fn shuffle_title(&self) -> &'static str {
        if self.shuffle_mode {
            "Disable shuffle"
        } else {
            "Enable shuffle"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = QueueConfig::default();
        assert!(!config.shuffle);
        assert_eq!(config.repeat, RepeatMode::None);
        assert_eq!(config.shuffle_seed, None);
        assert_eq!(config.notification_duration(), Duration::from_secs(2));
    }

    #[test]
    fn repeat_cycles_none_one_all() {
        let mut mode = RepeatMode::None;
        mode = mode.cycle();
        assert_eq!(mode, RepeatMode::One);
        mode = mode.cycle();
        assert_eq!(mode, RepeatMode::All);
        mode = mode.cycle();
        assert_eq!(mode, RepeatMode::None);
    }

    #[test]
    fn repeat_mode_uses_lowercase_names() {
        let mode: RepeatMode = serde_json::from_str("\"all\"").unwrap();
        assert_eq!(mode, RepeatMode::All);
        assert_eq!(RepeatMode::One.to_string(), "one");
    }

    #[test]
    fn partial_config_fills_defaults() {
        let config: QueueConfig = serde_json::from_str(r#"{"repeat": "one"}"#).unwrap();
        assert_eq!(config.repeat, RepeatMode::One);
        assert_eq!(config.notification_duration_ms, 2000);
    }
}
