//! Rock 'em All - Playback Queue
//!
//! Platform-agnostic play-order management for Rock 'em All.
//!
//! This crate provides:
//! - Canonical queue with append, play-next, removal, and clear
//! - Cursor navigation (next/previous/jump) with cursor repair on removal
//! - Shuffle as a projection over the canonical queue (Fisher-Yates)
//! - Repeat modes (None, One, All)
//! - Queue events and mode-change notifications for UI synchronization
//! - A player that drives any playback engine from queue decisions
//! - Browser bindings behind the `wasm` feature
//!
//! # Architecture
//!
//! `rockem-playback` does no I/O. Audio output and notification display are
//! provided via the `PlaybackEngine` and `NotificationSink` traits; song
//! records arrive already validated as `rockem_core::Song`.
//!
//! # Example: Queue Navigation
//!
//! ```rust
//! use rockem_core::Song;
//! use rockem_playback::{QueueManager, RepeatMode};
//!
//! let mut queue = QueueManager::default();
//! queue.add_to_queue(vec![
//!     Song::new("1", "Thunderstruck", "AC/DC"),
//!     Song::new("2", "Paranoid", "Black Sabbath"),
//! ]);
//!
//! assert_eq!(queue.next().map(|s| s.title.as_str()), Some("Paranoid"));
//! assert!(queue.next().is_none());
//!
//! queue.set_repeat(RepeatMode::All);
//! assert_eq!(queue.next().map(|s| s.title.as_str()), Some("Thunderstruck"));
//! ```
//!
//! # Example: Shuffle
//!
//! ```rust
//! use rockem_core::Song;
//! use rockem_playback::{QueueConfig, QueueManager};
//!
//! let mut queue = QueueManager::new(QueueConfig {
//!     shuffle_seed: Some(7),
//!     ..QueueConfig::default()
//! });
//! queue.add_to_queue((1..=5).map(|i| Song::new(i.to_string().as_str(), "Song", "Artist")));
//! queue.set_current_index(2);
//!
//! // The current song stays current and moves to the front of the shuffle
//! queue.toggle_shuffle();
//! assert_eq!(queue.current_index(), 0);
//! assert_eq!(queue.get_current_song().unwrap().id.as_str(), "3");
//! ```
//!
//! # Example: Platform Integration
//!
//! ```rust
//! use rockem_core::{Notification, Song};
//! use rockem_playback::{PlaybackEngine, Player, QueueManager, Result};
//!
//! struct MyAudioElement {
//!     src: Option<String>,
//! }
//!
//! impl PlaybackEngine for MyAudioElement {
//!     fn load(&mut self, song: &Song) -> Result<()> {
//!         self.src = Some(song.file_url("http://localhost:8000/api/v1"));
//!         Ok(())
//!     }
//!
//!     fn play(&mut self) -> Result<()> {
//!         Ok(())
//!     }
//!
//!     fn pause(&mut self) {}
//!
//!     fn stop(&mut self) {
//!         self.src = None;
//!     }
//! }
//!
//! let mut queue = QueueManager::default();
//! queue.add_song(Song::new("1", "Song", "Artist"));
//!
//! let notifications: Vec<Notification> = Vec::new();
//! let mut player = Player::new(queue, MyAudioElement { src: None }, notifications);
//! player.play_current().unwrap();
//! assert_eq!(
//!     player.engine().src.as_deref(),
//!     Some("http://localhost:8000/api/v1/songs/1/file")
//! );
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod events;
mod manager;
mod player;
mod queue;
pub mod shuffle;
pub mod types;

#[cfg(feature = "wasm")]
pub mod wasm;

// Public exports
pub use error::{PlaybackError, QueueError, Result};
pub use events::QueueEvent;
pub use manager::QueueManager;
pub use player::{NotificationSink, PlaybackEngine, Player, PlayerState, PLAY_FAILED_MESSAGE};
pub use queue::Queue;
pub use types::{QueueConfig, QueueEntry, QueueInfo, RepeatMode};

#[cfg(feature = "wasm")]
pub use wasm::WasmQueueManager;
