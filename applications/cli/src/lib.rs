//! Rock 'em All terminal player
//!
//! Loads a song list exported from the backend, queues it, and drives the
//! playback queue from typed commands. Audio output is simulated on the
//! console; the stream URLs are the ones a browser audio element would use.
//!
//! This library exposes the core components for testing purposes.

pub mod commands;
pub mod config;
pub mod console;
pub mod error;
pub mod session;

// Re-export commonly used types for convenience
pub use commands::Command;
pub use config::{CliConfig, PlayerSettings};
pub use console::{ConsoleEngine, ConsoleNotifier};
pub use error::{CliError, Result};
pub use session::{load_songs, Session};
