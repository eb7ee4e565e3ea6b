//! Error types for queue and playback management

use thiserror::Error;

/// Queue errors
///
/// The queue manager never surfaces these to its callers; they are turned into
/// no-ops or `None` at the manager boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueueError {
    /// Index outside the queue
    #[error("Index {index} out of range for queue of length {len}")]
    OutOfRange {
        /// Requested index
        index: usize,
        /// Queue length at the time
        len: usize,
    },

    /// Operation needs at least one song
    #[error("Queue is empty")]
    EmptyQueue,
}

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Nothing in the queue could be played
    #[error(transparent)]
    Queue(#[from] QueueError),

    /// The playback engine refused the song
    #[error("Playback engine error: {0}")]
    Engine(String),
}

impl PlaybackError {
    /// Create an engine error
    pub fn engine(msg: impl Into<String>) -> Self {
        Self::Engine(msg.into())
    }
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
