/// Core error types for Rock 'em All
use thiserror::Error;

/// Result type alias using `RockemError`
pub type Result<T> = std::result::Result<T, RockemError>;

/// Core error type for Rock 'em All
#[derive(Error, Debug)]
pub enum RockemError {
    /// A song record failed validation at the I/O boundary
    #[error("Invalid song {id}: {reason}")]
    InvalidSong {
        /// Id of the offending record
        id: String,
        /// What failed
        reason: String,
    },

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl RockemError {
    /// Create an invalid song error
    pub fn invalid_song(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSong {
            id: id.into(),
            reason: reason.into(),
        }
    }
}
