//! Transient user-facing status messages
//!
//! Notifications are advisory: producers hand them to whatever surface the
//! front end has (toast, status line, log) and never depend on delivery.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// How long a notification stays up unless the producer says otherwise
pub const DEFAULT_NOTIFICATION_DURATION: Duration = Duration::from_secs(5);

/// Notification severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    /// Operation succeeded
    Success,
    /// Operation failed
    Error,
    /// Something needs attention
    Warning,
    /// Plain status update
    Info,
}

impl NotificationLevel {
    /// Icon rendered next to the message
    pub fn icon(&self) -> &'static str {
        match self {
            NotificationLevel::Success => "✅",
            NotificationLevel::Error => "❌",
            NotificationLevel::Warning => "⚠️",
            NotificationLevel::Info => "ℹ️",
        }
    }
}

/// A single status message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Text shown to the user
    pub message: String,

    /// Severity
    pub level: NotificationLevel,

    /// Display time; zero keeps the notification up until dismissed
    pub duration: Duration,
}

impl Notification {
    /// Create a notification with the default display time
    pub fn new(message: impl Into<String>, level: NotificationLevel) -> Self {
        Self {
            message: message.into(),
            level,
            duration: DEFAULT_NOTIFICATION_DURATION,
        }
    }

    /// Create an info notification
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, NotificationLevel::Info)
    }

    /// Create an error notification
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, NotificationLevel::Error)
    }

    /// Create a success notification
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, NotificationLevel::Success)
    }

    /// Create a warning notification
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message, NotificationLevel::Warning)
    }

    /// Override the display time
    #[must_use]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Whether the notification stays up until dismissed
    pub fn is_sticky(&self) -> bool {
        self.duration.is_zero()
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.level.icon(), self.message)
    }
}
