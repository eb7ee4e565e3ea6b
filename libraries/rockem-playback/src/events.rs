//! Queue events
//!
//! Event-based communication for UI synchronization. The manager records an
//! event for every state change; the caller drains them after each call and
//! redraws whatever depends on them (queue list, button states, toasts).

use crate::types::RepeatMode;
use rockem_core::{Notification, SongId};
use serde::Serialize;
use std::time::Duration;

/// Events emitted by the queue manager
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QueueEvent {
    /// Queue contents changed (songs added/removed/cleared)
    QueueChanged {
        /// New queue length
        length: usize,
    },

    /// Cursor moved or now points at a different song
    CurrentChanged {
        /// Cursor into the active queue
        index: usize,
        /// Song under the cursor (if any)
        song_id: Option<SongId>,
    },

    /// Shuffle was switched on or off
    ShuffleToggled {
        /// New shuffle flag
        enabled: bool,
    },

    /// Repeat mode changed
    RepeatChanged {
        /// New repeat mode
        mode: RepeatMode,
    },
}

impl QueueEvent {
    /// Status message for mode toggles
    ///
    /// Only mode changes are announced; content and cursor changes are shown by
    /// the queue list itself.
    pub fn notification(&self, duration: Duration) -> Option<Notification> {
        let message = match self {
            QueueEvent::ShuffleToggled { enabled: true } => "Shuffle enabled",
            QueueEvent::ShuffleToggled { enabled: false } => "Shuffle disabled",
            QueueEvent::RepeatChanged { mode } => mode.label(),
            QueueEvent::QueueChanged { .. } | QueueEvent::CurrentChanged { .. } => return None,
        };

        Some(Notification::info(message).with_duration(duration))
    }
}
