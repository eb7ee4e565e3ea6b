//! Platform-agnostic player
//!
//! Drives a playback engine from queue decisions. The engine (browser audio
//! element, desktop output, test double) and the notification surface are
//! provided via traits; the player only decides what plays and when.

use crate::{
    error::{PlaybackError, QueueError, Result},
    events::QueueEvent,
    manager::QueueManager,
    types::RepeatMode,
};
use rockem_core::{Notification, Song};
use serde::Serialize;

/// Message shown when the engine refuses a song
pub const PLAY_FAILED_MESSAGE: &str = "Failed to play song. Please try again.";

/// Audio output the player drives
///
/// Implementors resolve the song to something playable (usually
/// `Song::file_url`) and report failures as `PlaybackError::Engine`.
pub trait PlaybackEngine {
    /// Load a song, replacing whatever was loaded
    fn load(&mut self, song: &Song) -> Result<()>;

    /// Start or resume the loaded song
    fn play(&mut self) -> Result<()>;

    /// Pause the loaded song
    fn pause(&mut self);

    /// Stop and unload
    fn stop(&mut self);

    /// Warm up the song that will probably play next
    ///
    /// Advisory; the default does nothing.
    fn preload(&mut self, _song: &Song) {}
}

/// Surface for transient status messages
pub trait NotificationSink {
    /// Show a notification
    fn notify(&mut self, notification: Notification);
}

/// Collects notifications in memory
impl NotificationSink for Vec<Notification> {
    fn notify(&mut self, notification: Notification) {
        self.push(notification);
    }
}

/// Player state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerState {
    /// Nothing loaded
    #[default]
    Stopped,
    /// Playing audio
    Playing,
    /// Paused mid-song
    Paused,
}

/// Player
///
/// Owns the queue manager it is given; there is no shared global queue.
pub struct Player<E, N> {
    queue: QueueManager,
    engine: E,
    notifier: N,
    state: PlayerState,
}

impl<E, N> Player<E, N>
where
    E: PlaybackEngine,
    N: NotificationSink,
{
    /// Create a player around an existing queue
    pub fn new(queue: QueueManager, engine: E, notifier: N) -> Self {
        Self {
            queue,
            engine,
            notifier,
            state: PlayerState::Stopped,
        }
    }

    // ===== Playback Control =====

    /// Move the cursor to an active-queue position and play it
    pub fn play_index(&mut self, index: usize) -> Result<()> {
        if self.queue.set_current_index(index).is_none() {
            self.dispatch_events();
            return Err(QueueError::OutOfRange {
                index,
                len: self.queue.len(),
            }
            .into());
        }
        self.play_current()
    }

    /// Play the song under the cursor from the start
    pub fn play_current(&mut self) -> Result<()> {
        let Some(song) = self.queue.get_current_song().cloned() else {
            self.stop();
            return Err(QueueError::EmptyQueue.into());
        };
        self.start(&song)
    }

    /// Play/pause button
    pub fn toggle_play(&mut self) -> Result<()> {
        match self.state {
            PlayerState::Playing => {
                self.engine.pause();
                self.state = PlayerState::Paused;
                tracing::debug!("Paused");
                Ok(())
            }
            PlayerState::Paused => {
                if let Err(err) = self.engine.play() {
                    self.fail(&err);
                    return Err(err);
                }
                self.state = PlayerState::Playing;
                tracing::debug!("Resumed");
                Ok(())
            }
            PlayerState::Stopped => self.play_current(),
        }
    }

    /// Skip to the next song
    ///
    /// At the end of the queue without repeat nothing changes.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Result<()> {
        match self.queue.next().cloned() {
            Some(song) => self.start(&song),
            None => {
                tracing::debug!("No next song");
                self.dispatch_events();
                Ok(())
            }
        }
    }

    /// Go back to the previous song
    pub fn previous(&mut self) -> Result<()> {
        match self.queue.previous().cloned() {
            Some(song) => self.start(&song),
            None => {
                tracing::debug!("No previous song");
                self.dispatch_events();
                Ok(())
            }
        }
    }

    /// Auto-advance when the engine reports the song finished
    ///
    /// Stops at the end of the queue; replays under repeat-one.
    pub fn on_song_ended(&mut self) -> Result<()> {
        match self.queue.next().cloned() {
            Some(song) => self.start(&song),
            None => {
                tracing::info!("Reached end of queue");
                self.stop();
                self.dispatch_events();
                Ok(())
            }
        }
    }

    /// Stop playback (the queue is kept)
    pub fn stop(&mut self) {
        self.engine.stop();
        self.state = PlayerState::Stopped;
    }

    // ===== Queue Edits =====

    /// Remove the song at a canonical index
    ///
    /// When the playing song is removed, the song that takes its place starts
    /// (or playback stops if paused or nothing is left).
    pub fn remove_from_queue(&mut self, index: usize) -> Result<Option<Song>> {
        let removed = self.queue.remove_from_queue(index);
        let events = self.queue.drain_events();
        let current_changed = events
            .iter()
            .any(|event| matches!(event, QueueEvent::CurrentChanged { .. }));
        self.notify_events(events);

        match self.state {
            PlayerState::Stopped => {}
            PlayerState::Playing if current_changed => {
                match self.queue.get_current_song().cloned() {
                    Some(song) => self.start(&song)?,
                    None => self.stop(),
                }
            }
            PlayerState::Paused if current_changed => self.stop(),
            PlayerState::Playing | PlayerState::Paused => self.preload_next(),
        }
        Ok(removed)
    }

    // ===== Modes =====

    /// Flip shuffle and announce it
    pub fn toggle_shuffle(&mut self) -> bool {
        let enabled = self.queue.toggle_shuffle();
        self.after_mode_change();
        enabled
    }

    /// Cycle repeat mode and announce it
    pub fn toggle_repeat(&mut self) -> RepeatMode {
        let mode = self.queue.toggle_repeat();
        self.after_mode_change();
        mode
    }

    // ===== State Queries =====

    /// Current player state
    pub fn state(&self) -> PlayerState {
        self.state
    }

    /// Song being played or paused
    pub fn now_playing(&self) -> Option<&Song> {
        match self.state {
            PlayerState::Stopped => None,
            PlayerState::Playing | PlayerState::Paused => self.queue.get_current_song(),
        }
    }

    /// Queue manager
    pub fn queue(&self) -> &QueueManager {
        &self.queue
    }

    /// Queue manager, for edits
    ///
    /// Events raised through this handle are delivered on the next player
    /// call or an explicit `dispatch_events`.
    pub fn queue_mut(&mut self) -> &mut QueueManager {
        &mut self.queue
    }

    /// Playback engine
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Notification sink
    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Forward pending queue events to the notification sink
    pub fn dispatch_events(&mut self) {
        let events = self.queue.drain_events();
        self.notify_events(events);
    }

    // ===== Internal =====

    fn notify_events(&mut self, events: Vec<QueueEvent>) {
        let duration = self.queue.config().notification_duration();
        for event in events {
            tracing::trace!(?event, "Queue event");
            if let Some(notification) = event.notification(duration) {
                self.notifier.notify(notification);
            }
        }
    }

    fn start(&mut self, song: &Song) -> Result<()> {
        if let Err(err) = self.load_and_play(song) {
            self.fail(&err);
            self.dispatch_events();
            return Err(err);
        }

        self.state = PlayerState::Playing;
        tracing::info!(id = %song.id, "Now playing: {}", song);
        self.preload_next();
        self.dispatch_events();
        Ok(())
    }

    fn load_and_play(&mut self, song: &Song) -> Result<()> {
        self.engine.load(song)?;
        self.engine.play()
    }

    fn preload_next(&mut self) {
        if self.queue.repeat_mode() == RepeatMode::One {
            return;
        }
        if let Some(next) = self.queue.get_next_song() {
            tracing::debug!(id = %next.id, "Preloading next song");
            self.engine.preload(next);
        }
    }

    fn after_mode_change(&mut self) {
        if self.state != PlayerState::Stopped {
            self.preload_next();
        }
        self.dispatch_events();
    }

    fn fail(&mut self, err: &PlaybackError) {
        tracing::warn!(%err, "Playback failed");
        self.engine.stop();
        self.state = PlayerState::Stopped;
        self.notifier.notify(Notification::error(PLAY_FAILED_MESSAGE));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rockem_core::NotificationLevel;

    #[derive(Default)]
    struct RecordingEngine {
        loaded: Vec<String>,
        preloaded: Vec<String>,
        fail_on: Option<String>,
    }

    impl PlaybackEngine for RecordingEngine {
        fn load(&mut self, song: &Song) -> Result<()> {
            if self.fail_on.as_deref() == Some(song.id.as_str()) {
                return Err(PlaybackError::engine("unsupported format"));
            }
            self.loaded.push(song.id.to_string());
            Ok(())
        }

        fn play(&mut self) -> Result<()> {
            Ok(())
        }

        fn pause(&mut self) {}

        fn stop(&mut self) {}

        fn preload(&mut self, song: &Song) {
            self.preloaded.push(song.id.to_string());
        }
    }

    fn player(ids: &[&str]) -> Player<RecordingEngine, Vec<Notification>> {
        let mut queue = QueueManager::default();
        queue.add_to_queue(ids.iter().map(|id| Song::new(*id, "Title", "Artist")));
        Player::new(queue, RecordingEngine::default(), Vec::new())
    }

    #[test]
    fn play_current_loads_and_preloads() {
        let mut player = player(&["a", "b"]);
        player.play_current().unwrap();

        assert_eq!(player.state(), PlayerState::Playing);
        assert_eq!(player.engine().loaded, vec!["a"]);
        assert_eq!(player.engine().preloaded, vec!["b"]);
        assert_eq!(player.now_playing().unwrap().id.as_str(), "a");
    }

    #[test]
    fn toggle_play_pauses_and_resumes() {
        let mut player = player(&["a"]);
        player.toggle_play().unwrap();
        assert_eq!(player.state(), PlayerState::Playing);

        player.toggle_play().unwrap();
        assert_eq!(player.state(), PlayerState::Paused);
        assert!(player.now_playing().is_some());

        player.toggle_play().unwrap();
        assert_eq!(player.state(), PlayerState::Playing);
        assert_eq!(player.engine().loaded, vec!["a"]);
    }

    #[test]
    fn play_on_empty_queue_errors() {
        let mut player = player(&[]);
        let err = player.play_current().unwrap_err();
        assert!(matches!(err, PlaybackError::Queue(QueueError::EmptyQueue)));
        assert_eq!(player.state(), PlayerState::Stopped);
    }

    #[test]
    fn engine_failure_notifies_and_stops() {
        let mut player = player(&["a", "bad"]);
        player.engine.fail_on = Some("bad".to_string());
        player.play_current().unwrap();

        assert!(player.next().is_err());
        assert_eq!(player.state(), PlayerState::Stopped);

        let last = player.notifier().last().unwrap();
        assert_eq!(last.level, NotificationLevel::Error);
        assert_eq!(last.message, PLAY_FAILED_MESSAGE);
    }

    #[test]
    fn song_end_stops_at_end_of_queue() {
        let mut player = player(&["a"]);
        player.play_current().unwrap();
        player.on_song_ended().unwrap();

        assert_eq!(player.state(), PlayerState::Stopped);
        assert!(player.now_playing().is_none());
    }

    #[test]
    fn removing_playing_song_plays_its_successor() {
        let mut player = player(&["a", "b", "c"]);
        player.play_current().unwrap();

        let removed = player.remove_from_queue(0).unwrap();
        assert_eq!(removed.unwrap().id.as_str(), "a");
        assert_eq!(player.engine().loaded, vec!["a", "b"]);
        assert_eq!(player.now_playing().unwrap().id.as_str(), "b");

        player.on_song_ended().unwrap();
        assert_eq!(player.engine().loaded, vec!["a", "b", "c"]);
    }

    #[test]
    fn toggles_are_announced() {
        let mut player = player(&["a", "b"]);
        player.toggle_shuffle();
        player.toggle_repeat();

        let messages: Vec<&str> = player
            .notifier()
            .iter()
            .map(|n| n.message.as_str())
            .collect();
        assert_eq!(messages, vec!["Shuffle enabled", "Repeat one"]);
    }
}
