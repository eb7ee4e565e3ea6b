//! Queue manager - play order and cursor bookkeeping
//!
//! Owns the canonical queue, the cursor into the active order, and the
//! shuffle/repeat modes. Every query is answered against the active order;
//! insertion and removal always address the canonical queue.

use crate::{
    events::QueueEvent,
    queue::Queue,
    types::{QueueConfig, QueueEntry, QueueInfo, RepeatMode},
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rockem_core::Song;

/// Queue manager
///
/// One instance per listening session, owned by whoever drives playback.
#[derive(Debug)]
pub struct QueueManager {
    // Canonical songs plus active order
    queue: Queue,

    // Cursor into the active order
    current_index: usize,

    repeat: RepeatMode,

    config: QueueConfig,

    rng: StdRng,

    // Event queue for UI synchronization
    pending_events: Vec<QueueEvent>,
}

impl Default for QueueManager {
    fn default() -> Self {
        Self::new(QueueConfig::default())
    }
}

impl QueueManager {
    /// Create new queue manager
    pub fn new(config: QueueConfig) -> Self {
        let mut rng = match config.shuffle_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut queue = Queue::new();
        if config.shuffle {
            queue.shuffle(None, &mut rng);
        }

        Self {
            queue,
            current_index: 0,
            repeat: config.repeat,
            config,
            rng,
            pending_events: Vec::new(),
        }
    }

    // ===== Queue Management =====

    /// Append songs to the end of the queue
    ///
    /// The cursor does not move. While shuffled, the new songs are mixed into
    /// the upcoming part of the active order only.
    pub fn add_to_queue<I>(&mut self, songs: I)
    where
        I: IntoIterator<Item = Song>,
    {
        let was_empty = self.queue.is_empty();
        let added = self.queue.append(songs);
        if added.is_empty() {
            return;
        }

        let from = if was_empty { 0 } else { self.current_index + 1 };
        self.queue.reshuffle_from(from, &mut self.rng);

        tracing::debug!(
            added = added.len(),
            length = self.queue.len(),
            "Added songs to queue"
        );
        self.emit_queue_changed();
        if was_empty {
            self.emit_current_changed();
        }
    }

    /// Append a single song
    pub fn add_song(&mut self, song: Song) {
        self.add_to_queue(std::iter::once(song));
    }

    /// Insert a song right after the current one
    ///
    /// On an empty queue the song becomes the only entry.
    pub fn add_next(&mut self, song: Song) {
        let was_empty = self.queue.is_empty();
        let (index, position) = if was_empty {
            (0, 0)
        } else {
            let canonical = self.current_canonical_index().unwrap_or(self.current_index);
            (canonical + 1, self.current_index + 1)
        };

        if let Err(err) = self.queue.insert(index, song, position) {
            tracing::debug!(%err, "Ignoring add_next");
            return;
        }
        self.queue
            .reshuffle_from(self.current_index + 2, &mut self.rng);

        tracing::debug!(index, length = self.queue.len(), "Queued song to play next");
        self.emit_queue_changed();
        if was_empty {
            self.emit_current_changed();
        }
    }

    /// Remove the song at a canonical index
    ///
    /// Out-of-range indices are ignored. Returns the removed song.
    pub fn remove_from_queue(&mut self, index: usize) -> Option<Song> {
        let (song, position) = match self.queue.remove(index) {
            Ok(removed) => removed,
            Err(err) => {
                tracing::debug!(%err, "Ignoring remove_from_queue");
                return None;
            }
        };

        let removed_current = position == self.current_index;
        if position < self.current_index {
            self.current_index -= 1;
        } else if removed_current && self.current_index >= self.queue.len() {
            self.current_index = self.queue.len().saturating_sub(1);
        }
        self.queue
            .reshuffle_from(self.current_index + 1, &mut self.rng);

        tracing::debug!(
            index,
            current_index = self.current_index,
            length = self.queue.len(),
            "Removed song from queue"
        );
        self.emit_queue_changed();
        if removed_current {
            self.emit_current_changed();
        }
        Some(song)
    }

    /// Remove every song and reset the cursor
    pub fn clear_queue(&mut self) {
        self.queue.clear();
        self.current_index = 0;

        tracing::debug!("Cleared queue");
        self.emit_queue_changed();
        self.emit_current_changed();
    }

    // ===== Cursor Queries =====

    /// Song under the cursor
    pub fn get_current_song(&self) -> Option<&Song> {
        self.queue.active_get(self.current_index)
    }

    /// Song `next()` would move to, without moving
    pub fn get_next_song(&self) -> Option<&Song> {
        self.next_position()
            .and_then(|position| self.queue.active_get(position))
    }

    /// Song `previous()` would move to, without moving
    pub fn get_previous_song(&self) -> Option<&Song> {
        self.previous_position()
            .and_then(|position| self.queue.active_get(position))
    }

    // ===== Cursor Movement =====

    /// Advance the cursor
    ///
    /// Returns the new current song, or `None` at the end of the queue without
    /// repeat (the cursor stays put). Under repeat-one the cursor never moves.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<&Song> {
        let position = self.next_position()?;
        self.move_cursor(position);
        self.get_current_song()
    }

    /// Step the cursor back
    ///
    /// Mirrors `next()`: wraps to the end under repeat-all, stays put under
    /// repeat-one, returns `None` at the start without repeat.
    pub fn previous(&mut self) -> Option<&Song> {
        let position = self.previous_position()?;
        self.move_cursor(position);
        self.get_current_song()
    }

    /// Jump to a position in the active queue
    ///
    /// Out-of-range positions leave the state unchanged and return `None`.
    pub fn set_current_index(&mut self, index: usize) -> Option<&Song> {
        if index >= self.queue.len() {
            tracing::debug!(index, length = self.queue.len(), "Ignoring set_current_index");
            return None;
        }
        self.move_cursor(index);
        self.get_current_song()
    }

    // ===== Shuffle & Repeat =====

    /// Flip shuffle mode and return the new flag
    pub fn toggle_shuffle(&mut self) -> bool {
        let enabled = !self.queue.is_shuffled();
        self.set_shuffle(enabled);
        enabled
    }

    /// Set shuffle mode
    ///
    /// The current song stays current: enabling puts it first in a fresh
    /// shuffled order, disabling moves the cursor to its canonical position.
    pub fn set_shuffle(&mut self, enabled: bool) {
        if enabled == self.queue.is_shuffled() {
            return;
        }

        let current = self.current_canonical_index();
        if enabled {
            self.queue.shuffle(current, &mut self.rng);
            self.current_index = 0;
        } else {
            self.queue.unshuffle();
            self.current_index = current.unwrap_or(0);
        }

        tracing::info!(enabled, current_index = self.current_index, "Shuffle toggled");
        self.pending_events
            .push(QueueEvent::ShuffleToggled { enabled });
    }

    /// Cycle repeat mode none -> one -> all and return the new mode
    pub fn toggle_repeat(&mut self) -> RepeatMode {
        let mode = self.repeat.cycle();
        self.set_repeat(mode);
        mode
    }

    /// Set repeat mode
    pub fn set_repeat(&mut self, mode: RepeatMode) {
        if self.repeat == mode {
            return;
        }
        self.repeat = mode;

        tracing::info!(%mode, "Repeat mode changed");
        self.pending_events.push(QueueEvent::RepeatChanged { mode });
    }

    // ===== State Queries =====

    /// Read-only snapshot for rendering
    pub fn get_queue_info(&self) -> QueueInfo {
        let active = self
            .queue
            .order()
            .iter()
            .enumerate()
            .map(|(position, &canonical_index)| QueueEntry {
                position,
                canonical_index,
                song: self.queue.songs()[canonical_index].clone(),
                is_current: position == self.current_index,
            })
            .collect();

        QueueInfo {
            queue: self.queue.songs().to_vec(),
            active,
            current_index: self.current_index,
            shuffle_mode: self.queue.is_shuffled(),
            repeat_mode: self.repeat,
            current_song: self.get_current_song().cloned(),
            next_song: self.get_next_song().cloned(),
            previous_song: self.get_previous_song().cloned(),
        }
    }

    /// Canonical queue, insertion order
    pub fn queue(&self) -> &[Song] {
        self.queue.songs()
    }

    /// Songs in traversal order
    pub fn active_queue(&self) -> Vec<&Song> {
        self.queue.active_songs().collect()
    }

    /// Shuffled projection
    ///
    /// Same as the canonical order while shuffle is off.
    pub fn shuffled_queue(&self) -> Vec<&Song> {
        self.active_queue()
    }

    /// Number of songs
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Check if queue is empty
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Cursor into the active queue
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Shuffle flag
    pub fn shuffle_enabled(&self) -> bool {
        self.queue.is_shuffled()
    }

    /// Current repeat mode
    pub fn repeat_mode(&self) -> RepeatMode {
        self.repeat
    }

    /// Configuration the manager was built with
    pub fn config(&self) -> &QueueConfig {
        &self.config
    }

    // ===== Events =====

    /// Take all events emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<QueueEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Check if there are undrained events
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    // ===== Internal =====

    fn current_canonical_index(&self) -> Option<usize> {
        self.queue.canonical_index(self.current_index)
    }

    fn next_position(&self) -> Option<usize> {
        let len = self.queue.len();
        if len == 0 {
            return None;
        }

        match self.repeat {
            RepeatMode::One => Some(self.current_index),
            _ if self.current_index + 1 < len => Some(self.current_index + 1),
            RepeatMode::All => Some(0),
            RepeatMode::None => None,
        }
    }

    fn previous_position(&self) -> Option<usize> {
        let len = self.queue.len();
        if len == 0 {
            return None;
        }

        match self.repeat {
            RepeatMode::One => Some(self.current_index),
            _ if self.current_index > 0 => Some(self.current_index - 1),
            RepeatMode::All => Some(len - 1),
            RepeatMode::None => None,
        }
    }

    fn move_cursor(&mut self, position: usize) {
        if position == self.current_index {
            return;
        }
        self.current_index = position;

        tracing::debug!(current_index = position, "Cursor moved");
        self.emit_current_changed();
    }

    fn emit_queue_changed(&mut self) {
        self.pending_events.push(QueueEvent::QueueChanged {
            length: self.queue.len(),
        });
    }

    fn emit_current_changed(&mut self) {
        let song_id = self.get_current_song().map(|song| song.id.clone());
        self.pending_events.push(QueueEvent::CurrentChanged {
            index: self.current_index,
            song_id,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn song(id: &str) -> Song {
        Song::new(id, format!("Song {}", id), "Test Artist")
    }

    fn manager_with(ids: &[&str]) -> QueueManager {
        let mut manager = QueueManager::new(QueueConfig {
            shuffle_seed: Some(42),
            ..QueueConfig::default()
        });
        manager.add_to_queue(ids.iter().map(|id| song(id)));
        manager.drain_events();
        manager
    }

    fn current_id(manager: &QueueManager) -> Option<String> {
        manager.get_current_song().map(|s| s.id.to_string())
    }

    fn active_ids(manager: &QueueManager) -> Vec<String> {
        manager
            .active_queue()
            .iter()
            .map(|s| s.id.to_string())
            .collect()
    }

    #[test]
    fn create_manager() {
        let manager = QueueManager::default();
        assert!(manager.is_empty());
        assert_eq!(manager.current_index(), 0);
        assert!(!manager.shuffle_enabled());
        assert_eq!(manager.repeat_mode(), RepeatMode::None);
        assert!(manager.get_current_song().is_none());
    }

    #[test]
    fn config_sets_initial_modes() {
        let manager = QueueManager::new(QueueConfig {
            shuffle: true,
            repeat: RepeatMode::All,
            ..QueueConfig::default()
        });
        assert!(manager.shuffle_enabled());
        assert_eq!(manager.repeat_mode(), RepeatMode::All);
    }

    #[test]
    fn add_to_queue_keeps_cursor() {
        let mut manager = manager_with(&["a", "b"]);
        manager.set_current_index(1);

        manager.add_to_queue(vec![song("c")]);
        assert_eq!(manager.current_index(), 1);
        assert_eq!(active_ids(&manager), vec!["a", "b", "c"]);
    }

    #[test]
    fn add_song_appends_single() {
        let mut manager = QueueManager::default();
        manager.add_song(song("x"));
        assert_eq!(manager.len(), 1);
        assert_eq!(current_id(&manager).as_deref(), Some("x"));
    }

    #[test]
    fn add_next_inserts_after_cursor() {
        let mut manager = manager_with(&["a", "b", "c"]);
        manager.set_current_index(1);

        manager.add_next(song("n"));
        assert_eq!(active_ids(&manager), vec!["a", "b", "n", "c"]);
        assert_eq!(current_id(&manager).as_deref(), Some("b"));
        assert_eq!(manager.get_next_song().unwrap().id.as_str(), "n");
    }

    #[test]
    fn add_next_on_empty_queue() {
        let mut manager = QueueManager::default();
        manager.add_next(song("n"));
        assert_eq!(active_ids(&manager), vec!["n"]);
        assert_eq!(manager.current_index(), 0);
    }

    #[test]
    fn add_next_while_shuffled_plays_next() {
        let mut manager = manager_with(&["a", "b", "c", "d", "e"]);
        manager.set_current_index(2);
        manager.toggle_shuffle();
        manager.next();
        let current = current_id(&manager);

        manager.add_next(song("n"));
        assert_eq!(current_id(&manager), current);
        assert_eq!(manager.get_next_song().unwrap().id.as_str(), "n");
        assert_eq!(manager.len(), 6);
    }

    #[test]
    fn remove_before_cursor_keeps_current_song() {
        let mut manager = manager_with(&["a", "b", "c"]);
        manager.set_current_index(2);

        let removed = manager.remove_from_queue(0).unwrap();
        assert_eq!(removed.id.as_str(), "a");
        assert_eq!(manager.current_index(), 1);
        assert_eq!(current_id(&manager).as_deref(), Some("c"));
    }

    #[test]
    fn remove_current_last_clamps() {
        let mut manager = manager_with(&["a", "b", "c"]);
        manager.set_current_index(2);

        manager.remove_from_queue(2);
        assert_eq!(manager.current_index(), 1);
        assert_eq!(current_id(&manager).as_deref(), Some("b"));
    }

    #[test]
    fn remove_current_middle_advances_to_following_song() {
        let mut manager = manager_with(&["a", "b", "c"]);
        manager.set_current_index(1);

        manager.remove_from_queue(1);
        assert_eq!(manager.current_index(), 1);
        assert_eq!(current_id(&manager).as_deref(), Some("c"));
    }

    #[test]
    fn remove_only_song_resets_cursor() {
        let mut manager = manager_with(&["a"]);
        manager.remove_from_queue(0);
        assert!(manager.is_empty());
        assert_eq!(manager.current_index(), 0);
        assert!(manager.get_current_song().is_none());
    }

    #[test]
    fn remove_out_of_range_is_ignored() {
        let mut manager = manager_with(&["a", "b"]);
        assert!(manager.remove_from_queue(2).is_none());
        assert_eq!(manager.len(), 2);
        assert!(!manager.has_pending_events());
    }

    #[test]
    fn remove_while_shuffled_keeps_current_song() {
        let mut manager = manager_with(&["a", "b", "c", "d", "e", "f"]);
        manager.toggle_shuffle();
        manager.next();
        manager.next();
        let current = current_id(&manager).unwrap();

        let victim = manager
            .queue()
            .iter()
            .position(|s| s.id.as_str() != current)
            .unwrap();
        manager.remove_from_queue(victim);

        assert_eq!(current_id(&manager).unwrap(), current);
        assert_eq!(manager.len(), 5);
    }

    #[test]
    fn clear_resets_everything() {
        let mut manager = manager_with(&["a", "b", "c"]);
        manager.set_current_index(2);

        manager.clear_queue();
        assert!(manager.is_empty());
        assert_eq!(manager.current_index(), 0);
        assert!(manager.active_queue().is_empty());
    }

    #[test]
    fn next_stops_at_end_without_repeat() {
        let mut manager = manager_with(&["a", "b"]);
        assert_eq!(manager.next().unwrap().id.as_str(), "b");
        assert!(manager.next().is_none());
        assert_eq!(manager.current_index(), 1);
    }

    #[test]
    fn next_wraps_with_repeat_all() {
        let mut manager = manager_with(&["a", "b"]);
        manager.set_repeat(RepeatMode::All);
        manager.next();
        assert_eq!(manager.next().unwrap().id.as_str(), "a");
        assert_eq!(manager.current_index(), 0);
    }

    #[test]
    fn previous_stops_at_start_without_repeat() {
        let mut manager = manager_with(&["a", "b"]);
        assert!(manager.get_previous_song().is_none());
        assert!(manager.previous().is_none());
        assert_eq!(manager.current_index(), 0);
    }

    #[test]
    fn previous_wraps_with_repeat_all() {
        let mut manager = manager_with(&["a", "b", "c"]);
        manager.set_repeat(RepeatMode::All);
        assert_eq!(manager.previous().unwrap().id.as_str(), "c");
        assert_eq!(manager.current_index(), 2);
    }

    #[test]
    fn repeat_one_holds_cursor_both_ways() {
        let mut manager = manager_with(&["a", "b", "c"]);
        manager.set_current_index(1);
        manager.set_repeat(RepeatMode::One);

        assert_eq!(manager.get_next_song().unwrap().id.as_str(), "b");
        assert_eq!(manager.get_previous_song().unwrap().id.as_str(), "b");
        assert_eq!(manager.next().unwrap().id.as_str(), "b");
        assert_eq!(manager.previous().unwrap().id.as_str(), "b");
        assert_eq!(manager.current_index(), 1);
    }

    #[test]
    fn navigation_on_empty_queue() {
        let mut manager = QueueManager::default();
        manager.set_repeat(RepeatMode::All);
        assert!(manager.get_next_song().is_none());
        assert!(manager.next().is_none());
        assert!(manager.previous().is_none());
    }

    #[test]
    fn set_current_index_out_of_range() {
        let mut manager = manager_with(&["a", "b"]);
        manager.set_current_index(1);

        assert!(manager.set_current_index(2).is_none());
        assert_eq!(manager.current_index(), 1);
    }

    #[test]
    fn shuffle_on_keeps_current_song_first() {
        let mut manager = manager_with(&["a", "b", "c", "d", "e"]);
        manager.set_current_index(3);

        assert!(manager.toggle_shuffle());
        assert_eq!(manager.current_index(), 0);
        assert_eq!(current_id(&manager).as_deref(), Some("d"));

        let mut shuffled = active_ids(&manager);
        shuffled.sort();
        assert_eq!(shuffled, vec!["a", "b", "c", "d", "e"]);
        assert_eq!(
            manager
                .queue()
                .iter()
                .map(|s| s.id.to_string())
                .collect::<Vec<_>>(),
            vec!["a", "b", "c", "d", "e"]
        );
    }

    #[test]
    fn shuffle_off_restores_canonical_position() {
        let mut manager = manager_with(&["a", "b", "c", "d", "e"]);
        manager.toggle_shuffle();
        manager.next();
        manager.next();
        let current = current_id(&manager);

        assert!(!manager.toggle_shuffle());
        assert_eq!(current_id(&manager), current);
        assert_eq!(active_ids(&manager), vec!["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn shuffled_queue_matches_canonical_when_off() {
        let manager = manager_with(&["a", "b", "c"]);
        let shuffled: Vec<&str> = manager
            .shuffled_queue()
            .iter()
            .map(|s| s.id.as_str())
            .collect();
        assert_eq!(shuffled, vec!["a", "b", "c"]);
    }

    #[test]
    fn same_seed_same_shuffle() {
        let mut first = manager_with(&["a", "b", "c", "d", "e", "f", "g"]);
        let mut second = manager_with(&["a", "b", "c", "d", "e", "f", "g"]);
        first.toggle_shuffle();
        second.toggle_shuffle();
        assert_eq!(active_ids(&first), active_ids(&second));
    }

    #[test]
    fn toggle_repeat_cycles_and_emits() {
        let mut manager = QueueManager::default();
        assert_eq!(manager.toggle_repeat(), RepeatMode::One);
        assert_eq!(manager.toggle_repeat(), RepeatMode::All);
        assert_eq!(manager.toggle_repeat(), RepeatMode::None);

        let events = manager.drain_events();
        assert_eq!(events.len(), 3);
        assert_eq!(
            events[0],
            QueueEvent::RepeatChanged {
                mode: RepeatMode::One
            }
        );
    }

    #[test]
    fn mutations_emit_events() {
        let mut manager = QueueManager::default();
        manager.add_to_queue(vec![song("a"), song("b")]);
        manager.next();

        let events = manager.drain_events();
        assert_eq!(
            events,
            vec![
                QueueEvent::QueueChanged { length: 2 },
                QueueEvent::CurrentChanged {
                    index: 0,
                    song_id: Some("a".into())
                },
                QueueEvent::CurrentChanged {
                    index: 1,
                    song_id: Some("b".into())
                },
            ]
        );
        assert!(!manager.has_pending_events());
    }

    #[test]
    fn queue_info_snapshot() {
        let mut manager = manager_with(&["a", "b", "c"]);
        manager.set_current_index(1);

        let info = manager.get_queue_info();
        assert_eq!(info.queue.len(), 3);
        assert_eq!(info.current_index, 1);
        assert!(!info.shuffle_mode);
        assert_eq!(info.repeat_mode, RepeatMode::None);
        assert_eq!(info.current_song.as_ref().unwrap().id.as_str(), "b");
        assert_eq!(info.next_song.as_ref().unwrap().id.as_str(), "c");
        assert_eq!(info.previous_song.as_ref().unwrap().id.as_str(), "a");
        assert!(info.active[1].is_current);
        assert!(!info.active[0].is_current);
        assert_eq!(info.button_label(), "📋 (3)");
        assert_eq!(info.button_title(), "Queue (3 songs)");
        assert_eq!(info.shuffle_title(), "Enable shuffle");
    }
}
