//! Canonical queue with a shuffled projection
//!
//! Songs are stored once, in insertion order. The active traversal order is a
//! permutation of canonical slot positions:
//!
//! ```text
//! canonical: [A, B, C, B]        (duplicates are separate slots)
//! order:     [2, 0, 3, 1]        (shuffled)
//! active:    [C, A, B, B]
//! ```
//!
//! When shuffle is off the order is the identity, so active and canonical
//! positions coincide.

use crate::error::QueueError;
use crate::shuffle::{pinned_permutation, shuffle_tail};
use rand::Rng;
use rockem_core::Song;
use std::ops::Range;

/// Song list plus its active traversal order
#[derive(Debug, Clone, Default)]
pub struct Queue {
    /// Canonical songs, insertion order
    songs: Vec<Song>,

    /// Active order as canonical slot positions
    order: Vec<usize>,

    /// Whether `order` is a shuffled projection
    shuffled: bool,
}

impl Queue {
    /// Create new empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of songs
    pub fn len(&self) -> usize {
        self.songs.len()
    }

    /// Check if queue is empty
    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    /// Whether the active order is shuffled
    pub fn is_shuffled(&self) -> bool {
        self.shuffled
    }

    /// Canonical songs
    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    /// Active order as canonical positions
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Song at a canonical position
    pub fn get(&self, index: usize) -> Option<&Song> {
        self.songs.get(index)
    }

    /// Song at an active position
    pub fn active_get(&self, position: usize) -> Option<&Song> {
        self.canonical_index(position)
            .and_then(|slot| self.songs.get(slot))
    }

    /// Canonical position of the slot at an active position
    pub fn canonical_index(&self, position: usize) -> Option<usize> {
        self.order.get(position).copied()
    }

    /// Active position of a canonical slot
    pub fn active_position(&self, index: usize) -> Option<usize> {
        self.order.iter().position(|&slot| slot == index)
    }

    /// Songs in active order
    pub fn active_songs(&self) -> impl Iterator<Item = &Song> + '_ {
        self.order.iter().map(move |&slot| &self.songs[slot])
    }

    /// Append songs to the canonical end
    ///
    /// New slots are appended to the active order as well; a shuffled caller
    /// re-derives the tail afterwards. Returns the canonical range added.
    pub fn append<I>(&mut self, songs: I) -> Range<usize>
    where
        I: IntoIterator<Item = Song>,
    {
        let start = self.songs.len();
        self.songs.extend(songs);
        let end = self.songs.len();
        self.order.extend(start..end);
        start..end
    }

    /// Insert a song at a canonical index
    ///
    /// The new slot lands at `position` in the active order (clamped to the end).
    /// Passing `position == index` on an unshuffled queue keeps the identity order.
    pub fn insert(&mut self, index: usize, song: Song, position: usize) -> Result<(), QueueError> {
        if index > self.songs.len() {
            return Err(QueueError::OutOfRange {
                index,
                len: self.songs.len(),
            });
        }

        self.songs.insert(index, song);
        for slot in &mut self.order {
            if *slot >= index {
                *slot += 1;
            }
        }
        let position = position.min(self.order.len());
        self.order.insert(position, index);
        Ok(())
    }

    /// Remove the song at a canonical index
    ///
    /// Returns the song and the active position its slot occupied.
    pub fn remove(&mut self, index: usize) -> Result<(Song, usize), QueueError> {
        if self.songs.is_empty() {
            return Err(QueueError::EmptyQueue);
        }
        if index >= self.songs.len() {
            return Err(QueueError::OutOfRange {
                index,
                len: self.songs.len(),
            });
        }

        let song = self.songs.remove(index);
        let position = self
            .active_position(index)
            .ok_or(QueueError::OutOfRange {
                index,
                len: self.order.len(),
            })?;
        self.order.remove(position);
        for slot in &mut self.order {
            if *slot > index {
                *slot -= 1;
            }
        }

        Ok((song, position))
    }

    /// Remove every song
    ///
    /// The shuffle flag survives; it is a mode, not content.
    pub fn clear(&mut self) {
        self.songs.clear();
        self.order.clear();
    }

    /// Derive a fresh shuffled order with `pinned` (canonical) first
    pub fn shuffle<R: Rng + ?Sized>(&mut self, pinned: Option<usize>, rng: &mut R) {
        self.order = pinned_permutation(self.songs.len(), pinned, rng);
        self.shuffled = true;
    }

    /// Reshuffle active positions from `from` onward
    ///
    /// No-op when the queue is not shuffled.
    pub fn reshuffle_from<R: Rng + ?Sized>(&mut self, from: usize, rng: &mut R) {
        if self.shuffled {
            shuffle_tail(&mut self.order, from, rng);
        }
    }

    /// Drop the shuffled projection and return to canonical order
    pub fn unshuffle(&mut self) {
        self.order = (0..self.songs.len()).collect();
        self.shuffled = false;
    }
}
