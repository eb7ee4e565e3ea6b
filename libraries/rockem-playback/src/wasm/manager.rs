//! WASM-compatible QueueManager wrapper

use crate::{QueueConfig, QueueEvent, QueueManager, RepeatMode};
use js_sys::{Array, Function};
use rockem_core::Song;
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// WASM-compatible queue manager
///
/// Songs cross the boundary as plain JS objects (`{ id, title, artist,
/// image_path?, duration? }`) and are validated on the way in.
#[wasm_bindgen]
pub struct WasmQueueManager {
    inner: QueueManager,

    // Event callbacks
    on_queue_change: Option<Function>,
    on_notification: Option<Function>,
}

#[wasm_bindgen]
impl WasmQueueManager {
    /// Create a new queue manager
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        // Enable panic hooks for better error messages in console
        console_error_panic_hook::set_once();

        Self {
            inner: QueueManager::new(QueueConfig::default()),
            on_queue_change: None,
            on_notification: None,
        }
    }

    // ===== Queue Management =====

    /// Append one song or an array of songs
    #[wasm_bindgen(js_name = addToQueue)]
    pub fn add_to_queue(&mut self, songs: JsValue) -> Result<(), JsValue> {
        let songs: Vec<Song> = if Array::is_array(&songs) {
            from_js(songs)?
        } else {
            vec![from_js(songs)?]
        };

        self.inner.add_to_queue(songs);
        self.flush_events();
        Ok(())
    }

    /// Insert a song right after the current one
    #[wasm_bindgen(js_name = addNext)]
    pub fn add_next(&mut self, song: JsValue) -> Result<(), JsValue> {
        let song: Song = from_js(song)?;
        self.inner.add_next(song);
        self.flush_events();
        Ok(())
    }

    /// Remove song at a canonical index; returns it, or null when out of range
    #[wasm_bindgen(js_name = removeFromQueue)]
    pub fn remove_from_queue(&mut self, index: usize) -> JsValue {
        let removed = self.inner.remove_from_queue(index);
        self.flush_events();
        to_js(&removed)
    }

    /// Clear entire queue
    #[wasm_bindgen(js_name = clearQueue)]
    pub fn clear_queue(&mut self) {
        self.inner.clear_queue();
        self.flush_events();
    }

    // ===== Navigation =====

    /// Song under the cursor, or null
    #[wasm_bindgen(js_name = getCurrentSong)]
    pub fn get_current_song(&self) -> JsValue {
        to_js(&self.inner.get_current_song())
    }

    /// Peek at the next song, or null
    #[wasm_bindgen(js_name = getNextSong)]
    pub fn get_next_song(&self) -> JsValue {
        to_js(&self.inner.get_next_song())
    }

    /// Peek at the previous song, or null
    #[wasm_bindgen(js_name = getPreviousSong)]
    pub fn get_previous_song(&self) -> JsValue {
        to_js(&self.inner.get_previous_song())
    }

    /// Advance; returns the new current song, or null at the end
    pub fn next(&mut self) -> JsValue {
        let song = self.inner.next().cloned();
        self.flush_events();
        to_js(&song)
    }

    /// Step back; returns the new current song, or null at the start
    pub fn previous(&mut self) -> JsValue {
        let song = self.inner.previous().cloned();
        self.flush_events();
        to_js(&song)
    }

    /// Jump to an active-queue index; returns the song, or null when out of range
    #[wasm_bindgen(js_name = setCurrentIndex)]
    pub fn set_current_index(&mut self, index: usize) -> JsValue {
        let song = self.inner.set_current_index(index).cloned();
        self.flush_events();
        to_js(&song)
    }

    // ===== Shuffle & Repeat =====

    /// Toggle shuffle; returns the new flag
    #[wasm_bindgen(js_name = toggleShuffle)]
    pub fn toggle_shuffle(&mut self) -> bool {
        let enabled = self.inner.toggle_shuffle();
        self.flush_events();
        enabled
    }

    /// Cycle repeat mode; returns "none" | "one" | "all"
    #[wasm_bindgen(js_name = toggleRepeat)]
    pub fn toggle_repeat(&mut self) -> String {
        let mode = self.inner.toggle_repeat();
        self.flush_events();
        mode.to_string()
    }

    /// Set repeat mode ("none" | "one" | "all")
    #[wasm_bindgen(js_name = setRepeat)]
    pub fn set_repeat(&mut self, mode: &str) -> Result<(), JsValue> {
        let repeat = match mode {
            "none" => RepeatMode::None,
            "one" => RepeatMode::One,
            "all" => RepeatMode::All,
            _ => return Err(JsValue::from_str("Invalid repeat mode. Use 'none', 'one', or 'all'")),
        };

        self.inner.set_repeat(repeat);
        self.flush_events();
        Ok(())
    }

    // ===== State Queries =====

    /// Snapshot for rendering the queue panel
    #[wasm_bindgen(js_name = getQueueInfo)]
    pub fn get_queue_info(&self) -> JsValue {
        to_js(&self.inner.get_queue_info())
    }

    /// Get queue length
    #[wasm_bindgen(js_name = queueLength)]
    pub fn queue_length(&self) -> usize {
        self.inner.len()
    }

    // ===== Event Listeners =====

    /// Register queue change callback (no arguments)
    #[wasm_bindgen(js_name = onQueueChange)]
    pub fn on_queue_change(&mut self, callback: Function) {
        self.on_queue_change = Some(callback);
    }

    /// Register notification callback `(message, level, durationMs)`
    #[wasm_bindgen(js_name = onNotification)]
    pub fn on_notification(&mut self, callback: Function) {
        self.on_notification = Some(callback);
    }

    // ===== Internal Event Emitters =====

    fn flush_events(&mut self) {
        let duration = self.inner.config().notification_duration();
        let mut queue_changed = false;

        for event in self.inner.drain_events() {
            match &event {
                QueueEvent::QueueChanged { .. } | QueueEvent::CurrentChanged { .. } => {
                    queue_changed = true;
                }
                QueueEvent::ShuffleToggled { .. } | QueueEvent::RepeatChanged { .. } => {
                    queue_changed = true;
                    if let (Some(cb), Some(note)) =
                        (&self.on_notification, event.notification(duration))
                    {
                        let level = to_js(&note.level);
                        let duration_ms = JsValue::from_f64(note.duration.as_millis() as f64);
                        cb.call3(
                            &JsValue::NULL,
                            &JsValue::from_str(&note.message),
                            &level,
                            &duration_ms,
                        )
                        .ok();
                    }
                }
            }
        }

        if queue_changed {
            if let Some(ref cb) = self.on_queue_change {
                cb.call0(&JsValue::NULL).ok();
            }
        }
    }
}

/// Default implementation
impl Default for WasmQueueManager {
    fn default() -> Self {
        Self::new()
    }
}

fn from_js<T: serde::de::DeserializeOwned>(value: JsValue) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsValue::from_str(&format!("Invalid song: {}", e)))
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> JsValue {
    serde_wasm_bindgen::to_value(value).unwrap_or(JsValue::NULL)
}
