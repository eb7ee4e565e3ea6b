//! Terminal stand-ins for the audio element and the toast area
use rockem_core::{format_time, Notification, Song};
use rockem_playback::{PlaybackEngine, PlaybackError, QueueInfo, Result};
use std::fmt::Write as _;
use std::io::Write;

/// Playback engine that prints what an audio element would be told to do
pub struct ConsoleEngine<W> {
    api_base_url: String,
    out: W,
    loaded: Option<String>,
    preloaded: Option<String>,
}

impl<W: Write> ConsoleEngine<W> {
    pub fn new(api_base_url: impl Into<String>, out: W) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            out,
            loaded: None,
            preloaded: None,
        }
    }

    /// Stream URL of the loaded song
    pub fn loaded(&self) -> Option<&str> {
        self.loaded.as_deref()
    }

    /// Stream URL of the preloaded song
    pub fn preloaded(&self) -> Option<&str> {
        self.preloaded.as_deref()
    }

    pub fn output(&self) -> &W {
        &self.out
    }
}

impl<W: Write> PlaybackEngine for ConsoleEngine<W> {
    fn load(&mut self, song: &Song) -> Result<()> {
        let url = song.file_url(&self.api_base_url);
        tracing::debug!(%url, "Loading song");
        writeln!(self.out, "♪ {}", song).map_err(|e| PlaybackError::engine(e.to_string()))?;
        self.loaded = Some(url);
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        let Some(url) = &self.loaded else {
            return Err(PlaybackError::engine("no song loaded"));
        };
        writeln!(self.out, "▶ {}", url).map_err(|e| PlaybackError::engine(e.to_string()))
    }

    fn pause(&mut self) {
        let _ = writeln!(self.out, "⏸ Paused");
    }

    fn stop(&mut self) {
        if self.loaded.take().is_some() {
            let _ = writeln!(self.out, "⏹ Stopped");
        }
        self.preloaded = None;
    }

    fn preload(&mut self, song: &Song) {
        let url = song.file_url(&self.api_base_url);
        tracing::debug!(%url, "Preloading song");
        self.preloaded = Some(url);
    }
}

/// Prints notifications as `<icon> <message>` lines
pub struct ConsoleNotifier<W> {
    out: W,
}

impl<W: Write> ConsoleNotifier<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn output(&self) -> &W {
        &self.out
    }
}

impl<W: Write> rockem_playback::NotificationSink for ConsoleNotifier<W> {
    fn notify(&mut self, notification: Notification) {
        if writeln!(self.out, "{}", notification).is_err() {
            tracing::warn!(message = %notification.message, "Could not show notification");
        }
    }
}

/// Queue panel as text
///
/// ```text
/// Queue (3 songs)  🔀 on  🔁 all
/// ▶  1. Thunderstruck - AC/DC  4:52
///    2. Paranoid - Black Sabbath
/// ```
///
/// Row numbers are active-queue positions (what `play N` takes); the
/// bracketed number on shuffled rows is the canonical position `remove N` takes.
pub fn render_queue(info: &QueueInfo) -> String {
    if info.active.is_empty() {
        return "Queue is empty\nAdd songs to your queue to see them here\n".to_string();
    }

    let mut text = String::new();
    let _ = writeln!(
        text,
        "{}  🔀 {}  {} {}",
        info.button_title(),
        if info.shuffle_mode { "on" } else { "off" },
        info.repeat_mode.icon(),
        info.repeat_mode
    );

    for entry in &info.active {
        let marker = if entry.is_current { "▶" } else { " " };
        let _ = write!(text, "{} {:>2}. {}", marker, entry.position + 1, entry.song);
        if let Some(duration) = entry.song.duration {
            let _ = write!(text, "  {}", format_time(duration.as_secs_f64()));
        }
        if info.shuffle_mode {
            let _ = write!(text, "  [{}]", entry.canonical_index + 1);
        }
        text.push('\n');
    }
    text
}

/// Now-playing line with artwork URL
pub fn render_now_playing(song: &Song, api_base_url: &str) -> String {
    let duration = song
        .duration
        .map(|d| format_time(d.as_secs_f64()))
        .unwrap_or_else(|| format_time(f64::NAN));
    format!(
        "{}  [{}]\n  artwork: {}\n",
        song,
        duration,
        song.image_url(api_base_url)
    )
}

/// Library listing with 1-based numbers for `add`/`addnext`
pub fn render_library(songs: &[Song]) -> String {
    if songs.is_empty() {
        return "Library is empty\n".to_string();
    }

    let mut text = String::new();
    for (index, song) in songs.iter().enumerate() {
        let _ = writeln!(text, "{:>3}. {}", index + 1, song);
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use rockem_playback::{NotificationSink, QueueManager, RepeatMode};
    use std::time::Duration;

    const API: &str = "http://localhost:8000/api/v1";

    fn song(id: &str, title: &str) -> Song {
        Song::new(id, title, "Artist")
    }

    #[test]
    fn engine_loads_stream_url() {
        let mut engine = ConsoleEngine::new(API, Vec::new());
        engine.load(&song("4", "Song")).unwrap();
        engine.play().unwrap();

        assert_eq!(engine.loaded(), Some("http://localhost:8000/api/v1/songs/4/file"));
        let out = String::from_utf8(engine.output().clone()).unwrap();
        assert!(out.contains("♪ Song - Artist"));
        assert!(out.contains("▶ http://localhost:8000/api/v1/songs/4/file"));
    }

    #[test]
    fn engine_refuses_play_without_song() {
        let mut engine = ConsoleEngine::new(API, Vec::new());
        assert!(engine.play().is_err());
    }

    #[test]
    fn notifier_prints_icon_and_message() {
        let mut notifier = ConsoleNotifier::new(Vec::new());
        notifier.notify(Notification::info("Shuffle enabled"));

        let out = String::from_utf8(notifier.output().clone()).unwrap();
        assert_eq!(out, "ℹ️ Shuffle enabled\n");
    }

    #[test]
    fn empty_queue_panel() {
        let info = QueueManager::default().get_queue_info();
        assert!(render_queue(&info).starts_with("Queue is empty"));
    }

    #[test]
    fn queue_panel_marks_current_row() {
        let mut queue = QueueManager::default();
        queue.add_to_queue(vec![
            song("1", "First").with_duration(Duration::from_secs(292)),
            song("2", "Second"),
        ]);
        queue.set_current_index(1);
        queue.set_repeat(RepeatMode::All);

        let text = render_queue(&queue.get_queue_info());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Queue (2 songs)  🔀 off  🔁 all");
        assert_eq!(lines[1], "   1. First - Artist  4:52");
        assert_eq!(lines[2], "▶  2. Second - Artist");
    }

    #[test]
    fn now_playing_uses_fallback_artwork() {
        let text = render_now_playing(&song("1", "First"), API);
        assert!(text.starts_with("First - Artist  [0:00]"));
        assert!(text.contains("assets/songs/ontheway.png"));
    }

    #[test]
    fn library_is_numbered_from_one() {
        let text = render_library(&[song("1", "First"), song("2", "Second")]);
        assert_eq!(text, "  1. First - Artist\n  2. Second - Artist\n");
    }
}
