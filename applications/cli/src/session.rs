//! Interactive player session
use crate::{
    commands::{Command, HELP},
    console::{render_library, render_now_playing, render_queue},
    error::{CliError, Result},
};
use rockem_core::{songs_from_json, Song};
use rockem_playback::{NotificationSink, PlaybackEngine, Player};
use std::io::{BufRead, Write};
use std::path::Path;

/// Read a song list in the backend's JSON format
pub fn load_songs(path: &Path) -> Result<Vec<Song>> {
    let json = std::fs::read_to_string(path)?;
    let songs = songs_from_json(&json)?;
    tracing::info!(count = songs.len(), path = %path.display(), "Loaded song library");
    Ok(songs)
}

/// Line-driven front end over a player
pub struct Session<E, N, W> {
    player: Player<E, N>,
    library: Vec<Song>,
    api_base_url: String,
    out: W,
}

impl<E, N, W> Session<E, N, W>
where
    E: PlaybackEngine,
    N: NotificationSink,
    W: Write,
{
    pub fn new(player: Player<E, N>, library: Vec<Song>, api_base_url: impl Into<String>, out: W) -> Self {
        Self {
            player,
            library,
            api_base_url: api_base_url.into(),
            out,
        }
    }

    pub fn player(&self) -> &Player<E, N> {
        &self.player
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    /// Process input lines until `quit` or end of input
    pub fn run<R: BufRead>(&mut self, input: R) -> Result<()> {
        for line in input.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let command = match line.parse::<Command>() {
                Ok(command) => command,
                Err(err) => {
                    writeln!(self.out, "{} (type 'help')", err)?;
                    continue;
                }
            };

            match self.execute(command) {
                Ok(true) => {}
                Ok(false) => break,
                Err(err @ CliError::Command(_)) => writeln!(self.out, "{}", err)?,
                // Playback failures were already shown through the notifier
                Err(CliError::Playback(err)) => {
                    tracing::warn!(%err, ?command, "Command failed");
                }
                Err(err) => return Err(err),
            }
        }

        self.player.stop();
        Ok(())
    }

    /// Run one command; returns false when the session should end
    pub fn execute(&mut self, command: Command) -> Result<bool> {
        tracing::debug!(?command, "Executing command");

        match command {
            Command::Play(None) => self.player.play_current()?,
            Command::Play(Some(index)) => self.player.play_index(index)?,
            Command::Toggle => self.player.toggle_play()?,
            Command::Next => self.player.next()?,
            Command::Previous => self.player.previous()?,
            Command::Ended => self.player.on_song_ended()?,
            Command::Stop => self.player.stop(),
            Command::Shuffle => {
                self.player.toggle_shuffle();
            }
            Command::Repeat => {
                self.player.toggle_repeat();
            }
            Command::Add(index) => {
                let song = self.library_song(index)?;
                self.player.queue_mut().add_song(song);
                self.player.dispatch_events();
            }
            Command::AddNext(index) => {
                let song = self.library_song(index)?;
                self.player.queue_mut().add_next(song);
                self.player.dispatch_events();
            }
            Command::Remove(index) => {
                match self.player.remove_from_queue(index)? {
                    Some(song) => writeln!(self.out, "Removed {}", song)?,
                    None => writeln!(self.out, "No song at position {}", index + 1)?,
                }
            }
            Command::Clear => {
                self.player.stop();
                self.player.queue_mut().clear_queue();
                self.player.dispatch_events();
            }
            Command::Queue => {
                let info = self.player.queue().get_queue_info();
                write!(self.out, "{}", render_queue(&info))?;
            }
            Command::Library => write!(self.out, "{}", render_library(&self.library))?,
            Command::Now => match self.player.now_playing() {
                Some(song) => write!(self.out, "{}", render_now_playing(song, &self.api_base_url))?,
                None => writeln!(self.out, "Nothing playing")?,
            },
            Command::Info => {
                let info = self.player.queue().get_queue_info();
                writeln!(self.out, "{}", serde_json::to_string_pretty(&info)?)?;
            }
            Command::Help => writeln!(self.out, "{}", HELP)?,
            Command::Quit => return Ok(false),
        }

        Ok(true)
    }

    fn library_song(&self, index: usize) -> Result<Song> {
        self.library.get(index).cloned().ok_or_else(|| {
            CliError::command(format!(
                "library has {} songs, no song {}",
                self.library.len(),
                index + 1
            ))
        })
    }
}
