//! Interactive commands
//!
//! Positions typed by the user are 1-based, as shown in the listings; they are
//! converted to 0-based indices here.

use crate::error::{CliError, Result};
use std::str::FromStr;

/// One line of player input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Play the current song, or jump to a queue position and play it
    Play(Option<usize>),
    /// Play/pause
    Toggle,
    /// Skip forward
    Next,
    /// Skip back
    Previous,
    /// Pretend the current song finished
    Ended,
    /// Stop playback
    Stop,
    /// Toggle shuffle
    Shuffle,
    /// Cycle repeat mode
    Repeat,
    /// Append a library song to the queue
    Add(usize),
    /// Queue a library song to play next
    AddNext(usize),
    /// Remove a song from the queue (canonical position)
    Remove(usize),
    /// Empty the queue
    Clear,
    /// Show the queue panel
    Queue,
    /// Show the song library
    Library,
    /// Show the current song
    Now,
    /// Dump the queue snapshot as JSON
    Info,
    /// List commands
    Help,
    /// Leave the player
    Quit,
}

/// Help text for the interactive prompt
pub const HELP: &str = "\
Commands:
  play [N]      play the current song, or queue position N
  pause         play/pause
  next, prev    skip forward / back
  end           finish the current song
  stop          stop playback
  shuffle       toggle shuffle
  repeat        cycle repeat mode (off, one, all)
  add N         append library song N to the queue
  addnext N     play library song N next
  remove N      remove queue song N
  clear         empty the queue
  queue         show the queue
  library       show the song library
  now           show the current song
  info          print the queue state as JSON
  help          show this help
  quit          exit";

impl FromStr for Command {
    type Err = CliError;

    fn from_str(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Err(CliError::command("empty input"));
        };
        let arg = words.next();
        if let Some(extra) = words.next() {
            return Err(CliError::command(format!("unexpected argument {:?}", extra)));
        }

        let command = match name.to_ascii_lowercase().as_str() {
            "play" => Command::Play(arg.map(position).transpose()?),
            "pause" | "toggle" | "p" => Command::Toggle,
            "next" | "n" => Command::Next,
            "prev" | "previous" => Command::Previous,
            "end" | "ended" => Command::Ended,
            "stop" => Command::Stop,
            "shuffle" => Command::Shuffle,
            "repeat" => Command::Repeat,
            "add" => Command::Add(required(name, arg)?),
            "addnext" => Command::AddNext(required(name, arg)?),
            "remove" | "rm" => Command::Remove(required(name, arg)?),
            "clear" => Command::Clear,
            "queue" | "q" => Command::Queue,
            "library" | "ls" => Command::Library,
            "now" => Command::Now,
            "info" => Command::Info,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(CliError::command(format!("unknown command {:?}", other))),
        };

        let takes_arg = matches!(
            command,
            Command::Play(_) | Command::Add(_) | Command::AddNext(_) | Command::Remove(_)
        );
        if !takes_arg {
            if let Some(arg) = arg {
                return Err(CliError::command(format!("unexpected argument {:?}", arg)));
            }
        }

        Ok(command)
    }
}

fn required(name: &str, arg: Option<&str>) -> Result<usize> {
    let arg = arg.ok_or_else(|| CliError::command(format!("{} needs a position", name)))?;
    position(arg)
}

fn position(arg: &str) -> Result<usize> {
    match arg.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(CliError::command(format!(
            "position must be a number from 1, got {:?}",
            arg
        ))),
    }
}
