//! Song records and the API decoding boundary
//!
//! The backend serves songs as loosely-shaped JSON objects. `SongRecord` mirrors
//! that wire shape; `Song` is the validated value type the rest of the workspace
//! works with. Conversion happens once, at decode time.

use crate::error::{Result, RockemError};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::time::Duration;

/// Image shown for songs without uploaded artwork
pub const FALLBACK_IMAGE: &str = "assets/songs/ontheway.png";

/// Song identifier
///
/// The API uses integer ids, older exports use strings. Both decode into the
/// same textual id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SongId(String);

impl SongId {
    /// Create a new song ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SongId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for SongId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for SongId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl<'de> Deserialize<'de> for SongId {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Int(i64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Int(id) => SongId::from(id),
            RawId::Text(id) => SongId(id),
        })
    }
}

/// Song as served by the API (`SongResponse`)
///
/// Fields the player does not use (album, genre, upload date, ...) are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SongRecord {
    /// Song identifier
    pub id: SongId,

    /// Song title
    pub title: String,

    /// Artist name
    pub artist: String,

    /// Server-side artwork path, if artwork was uploaded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_path: Option<String>,

    /// Duration in seconds, if the server could probe it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
}

/// Validated song
///
/// Never mutated once it enters a queue; queues hold copies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SongRecord", into = "SongRecord")]
pub struct Song {
    /// Song identifier
    pub id: SongId,

    /// Song title
    pub title: String,

    /// Artist name
    pub artist: String,

    /// Server-side artwork path
    pub image_path: Option<String>,

    /// Song duration
    pub duration: Option<Duration>,
}

impl Song {
    /// Create a song with only the required fields
    pub fn new(id: impl Into<SongId>, title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            artist: artist.into(),
            image_path: None,
            duration: None,
        }
    }

    /// Set the duration
    #[must_use]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    /// Set the artwork path
    #[must_use]
    pub fn with_image_path(mut self, path: impl Into<String>) -> Self {
        self.image_path = Some(path.into());
        self
    }

    /// Streaming URL for the audio file
    pub fn file_url(&self, api_base: &str) -> String {
        format!("{}/songs/{}/file", api_base.trim_end_matches('/'), self.id)
    }

    /// Artwork URL, or the bundled fallback image when the song has none
    pub fn image_url(&self, api_base: &str) -> String {
        if self.image_path.is_some() {
            format!("{}/songs/{}/image", api_base.trim_end_matches('/'), self.id)
        } else {
            FALLBACK_IMAGE.to_string()
        }
    }
}

impl fmt::Display for Song {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.title, self.artist)
    }
}

impl TryFrom<SongRecord> for Song {
    type Error = RockemError;

    fn try_from(record: SongRecord) -> Result<Self> {
        if record.id.as_str().trim().is_empty() {
            return Err(RockemError::invalid_song(record.id.as_str(), "id is empty"));
        }

        let title = record.title.trim();
        if title.is_empty() {
            return Err(RockemError::invalid_song(record.id.as_str(), "title is empty"));
        }

        let artist = record.artist.trim();
        if artist.is_empty() {
            return Err(RockemError::invalid_song(record.id.as_str(), "artist is empty"));
        }

        let duration = match record.duration {
            None => None,
            Some(secs) => Some(Duration::try_from_secs_f64(secs).map_err(|_| {
                RockemError::invalid_song(record.id.as_str(), format!("invalid duration {}", secs))
            })?),
        };

        Ok(Self {
            title: title.to_string(),
            artist: artist.to_string(),
            id: record.id,
            image_path: record.image_path.filter(|p| !p.is_empty()),
            duration,
        })
    }
}

impl From<Song> for SongRecord {
    fn from(song: Song) -> Self {
        Self {
            id: song.id,
            title: song.title,
            artist: song.artist,
            image_path: song.image_path,
            duration: song.duration.map(|d| d.as_secs_f64()),
        }
    }
}

/// Decode a JSON array of API song records
///
/// Fails on the first record that does not validate.
pub fn songs_from_json(json: &str) -> Result<Vec<Song>> {
    let records: Vec<SongRecord> = serde_json::from_str(json)?;
    records.into_iter().map(Song::try_from).collect()
}
