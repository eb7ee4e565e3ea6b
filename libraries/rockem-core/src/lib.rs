//! Rock 'em All Core
//!
//! Shared domain types, error handling, and display helpers for the Rock 'em All
//! music player.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Song`, `SongId`, and the wire-level `SongRecord`
//! - **Notifications**: transient user-facing status messages
//! - **Error Handling**: Unified `RockemError` and `Result` types
//!
//! Song records arriving from the API are decoded into `SongRecord` and validated
//! into `Song` before anything else in the workspace touches them.
//!
//! # Example
//!
//! ```rust
//! use rockem_core::{songs_from_json, format_time};
//!
//! let songs = songs_from_json(
//!     r#"[{"id": 7, "title": "On The Way", "artist": "Ayo", "duration": 201.5}]"#,
//! )
//! .unwrap();
//!
//! assert_eq!(songs[0].id.as_str(), "7");
//! assert_eq!(format_time(201.5), "3:21");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod format;
pub mod notification;
pub mod song;

pub use error::{Result, RockemError};
pub use format::format_time;
pub use notification::{Notification, NotificationLevel};
pub use song::{songs_from_json, Song, SongId, SongRecord, FALLBACK_IMAGE};
