//! # CLI Module
//!
//! This module provides the command layer of tunescout. Each public function
//! answers one subcommand: it validates the command-line values, builds the
//! one service client the invocation needs from the [`Config`] it is handed,
//! performs the requests and returns the JSON document to print.
//!
//! ## Overview
//!
//! - [`spotify`] - Spotify catalog search and track/album lookup
//! - [`tidal`] - Tidal catalog, search and stream URLs
//! - [`deezer`] - Deezer search, track details and track lists
//! - [`qobuz`] - Qobuz search, details, streams, album and track lists
//! - [`youtube`] - YouTube video/playlist/channel search and playlist tracks
//! - [`apple_music`] - Apple Music (iTunes) search
//!
//! ## Architecture Design
//!
//! ```text
//! main.rs (clap parsing, printing, exit status)
//!     ↓
//! CLI Layer (input validation, client construction)
//!     ↓
//! Service Layer (spotify, tidal, deezer, qobuz, youtube, apple_music)
//!     ↓
//! ApiClient / reqwest
//! ```
//!
//! Command functions never print and never exit. They return
//! [`crate::Result`] so the binary can report exactly one JSON document:
//! either the result or an `{"error": ..., "kind": ...}` object.
//!
//! ## Input Validation
//!
//! Values such as `--get-track-list album/123` are parsed before any client
//! is built, so malformed input is reported as [`crate::Error::Input`] even
//! when no credentials are configured.
//!
//! ## Usage Patterns
//!
//! ```bash
//! tunescout spotify --search-track "daft punk"
//! tunescout tidal --get-track-list https://tidal.com/browse/album/77646164
//! tunescout deezer --get-track-list album/302127
//! tunescout qobuz --get-stream 5966783 --format-id 6
//! tunescout youtube --get-track-list playlist/PLx0sYbCqOb8TBPRdmBHs5Iftvv9TPboYG
//! tunescout apple-music "one more time" --media-type track
//! ```

mod apple_music;
mod deezer;
mod qobuz;
mod spotify;
mod tidal;
mod youtube;

pub use apple_music::apple_music;
pub use deezer::{DeezerAction, deezer};
pub use qobuz::{QobuzAction, qobuz};
pub use spotify::{SpotifyAction, spotify};
pub use tidal::{TidalAction, tidal};
pub use youtube::{YouTubeAction, youtube};

use serde_json::Value;

use crate::{Error, Result};

/// Formats a command result the way it is printed: indented JSON.
pub fn render(value: &Value) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Formats a failure as the indented `{"error": ..., "kind": ...}` object.
pub fn render_error(err: &Error) -> String {
    serde_json::to_string_pretty(&err.to_json())
        .unwrap_or_else(|_| format!("{{\"error\": \"{}\"}}", err.kind()))
}
