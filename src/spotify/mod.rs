//! # Spotify Integration Module
//!
//! This module wraps the parts of the Spotify Web API that tunescout exposes:
//! catalog search and track/album lookup. It authenticates as the application
//! itself through the OAuth 2.0 client-credentials grant, so no user login or
//! browser round trip is involved.
//!
//! ## Architecture
//!
//! ```text
//! CLI Layer (cli::spotify_*)
//!          ↓
//! SpotifyApi (search, catalog)
//!          ↓
//! ApiClient (token lifecycle, bearer requests)
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## API Coverage
//!
//! - `GET /search` - Tracks, albums, playlists, artists, episodes and shows
//! - `GET /tracks/{id}` - Track details
//! - `GET /albums/{id}` - Album details with track listing
//!
//! ### Authentication
//! - `POST /api/token` - Client-credentials token exchange
//!
//! ## Configuration Integration
//!
//! - `SPOTIFY_CLIENT_ID` / `SPOTIFY_CLIENT_SECRET` - Application credentials
//! - `SPOTIFY_API_URL` - Web API base URL override
//! - `SPOTIFY_TOKEN_URL` - Token endpoint override
//!
//! ## Usage Patterns
//!
//! ```rust
//! let mut spotify = SpotifyApi::from_config(&config)?;
//! let results = spotify.search(SearchKind::Track, "daft punk", 10).await?;
//! let album = spotify.get_album("4m2880jivSbbyEGAKfITCa").await?;
//! ```

mod catalog;
mod search;

pub use search::SearchKind;

use crate::{Result, client::ApiClient, config::Config, types::ServiceProfile};

pub const API_URL: &str = "https://api.spotify.com/v1";
pub const TOKEN_URL: &str = "https://accounts.spotify.com/api/token";

/// Builds the client profile, honoring URL overrides from the configuration.
pub fn profile(config: &Config) -> ServiceProfile {
    ServiceProfile {
        name: "spotify",
        token_url: config.get_or("SPOTIFY_TOKEN_URL", TOKEN_URL),
        api_url: config.get_or("SPOTIFY_API_URL", API_URL),
        accept: "application/json",
        client_id_key: "SPOTIFY_CLIENT_ID",
        client_secret_key: "SPOTIFY_CLIENT_SECRET",
    }
}

pub struct SpotifyApi {
    client: ApiClient,
}

impl SpotifyApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(ApiClient::from_config(profile(config), config)?))
    }
}
