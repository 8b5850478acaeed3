use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Per-service parameters of the token-managed API client.
#[derive(Debug, Clone)]
pub struct ServiceProfile {
    pub name: &'static str,
    pub token_url: String,
    pub api_url: String,
    pub accept: &'static str,
    pub client_id_key: &'static str,
    pub client_secret_key: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Album,
    Playlist,
    Artist,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Album => "album",
            ResourceKind::Playlist => "playlist",
            ResourceKind::Artist => "artist",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "album" => Some(ResourceKind::Album),
            "playlist" => Some(ResourceKind::Playlist),
            "artist" => Some(ResourceKind::Artist),
            _ => None,
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A `<type>/<id>` reference to a remote album, playlist or artist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourcePath {
    pub kind: ResourceKind,
    pub id: String,
}

/// Deezer album or playlist metadata together with its tracks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackList {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: String,
    pub name: String,
    pub artist: String,
    pub release_date: String,
    pub total_tracks: usize,
    pub tracks: Vec<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoResult {
    #[serde(rename = "Thumbnail")]
    pub thumbnail: Option<String>,
    #[serde(rename = "Video Title")]
    pub title: String,
    #[serde(rename = "Channel Title")]
    pub channel_title: String,
    #[serde(rename = "Video URL")]
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistResult {
    #[serde(rename = "Thumbnail")]
    pub thumbnail: Option<String>,
    #[serde(rename = "Playlist Title")]
    pub title: String,
    #[serde(rename = "Channel Title")]
    pub channel_title: String,
    #[serde(rename = "Playlist URL")]
    pub url: String,
    #[serde(rename = "BrowseId")]
    pub browse_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelResult {
    #[serde(rename = "Thumbnail")]
    pub thumbnail: Option<String>,
    #[serde(rename = "Channel Title")]
    pub title: String,
    #[serde(rename = "Channel ID")]
    pub channel_id: String,
    #[serde(rename = "Channel URL")]
    pub url: String,
    #[serde(rename = "BrowseId")]
    pub browse_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistDetails {
    pub title: String,
    pub artist: String,
    pub release_date: String,
    pub cover_url: Option<String>,
    pub description: String,
    /// Number of items in the playlist.
    pub duration: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistTrack {
    pub id: String,
    pub number: usize,
    pub title: String,
    pub artist: String,
    pub play_url: String,
    pub cover_url: Option<String>,
    /// Length in seconds.
    pub duration: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistTracks {
    #[serde(rename = "Playlist")]
    pub playlist: PlaylistDetails,
    #[serde(rename = "Tracks")]
    pub tracks: Vec<PlaylistTrack>,
}

/// A client identifier and secret pair for the client-credentials grant.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

impl Credentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

/// A bearer token and the instant it stops being valid.
#[derive(Debug, Clone)]
pub struct AccessToken {
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
}

impl AccessToken {
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}

/// Payload returned by an OAuth2 token endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default = "default_expires_in")]
    pub expires_in: u64,
}

fn default_expires_in() -> u64 {
    3600
}
