//! Qobuz API client.
//!
//! Every call carries the application id as `app_id` and the user's session
//! token in the `X-User-Auth-Token` header. Both come from configuration
//! (`QOBUZ_APP_ID`, `QOBUZ_USER_AUTH_TOKEN`).

use reqwest::Client;
use serde_json::Value;

use crate::{
    Error, Result,
    client::decode_json,
    config::Config,
    types::{ResourceKind, ResourcePath},
};

pub const API_URL: &str = "https://www.qobuz.com/api.json/0.2";

pub const DEFAULT_FORMAT_ID: u32 = 27;

pub const TRACK_LIST_KINDS: &[ResourceKind] = &[
    ResourceKind::Album,
    ResourceKind::Playlist,
    ResourceKind::Artist,
];

const SEARCH_LIMIT: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKind {
    Track,
    Artist,
    Album,
    Playlist,
}

impl SearchKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchKind::Track => "track",
            SearchKind::Artist => "artist",
            SearchKind::Album => "album",
            SearchKind::Playlist => "playlist",
        }
    }
}

pub struct QobuzApi {
    http: Client,
    api_url: String,
    app_id: String,
    user_auth_token: String,
}

impl QobuzApi {
    pub fn new(api_url: String, app_id: String, user_auth_token: String) -> Self {
        Self {
            http: Client::new(),
            api_url,
            app_id,
            user_auth_token,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(
            config.get_or("QOBUZ_API_URL", API_URL),
            config.require("QOBUZ_APP_ID")?,
            config.require("QOBUZ_USER_AUTH_TOKEN")?,
        ))
    }

    async fn get(&self, endpoint: &str, query: &[(&str, String)]) -> Result<Value> {
        let url = format!("{}/{}", self.api_url.trim_end_matches('/'), endpoint);
        tracing::debug!(service = "qobuz", %url, "sending request");

        let res = self
            .http
            .get(&url)
            .header("X-User-Auth-Token", &self.user_auth_token)
            .query(&[("app_id", self.app_id.as_str())])
            .query(query)
            .send()
            .await?;

        decode_json(res).await
    }

    pub async fn search(&self, kind: SearchKind, query: &str) -> Result<Value> {
        self.get(
            &format!("{}/search", kind.as_str()),
            &[
                ("query", query.to_string()),
                ("limit", SEARCH_LIMIT.to_string()),
            ],
        )
        .await
    }

    pub async fn get_track(&self, track_id: &str) -> Result<Value> {
        self.get("track/get", &[("track_id", track_id.to_string())])
            .await
    }

    pub async fn get_stream(&self, track_id: &str, format_id: u32) -> Result<Value> {
        self.get(
            "track/getFileUrl",
            &[
                ("track_id", track_id.to_string()),
                ("format_id", format_id.to_string()),
            ],
        )
        .await
    }

    /// The `albums` object of an artist.
    pub async fn get_album_list(&self, artist_id: &str) -> Result<Value> {
        let mut artist = self
            .get("artist/get", &[("artist_id", artist_id.to_string())])
            .await?;

        artist
            .get_mut("albums")
            .map(Value::take)
            .ok_or_else(|| Error::Payload(format!("no albums found for artist {}", artist_id)))
    }

    /// Album and playlist tracks (`tracks.items`), or the whole artist payload
    /// including its albums.
    pub async fn get_track_list(&self, resource: &ResourcePath) -> Result<Value> {
        let id = resource.id.clone();
        let mut entity = match resource.kind {
            ResourceKind::Album => self.get("album/get", &[("album_id", id)]).await?,
            ResourceKind::Playlist => {
                self.get(
                    "playlist/get",
                    &[("playlist_id", id), ("extra", "tracks".to_string())],
                )
                .await?
            }
            ResourceKind::Artist => {
                return self
                    .get(
                        "artist/get",
                        &[("artist_id", id), ("extra", "albums".to_string())],
                    )
                    .await;
            }
        };

        entity
            .pointer_mut("/tracks/items")
            .map(Value::take)
            .ok_or_else(|| {
                Error::Payload(format!(
                    "no tracks found for {} {}",
                    resource.kind, resource.id
                ))
            })
    }
}
