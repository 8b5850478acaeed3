//! Deezer public API client.
//!
//! Deezer needs no authentication for catalog reads. It does report many
//! failures (unknown ids, quota) as HTTP 200 with an `error` object, which is
//! turned into [`Error::Upstream`] here so callers see one failure shape.

use reqwest::{Client, StatusCode};
use serde_json::Value;

use crate::{
    Error, Result,
    client::decode_json,
    config::Config,
    types::{ResourceKind, ResourcePath, TrackList},
};

pub const API_URL: &str = "https://api.deezer.com";

/// Resource kinds accepted by `--get-track-list`.
pub const TRACK_LIST_KINDS: &[ResourceKind] = &[ResourceKind::Album, ResourceKind::Playlist];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKind {
    Track,
    Album,
    Artist,
    Playlist,
}

impl SearchKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchKind::Track => "track",
            SearchKind::Album => "album",
            SearchKind::Artist => "artist",
            SearchKind::Playlist => "playlist",
        }
    }
}

pub struct DeezerApi {
    http: Client,
    api_url: String,
}

impl DeezerApi {
    pub fn new(api_url: String) -> Self {
        Self {
            http: Client::new(),
            api_url,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.get_or("DEEZER_API_URL", API_URL))
    }

    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Value> {
        let url = format!("{}/{}", self.api_url.trim_end_matches('/'), path);
        tracing::debug!(service = "deezer", %url, "sending request");

        let res = self.http.get(&url).query(query).send().await?;
        let value = decode_json(res).await?;

        if let Some(error) = value.get("error") {
            return Err(Error::Upstream {
                status: StatusCode::OK,
                body: error.to_string(),
            });
        }
        Ok(value)
    }

    /// Searches the catalog and returns the `data` array unchanged.
    pub async fn search(&self, kind: SearchKind, query: &str) -> Result<Value> {
        let mut value = self
            .get(&format!("search/{}", kind.as_str()), &[("q", query.to_string())])
            .await?;

        take_data(&mut value)
    }

    pub async fn get_track(&self, track_id: &str) -> Result<Value> {
        self.get(&format!("track/{}", track_id), &[]).await
    }

    /// Album or playlist metadata plus its full track array.
    pub async fn get_track_list(&self, resource: &ResourcePath) -> Result<TrackList> {
        let kind = resource.kind;
        let details = self
            .get(&format!("{}/{}", kind, resource.id), &[])
            .await?;
        let mut tracks = self
            .get(&format!("{}/{}/tracks", kind, resource.id), &[])
            .await?;

        let tracks = match take_data(&mut tracks)? {
            Value::Array(items) => items,
            other => {
                return Err(Error::Payload(format!(
                    "expected track array for {} {}, got {}",
                    kind, resource.id, other
                )));
            }
        };

        let artist = match kind {
            ResourceKind::Album => details
                .pointer("/artist/name")
                .and_then(Value::as_str)
                .unwrap_or("Unknown Artist")
                .to_string(),
            _ => "N/A".to_string(),
        };

        Ok(TrackList {
            kind: kind.to_string(),
            id: resource.id.clone(),
            name: string_field(&details, "title", "Unknown Title"),
            artist,
            release_date: string_field(&details, "release_date", "Unknown Date"),
            total_tracks: tracks.len(),
            tracks,
        })
    }
}

fn take_data(value: &mut Value) -> Result<Value> {
    value
        .get_mut("data")
        .map(Value::take)
        .ok_or_else(|| Error::Payload("response has no 'data' field".to_string()))
}

fn string_field(value: &Value, key: &str, default: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or(default)
        .to_string()
}
