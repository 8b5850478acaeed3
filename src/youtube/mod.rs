//! # YouTube Data API Module
//!
//! Search and playlist inspection against the YouTube Data API v3. The API
//! authenticates with a plain key (`YOUTUBE_API_KEY`) sent as the `key` query
//! parameter on every call, so there is no token lifecycle here.
//!
//! ## Reshaping
//!
//! Search responses are flattened into [`VideoResult`], [`PlaylistResult`] and
//! [`ChannelResult`] rows carrying only the title, owner, thumbnail and a
//! browsable URL. Playlist track listings are assembled from two endpoints:
//!
//! 1. `playlistItems` pages (50 items each, following `nextPageToken`) give
//!    the ordered video ids, titles and owners
//! 2. `videos` batches (at most 50 ids per call) give each video's ISO-8601
//!    duration, which is converted to seconds
//!
//! Durations are matched back to tracks by video id. Videos the API no longer
//! returns (deleted or private) keep a duration of zero.

mod playlist;

use reqwest::Client;
use serde_json::Value;

use crate::{
    Result,
    client::decode_json,
    config::Config,
    types::{ChannelResult, PlaylistResult, VideoResult},
};

pub const API_URL: &str = "https://www.googleapis.com/youtube/v3";

pub const DEFAULT_MAX_RESULTS: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SearchKind {
    Video,
    Playlist,
    Channel,
}

impl SearchKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchKind::Video => "video",
            SearchKind::Playlist => "playlist",
            SearchKind::Channel => "channel",
        }
    }
}

pub struct YouTubeApi {
    http: Client,
    api_url: String,
    api_key: String,
}

impl YouTubeApi {
    pub fn new(api_url: String, api_key: String) -> Self {
        Self {
            http: Client::new(),
            api_url,
            api_key,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(
            config.get_or("YOUTUBE_API_URL", API_URL),
            config.require("YOUTUBE_API_KEY")?,
        ))
    }

    async fn get(&self, endpoint: &str, query: &[(&str, String)]) -> Result<Value> {
        let url = format!("{}/{}", self.api_url.trim_end_matches('/'), endpoint);
        tracing::debug!(service = "youtube", %url, "sending request");

        let res = self
            .http
            .get(&url)
            .query(query)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await?;

        decode_json(res).await
    }

    async fn search(&self, kind: SearchKind, query: &str, max_results: u32) -> Result<Value> {
        self.get(
            "search",
            &[
                ("q", query.to_string()),
                ("part", "snippet".to_string()),
                ("type", kind.as_str().to_string()),
                ("maxResults", max_results.to_string()),
            ],
        )
        .await
    }

    pub async fn search_videos(&self, query: &str, max_results: u32) -> Result<Vec<VideoResult>> {
        let response = self.search(SearchKind::Video, query, max_results).await?;
        Ok(videos_from_search(&response))
    }

    pub async fn search_playlists(
        &self,
        query: &str,
        max_results: u32,
    ) -> Result<Vec<PlaylistResult>> {
        let response = self.search(SearchKind::Playlist, query, max_results).await?;
        Ok(playlists_from_search(&response))
    }

    pub async fn search_channels(
        &self,
        query: &str,
        max_results: u32,
    ) -> Result<Vec<ChannelResult>> {
        let response = self.search(SearchKind::Channel, query, max_results).await?;
        Ok(channels_from_search(&response))
    }
}

fn items(response: &Value) -> impl Iterator<Item = &Value> {
    response
        .get("items")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
}

fn str_at<'a>(value: &'a Value, pointer: &str) -> Option<&'a str> {
    value.pointer(pointer).and_then(Value::as_str)
}

fn owned_at(value: &Value, pointer: &str) -> String {
    str_at(value, pointer).unwrap_or_default().to_string()
}

fn thumbnail(snippet_owner: &Value) -> Option<String> {
    str_at(snippet_owner, "/snippet/thumbnails/medium/url")
        .or_else(|| str_at(snippet_owner, "/snippet/thumbnails/default/url"))
        .map(str::to_string)
}

/// Search results that are actually videos; anything without a `videoId` is
/// skipped.
pub fn videos_from_search(response: &Value) -> Vec<VideoResult> {
    items(response)
        .filter_map(|item| {
            let video_id = str_at(item, "/id/videoId")?;
            Some(VideoResult {
                thumbnail: thumbnail(item),
                title: owned_at(item, "/snippet/title"),
                channel_title: owned_at(item, "/snippet/channelTitle"),
                url: format!("https://www.youtube.com/watch?v={}", video_id),
            })
        })
        .collect()
}

pub fn playlists_from_search(response: &Value) -> Vec<PlaylistResult> {
    items(response)
        .filter_map(|item| {
            let playlist_id = str_at(item, "/id/playlistId")?;
            Some(PlaylistResult {
                thumbnail: thumbnail(item),
                title: owned_at(item, "/snippet/title"),
                channel_title: owned_at(item, "/snippet/channelTitle"),
                url: format!("https://www.youtube.com/playlist?list={}", playlist_id),
                browse_id: playlist_id.to_string(),
            })
        })
        .collect()
}

pub fn channels_from_search(response: &Value) -> Vec<ChannelResult> {
    items(response)
        .filter_map(|item| {
            let channel_id = str_at(item, "/snippet/channelId")?;
            Some(ChannelResult {
                thumbnail: thumbnail(item),
                title: owned_at(item, "/snippet/title"),
                channel_id: channel_id.to_string(),
                url: format!("https://www.youtube.com/channel/{}", channel_id),
                browse_id: channel_id.to_string(),
            })
        })
        .collect()
}
