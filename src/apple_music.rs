//! Apple Music catalog search through the public iTunes Search API.

use reqwest::Client;
use serde_json::Value;

use crate::{Error, Result, client::decode_json, config::Config};

pub const API_URL: &str = "https://itunes.apple.com/search";

pub const DEFAULT_LIMIT: u32 = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum MediaType {
    Track,
    Album,
    Artist,
}

impl MediaType {
    /// The iTunes `entity` for this media type.
    pub fn entity(&self) -> &'static str {
        match self {
            MediaType::Track => "song",
            MediaType::Album => "album",
            MediaType::Artist => "musicArtist",
        }
    }
}

pub struct AppleMusicApi {
    http: Client,
    api_url: String,
}

impl AppleMusicApi {
    pub fn new(api_url: String) -> Self {
        Self {
            http: Client::new(),
            api_url,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.get_or("APPLE_MUSIC_API_URL", API_URL))
    }

    /// Returns the `results` array, skipping empty entries.
    pub async fn search(&self, term: &str, media_type: MediaType, limit: u32) -> Result<Value> {
        tracing::debug!(service = "apple-music", url = %self.api_url, term, "sending request");

        let limit = limit.to_string();
        let res = self
            .http
            .get(&self.api_url)
            .query(&[
                ("term", term),
                ("media", "music"),
                ("entity", media_type.entity()),
                ("limit", limit.as_str()),
            ])
            .send()
            .await?;

        let mut value = decode_json(res).await?;
        match value.get_mut("results").map(Value::take) {
            Some(Value::Array(results)) => Ok(Value::Array(
                results
                    .into_iter()
                    .filter(|r| r.as_object().is_some_and(|o| !o.is_empty()))
                    .collect(),
            )),
            _ => Err(Error::Payload(
                "response has no 'results' array".to_string(),
            )),
        }
    }
}
