//! Tidal OpenAPI client.
//!
//! Catalog lookups go through the v2 JSON:API endpoints, search through the
//! older `openapi.tidal.com/search` endpoint and stream URLs through the
//! legacy `api.tidal.com/v1` API. All three share one client-credentials
//! token; stream URLs may instead use a user token supplied on the command
//! line.

mod catalog;
mod search;

pub use catalog::album_id_from_reference;
pub use search::SearchKind;

use crate::{Result, client::ApiClient, config::Config, types::ServiceProfile};

pub const API_URL: &str = "https://openapi.tidal.com/v2";
pub const TOKEN_URL: &str = "https://auth.tidal.com/v1/oauth2/token";
pub const SEARCH_URL: &str = "https://openapi.tidal.com/search";
pub const STREAM_URL: &str = "https://api.tidal.com/v1";

pub const DEFAULT_COUNTRY_CODE: &str = "US";

pub fn profile(config: &Config) -> ServiceProfile {
    ServiceProfile {
        name: "tidal",
        token_url: config.get_or("TIDAL_TOKEN_URL", TOKEN_URL),
        api_url: config.get_or("TIDAL_API_URL", API_URL),
        accept: "application/vnd.api+json",
        client_id_key: "TIDAL_CLIENT_ID",
        client_secret_key: "TIDAL_CLIENT_SECRET",
    }
}

pub struct TidalApi {
    client: ApiClient,
    search_url: String,
    stream_url: String,
}

impl TidalApi {
    pub fn new(client: ApiClient, search_url: String, stream_url: String) -> Self {
        Self {
            client,
            search_url,
            stream_url,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let client = ApiClient::from_config(profile(config), config)?;
        Ok(Self::new(
            client,
            config.get_or("TIDAL_SEARCH_URL", SEARCH_URL),
            config.get_or("TIDAL_STREAM_URL", STREAM_URL),
        ))
    }
}
