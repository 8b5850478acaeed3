use reqwest::Method;
use serde_json::Value;

use crate::Result;

use super::TidalApi;

const SEARCH_ACCEPT: &str = "application/vnd.tidal.v1+json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKind {
    Tracks,
    Albums,
    Artists,
    Playlists,
    Videos,
}

impl SearchKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchKind::Tracks => "TRACKS",
            SearchKind::Albums => "ALBUMS",
            SearchKind::Artists => "ARTISTS",
            SearchKind::Playlists => "PLAYLISTS",
            SearchKind::Videos => "VIDEOS",
        }
    }
}

impl TidalApi {
    pub async fn search(
        &mut self,
        kind: SearchKind,
        query: &str,
        country_code: &str,
        limit: u32,
    ) -> Result<Value> {
        let params = [
            ("query", query.to_string()),
            ("type", kind.as_str().to_string()),
            ("offset", "0".to_string()),
            ("limit", limit.to_string()),
            ("countryCode", country_code.to_string()),
            ("popularity", "WORLDWIDE".to_string()),
        ];
        let url = self.search_url.clone();
        self.client
            .request_with_accept(Method::GET, &url, &params, SEARCH_ACCEPT)
            .await
    }
}
