use reqwest::Method;
use serde_json::Value;

use crate::Result;

use super::SpotifyApi;

/// The `type` values accepted by `GET /search`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKind {
    Track,
    Album,
    Playlist,
    Artist,
    Episode,
    /// Podcasts; Spotify calls them shows.
    Show,
}

impl SearchKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchKind::Track => "track",
            SearchKind::Album => "album",
            SearchKind::Playlist => "playlist",
            SearchKind::Artist => "artist",
            SearchKind::Episode => "episode",
            SearchKind::Show => "show",
        }
    }

    /// Episodes and shows are only returned when a market is given.
    fn needs_market(&self) -> bool {
        matches!(self, SearchKind::Episode | SearchKind::Show)
    }
}

pub(super) fn search_query(
    kind: SearchKind,
    query: &str,
    limit: u32,
) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("q", query.to_string()),
        ("type", kind.as_str().to_string()),
        ("limit", limit.to_string()),
    ];
    if kind.needs_market() {
        params.push(("market", "US".to_string()));
    }
    params
}

impl SpotifyApi {
    /// Searches the catalog and returns Spotify's paging object untouched.
    pub async fn search(&mut self, kind: SearchKind, query: &str, limit: u32) -> Result<Value> {
        let params = search_query(kind, query, limit);
        self.client.request(Method::GET, "search", &params).await
    }
}
