use serde_json::Value;

use crate::{
    Result,
    config::Config,
    spotify::{SearchKind, SpotifyApi},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpotifyAction {
    Search(SearchKind, String),
    Track(String),
    Album(String),
}

pub async fn spotify(config: &Config, action: SpotifyAction, limit: u32) -> Result<Value> {
    let mut api = SpotifyApi::from_config(config)?;

    match action {
        SpotifyAction::Search(kind, query) => api.search(kind, &query, limit).await,
        SpotifyAction::Track(id) => api.get_track(&id).await,
        SpotifyAction::Album(id) => api.get_album(&id).await,
    }
}
