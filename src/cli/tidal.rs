use serde_json::Value;

use crate::{
    Result,
    config::Config,
    tidal::{SearchKind, TidalApi, album_id_from_reference},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TidalAction {
    Track(String),
    Album(String),
    /// An album id or any reference containing `album/<id>`.
    TrackList(String),
    Search(SearchKind, String),
    Stream {
        track_id: String,
        user_token: Option<String>,
    },
}

pub async fn tidal(
    config: &Config,
    action: TidalAction,
    country_code: &str,
    limit: u32,
) -> Result<Value> {
    match action {
        TidalAction::Track(id) => {
            TidalApi::from_config(config)?
                .get_track(&id, country_code)
                .await
        }
        TidalAction::Album(id) => {
            TidalApi::from_config(config)?
                .get_album(&id, country_code)
                .await
        }
        TidalAction::TrackList(reference) => {
            let album_id = album_id_from_reference(&reference)?;
            TidalApi::from_config(config)?
                .get_album(&album_id, country_code)
                .await
        }
        TidalAction::Search(kind, query) => {
            TidalApi::from_config(config)?
                .search(kind, &query, country_code, limit)
                .await
        }
        TidalAction::Stream {
            track_id,
            user_token,
        } => {
            TidalApi::from_config(config)?
                .get_stream_url(&track_id, country_code, user_token.as_deref())
                .await
        }
    }
}
