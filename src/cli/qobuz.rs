use serde_json::Value;

use crate::{
    Result,
    config::Config,
    qobuz::{QobuzApi, SearchKind, TRACK_LIST_KINDS},
    utils,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QobuzAction {
    Search(SearchKind, String),
    Details(String),
    Stream { track_id: String, format_id: u32 },
    AlbumList(String),
    /// `album/<id>`, `playlist/<id>` or `artist/<id>`.
    TrackList(String),
}

pub async fn qobuz(config: &Config, action: QobuzAction) -> Result<Value> {
    match action {
        QobuzAction::Search(kind, query) => {
            QobuzApi::from_config(config)?
                .search(kind, &query)
                .await
        }
        QobuzAction::Details(id) => QobuzApi::from_config(config)?.get_track(&id).await,
        QobuzAction::Stream {
            track_id,
            format_id,
        } => {
            QobuzApi::from_config(config)?
                .get_stream(&track_id, format_id)
                .await
        }
        QobuzAction::AlbumList(artist_id) => {
            QobuzApi::from_config(config)?
                .get_album_list(&artist_id)
                .await
        }
        QobuzAction::TrackList(value) => {
            let resource = utils::parse_resource_path(&value, TRACK_LIST_KINDS)?;
            QobuzApi::from_config(config)?
                .get_track_list(&resource)
                .await
        }
    }
}
