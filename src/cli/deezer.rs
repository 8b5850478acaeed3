use serde_json::Value;

use crate::{
    Result,
    config::Config,
    deezer::{DeezerApi, SearchKind, TRACK_LIST_KINDS},
    utils,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeezerAction {
    Details(String),
    Search(SearchKind, String),
    /// `album/<id>` or `playlist/<id>`.
    TrackList(String),
}

pub async fn deezer(config: &Config, action: DeezerAction) -> Result<Value> {
    match action {
        DeezerAction::Details(id) => DeezerApi::from_config(config).get_track(&id).await,
        DeezerAction::Search(kind, query) => {
            DeezerApi::from_config(config).search(kind, &query).await
        }
        DeezerAction::TrackList(value) => {
            let resource = utils::parse_resource_path(&value, TRACK_LIST_KINDS)?;
            let track_list = DeezerApi::from_config(config)
                .get_track_list(&resource)
                .await?;
            Ok(serde_json::to_value(track_list)?)
        }
    }
}
