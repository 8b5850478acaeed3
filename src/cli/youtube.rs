use serde_json::Value;

use crate::{
    Error, Result,
    config::Config,
    types::ResourceKind,
    utils,
    youtube::{SearchKind, YouTubeApi},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum YouTubeAction {
    Search {
        kind: SearchKind,
        query: String,
        max_results: u32,
    },
    /// `playlist/<id>` or a bare playlist id.
    TrackList(String),
}

fn playlist_id(value: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(Error::Input("playlist id must not be empty".to_string()));
    }

    if value.contains('/') {
        Ok(utils::parse_resource_path(value, &[ResourceKind::Playlist])?.id)
    } else {
        Ok(value.to_string())
    }
}

pub async fn youtube(config: &Config, action: YouTubeAction) -> Result<Value> {
    match action {
        YouTubeAction::Search {
            kind,
            query,
            max_results,
        } => {
            let api = YouTubeApi::from_config(config)?;
            let results = match kind {
                SearchKind::Video => {
                    serde_json::to_value(api.search_videos(&query, max_results).await?)?
                }
                SearchKind::Playlist => {
                    serde_json::to_value(api.search_playlists(&query, max_results).await?)?
                }
                SearchKind::Channel => {
                    serde_json::to_value(api.search_channels(&query, max_results).await?)?
                }
            };
            Ok(results)
        }
        YouTubeAction::TrackList(value) => {
            let id = playlist_id(&value)?;
            let track_list = YouTubeApi::from_config(config)?.get_track_list(&id).await?;
            Ok(serde_json::to_value(track_list)?)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_playlist_id_forms() {
        assert_eq!(playlist_id("playlist/PL123").unwrap(), "PL123");
        assert_eq!(playlist_id("PL123").unwrap(), "PL123");
        assert_eq!(playlist_id("  PL123 ").unwrap(), "PL123");
        assert!(matches!(playlist_id("album/1"), Err(Error::Input(_))));
    }

    #[test]
    fn test_blank_playlist_id_is_input_error() {
        for value in ["", "   ", "playlist/"] {
            assert!(
                matches!(playlist_id(value), Err(Error::Input(_))),
                "{value:?} should be rejected"
            );
        }
    }
}
