use std::{collections::HashMap, time::Duration};

use indicatif::{ProgressBar, ProgressStyle};
use serde_json::Value;

use crate::{
    Error, Result,
    types::{PlaylistDetails, PlaylistTrack, PlaylistTracks},
    utils,
};

use super::{YouTubeApi, items, owned_at, str_at, thumbnail};

/// Page size of `playlistItems` and batch size of `videos` lookups; both are
/// the API maximum.
const PAGE_SIZE: usize = 50;

impl YouTubeApi {
    pub async fn get_playlist_details(&self, playlist_id: &str) -> Result<PlaylistDetails> {
        let response = self
            .get(
                "playlists",
                &[
                    ("part", "snippet,contentDetails".to_string()),
                    ("id", playlist_id.to_string()),
                ],
            )
            .await?;

        let item = items(&response)
            .next()
            .ok_or_else(|| Error::Payload(format!("playlist {} not found", playlist_id)))?;

        Ok(PlaylistDetails {
            title: owned_at(item, "/snippet/title"),
            artist: owned_at(item, "/snippet/channelTitle"),
            release_date: owned_at(item, "/snippet/publishedAt"),
            cover_url: thumbnail(item),
            description: owned_at(item, "/snippet/description"),
            duration: item
                .pointer("/contentDetails/itemCount")
                .and_then(Value::as_u64)
                .unwrap_or(0),
        })
    }

    /// Every track of a playlist, numbered from 1, with durations in seconds.
    pub async fn get_playlist_tracks(&self, playlist_id: &str) -> Result<Vec<PlaylistTrack>> {
        let pb = ProgressBar::new_spinner();
        pb.set_message(format!("Fetching playlist {}...", playlist_id));
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_style(
            ProgressStyle::with_template("{spinner:.blue} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
        );

        let result = self.collect_playlist_tracks(playlist_id, &pb).await;
        pb.finish_and_clear();
        result
    }

    async fn collect_playlist_tracks(
        &self,
        playlist_id: &str,
        pb: &ProgressBar,
    ) -> Result<Vec<PlaylistTrack>> {
        let mut tracks: Vec<PlaylistTrack> = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut params = vec![
                ("part", "snippet,contentDetails".to_string()),
                ("playlistId", playlist_id.to_string()),
                ("maxResults", PAGE_SIZE.to_string()),
            ];
            if let Some(token) = &page_token {
                params.push(("pageToken", token.clone()));
            }

            let response = self.get("playlistItems", &params).await?;
            append_tracks(&mut tracks, &response);
            pb.set_message(format!("Fetched {} tracks...", tracks.len()));

            page_token = str_at(&response, "/nextPageToken").map(str::to_string);
            if page_token.is_none() {
                break;
            }
        }

        let mut durations: HashMap<String, u64> = HashMap::new();
        let ids: Vec<&str> = tracks.iter().map(|t| t.id.as_str()).collect();
        for batch in ids.chunks(PAGE_SIZE) {
            pb.set_message(format!(
                "Fetching durations ({}/{})...",
                durations.len(),
                tracks.len()
            ));
            let response = self
                .get(
                    "videos",
                    &[
                        ("part", "contentDetails".to_string()),
                        ("id", batch.join(",")),
                    ],
                )
                .await?;
            durations.extend(durations_by_id(&response));
        }

        for track in &mut tracks {
            track.duration = durations.get(&track.id).copied().unwrap_or(0);
        }
        Ok(tracks)
    }

    /// Playlist details and tracks in one document.
    pub async fn get_track_list(&self, playlist_id: &str) -> Result<PlaylistTracks> {
        let playlist = self.get_playlist_details(playlist_id).await?;
        let tracks = self.get_playlist_tracks(playlist_id).await?;
        Ok(PlaylistTracks { playlist, tracks })
    }
}

/// Converts one `playlistItems` page into tracks, continuing the numbering of
/// `tracks`. Items without a video id are skipped.
pub(super) fn append_tracks(tracks: &mut Vec<PlaylistTrack>, response: &Value) {
    for item in items(response) {
        let Some(video_id) = str_at(item, "/contentDetails/videoId") else {
            continue;
        };

        tracks.push(PlaylistTrack {
            id: video_id.to_string(),
            number: tracks.len() + 1,
            title: str_at(item, "/snippet/title")
                .unwrap_or("Unknown")
                .to_string(),
            artist: str_at(item, "/snippet/videoOwnerChannelTitle")
                .unwrap_or("Unknown")
                .to_string(),
            play_url: format!("https://www.youtube.com/watch?v={}", video_id),
            cover_url: thumbnail(item),
            duration: 0,
        });
    }
}

pub(super) fn durations_by_id(response: &Value) -> HashMap<String, u64> {
    items(response)
        .filter_map(|item| {
            let id = str_at(item, "/id")?;
            let raw = str_at(item, "/contentDetails/duration").unwrap_or("PT0S");
            let seconds = utils::parse_iso8601_duration(raw).unwrap_or_else(|| {
                tracing::warn!(video_id = id, duration = raw, "unparseable video duration");
                0
            });
            Some((id.to_string(), seconds))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_append_tracks_numbers_across_pages() {
        let mut tracks = Vec::new();
        let first = json!({"items": [
            {
                "contentDetails": {"videoId": "a"},
                "snippet": {"title": "One", "videoOwnerChannelTitle": "X"}
            },
            {"contentDetails": {"videoId": "b"}, "snippet": {}}
        ]});
        let second = json!({"items": [
            {"contentDetails": {"videoId": "c"}, "snippet": {"title": "Three"}}
        ]});

        append_tracks(&mut tracks, &first);
        append_tracks(&mut tracks, &second);

        let numbers: Vec<usize> = tracks.iter().map(|t| t.number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert_eq!(tracks[1].title, "Unknown");
        assert_eq!(tracks[1].artist, "Unknown");
        assert_eq!(tracks[2].play_url, "https://www.youtube.com/watch?v=c");
    }

    #[test]
    fn test_durations_by_id() {
        let response = json!({"items": [
            {"id": "a", "contentDetails": {"duration": "PT3M20S"}},
            {"id": "b", "contentDetails": {"duration": "garbage"}},
            {"id": "c", "contentDetails": {}}
        ]});

        let durations = durations_by_id(&response);
        assert_eq!(durations.get("a"), Some(&200));
        assert_eq!(durations.get("b"), Some(&0));
        assert_eq!(durations.get("c"), Some(&0));
    }
}
