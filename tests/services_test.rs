mod common;

use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use axum::{
    Json, Router,
    extract::{Path, Query},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
};
use serde_json::{Value, json};
use tunescout::{
    Error,
    apple_music::MediaType,
    cli::{self, DeezerAction, QobuzAction, SpotifyAction, TidalAction, YouTubeAction},
    config::Config,
    deezer, spotify, tidal, youtube,
};

type Params = Query<HashMap<String, String>>;

fn token_route() -> Router {
    Router::new().route(
        "/token",
        post(|| async { Json(json!({"access_token": "tok", "expires_in": 3600})) }),
    )
}

#[tokio::test]
async fn test_deezer_search_prints_data_array() {
    let router = Router::new().route(
        "/search/track",
        get(|Query(params): Params| async move {
            assert_eq!(params.get("q").map(String::as_str), Some("daft punk"));
            Json(json!({"data": [{"id": 1, "title": "One More Time"}], "total": 1}))
        }),
    );
    let base = common::spawn(router).await;
    let config = Config::from_values([("DEEZER_API_URL", base)]);

    let value = cli::deezer(
        &config,
        DeezerAction::Search(deezer::SearchKind::Track, "daft punk".to_string()),
    )
    .await
    .unwrap();

    let expected = json!([{"id": 1, "title": "One More Time"}]);
    assert_eq!(
        cli::render(&value).unwrap(),
        serde_json::to_string_pretty(&expected).unwrap()
    );
}

#[tokio::test]
async fn test_deezer_track_list_reshapes_album() {
    let router = Router::new()
        .route(
            "/album/{id}",
            get(|Path(id): Path<String>| async move {
                Json(json!({
                    "id": id,
                    "title": "Discovery",
                    "release_date": "2001-03-12",
                    "artist": {"name": "Daft Punk"}
                }))
            }),
        )
        .route(
            "/album/{id}/tracks",
            get(|| async {
                Json(json!({"data": [
                    {"id": 1, "title": "One More Time"},
                    {"id": 2, "title": "Aerodynamic"}
                ]}))
            }),
        );
    let base = common::spawn(router).await;
    let config = Config::from_values([("DEEZER_API_URL", base)]);

    let value = cli::deezer(&config, DeezerAction::TrackList("album/302127".to_string()))
        .await
        .unwrap();

    assert_eq!(value["type"], "album");
    assert_eq!(value["id"], "302127");
    assert_eq!(value["name"], "Discovery");
    assert_eq!(value["artist"], "Daft Punk");
    assert_eq!(value["release_date"], "2001-03-12");
    assert_eq!(value["total_tracks"], 2);
    assert_eq!(value["tracks"][1]["title"], "Aerodynamic");
}

#[tokio::test]
async fn test_deezer_playlist_defaults() {
    let router = Router::new()
        .route("/playlist/{id}", get(|| async { Json(json!({"id": 9})) }))
        .route(
            "/playlist/{id}/tracks",
            get(|| async { Json(json!({"data": []})) }),
        );
    let base = common::spawn(router).await;
    let config = Config::from_values([("DEEZER_API_URL", base)]);

    let value = cli::deezer(&config, DeezerAction::TrackList("playlist/9".to_string()))
        .await
        .unwrap();

    assert_eq!(value["name"], "Unknown Title");
    assert_eq!(value["artist"], "N/A");
    assert_eq!(value["release_date"], "Unknown Date");
    assert_eq!(value["total_tracks"], 0);
}

#[tokio::test]
async fn test_deezer_error_object_is_upstream_error() {
    let router = Router::new().route(
        "/track/{id}",
        get(|| async {
            Json(json!({"error": {"type": "DataException", "message": "no data", "code": 800}}))
        }),
    );
    let base = common::spawn(router).await;
    let config = Config::from_values([("DEEZER_API_URL", base)]);

    let result = cli::deezer(&config, DeezerAction::Details("0".to_string())).await;
    match result {
        Err(Error::Upstream { body, .. }) => assert!(body.contains("DataException")),
        other => panic!("expected upstream error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_deezer_rejects_artist_track_list_before_any_request() {
    let config = Config::from_values([("DEEZER_API_URL", "http://127.0.0.1:1")]);

    let result = cli::deezer(&config, DeezerAction::TrackList("artist/27".to_string())).await;
    assert!(matches!(result, Err(Error::Input(_))));
}

#[tokio::test]
async fn test_qobuz_sends_app_id_and_user_token() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let router = Router::new().route(
        "/album/get",
        get(move |headers: HeaderMap, Query(params): Params| {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                let user_token = headers
                    .get("X-User-Auth-Token")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default();
                let app_id = params.get("app_id").map(String::as_str);
                if user_token != "user-token" || app_id != Some("app-1") {
                    return (StatusCode::UNAUTHORIZED, Json(json!({"message": "denied"})));
                }
                assert_eq!(params.get("album_id").map(String::as_str), Some("42"));
                (
                    StatusCode::OK,
                    Json(json!({
                        "id": "42",
                        "tracks": {"items": [{"id": 7, "title": "Veridis Quo"}]}
                    })),
                )
            }
        }),
    );
    let base = common::spawn(router).await;
    let config = Config::from_values([
        ("QOBUZ_API_URL", base.as_str()),
        ("QOBUZ_APP_ID", "app-1"),
        ("QOBUZ_USER_AUTH_TOKEN", "user-token"),
    ]);

    let value = cli::qobuz(&config, QobuzAction::TrackList("album/42".to_string()))
        .await
        .unwrap();

    assert_eq!(value, json!([{"id": 7, "title": "Veridis Quo"}]));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_qobuz_stream_passes_format_id() {
    let router = Router::new().route(
        "/track/getFileUrl",
        get(|Query(params): Params| async move {
            Json(json!({
                "track_id": params.get("track_id"),
                "format_id": params.get("format_id"),
                "url": "https://streaming.example/file.flac"
            }))
        }),
    );
    let base = common::spawn(router).await;
    let config = Config::from_values([
        ("QOBUZ_API_URL", base.as_str()),
        ("QOBUZ_APP_ID", "app-1"),
        ("QOBUZ_USER_AUTH_TOKEN", "user-token"),
    ]);

    let value = cli::qobuz(
        &config,
        QobuzAction::Stream {
            track_id: "5966783".to_string(),
            format_id: 6,
        },
    )
    .await
    .unwrap();

    assert_eq!(value["track_id"], "5966783");
    assert_eq!(value["format_id"], "6");
}

#[tokio::test]
async fn test_tidal_album_gains_artist_name() {
    let router = token_route()
        .route(
            "/v2/albums/{id}",
            get(|Query(params): Params| async move {
                assert_eq!(params.get("include").map(String::as_str), Some("items"));
                Json(json!({"id": "77646164", "title": "Random Access Memories", "artistId": 8847}))
            }),
        )
        .route(
            "/v2/artists/{id}",
            get(|Path(id): Path<String>| async move {
                assert_eq!(id, "8847");
                Json(json!({"id": id, "name": "Daft Punk"}))
            }),
        );
    let base = common::spawn(router).await;
    let config = Config::from_values([
        ("TIDAL_TOKEN_URL", format!("{}/token", base)),
        ("TIDAL_API_URL", format!("{}/v2", base)),
        ("TIDAL_CLIENT_ID", "id".to_string()),
        ("TIDAL_CLIENT_SECRET", "secret".to_string()),
    ]);

    let value = cli::tidal(
        &config,
        TidalAction::TrackList("https://tidal.com/browse/album/77646164?u".to_string()),
        tidal::DEFAULT_COUNTRY_CODE,
        30,
    )
    .await
    .unwrap();

    assert_eq!(value["artistName"], "Daft Punk");
    assert_eq!(value["title"], "Random Access Memories");
}

#[tokio::test]
async fn test_tidal_stream_uses_user_token() {
    let tokens = Arc::new(AtomicUsize::new(0));
    let counter = tokens.clone();
    let router = Router::new()
        .route(
            "/token",
            post(move || {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Json(json!({"access_token": "tok", "expires_in": 3600}))
                }
            }),
        )
        .route(
            "/v1/tracks/{id}/streamUrl",
            get(|headers: HeaderMap| async move {
                let auth = headers
                    .get("authorization")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                Json(json!({"url": "https://stream.example/1", "auth": auth}))
            }),
        );
    let base = common::spawn(router).await;
    let config = Config::from_values([
        ("TIDAL_TOKEN_URL", format!("{}/token", base)),
        ("TIDAL_STREAM_URL", format!("{}/v1", base)),
        ("TIDAL_CLIENT_ID", "id".to_string()),
        ("TIDAL_CLIENT_SECRET", "secret".to_string()),
    ]);

    let value = cli::tidal(
        &config,
        TidalAction::Stream {
            track_id: "1".to_string(),
            user_token: Some("user".to_string()),
        },
        "US",
        30,
    )
    .await
    .unwrap();

    assert_eq!(value["auth"], "Bearer user");
    assert_eq!(tokens.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_spotify_podcast_search_adds_market() {
    let router = token_route().route(
        "/v1/search",
        get(|Query(params): Params| async move { Json(json!({"params": params})) }),
    );
    let base = common::spawn(router).await;
    let config = Config::from_values([
        ("SPOTIFY_TOKEN_URL", format!("{}/token", base)),
        ("SPOTIFY_API_URL", format!("{}/v1", base)),
        ("SPOTIFY_CLIENT_ID", "id".to_string()),
        ("SPOTIFY_CLIENT_SECRET", "secret".to_string()),
    ]);

    let value = cli::spotify(
        &config,
        SpotifyAction::Search(spotify::SearchKind::Show, "tech".to_string()),
        5,
    )
    .await
    .unwrap();

    assert_eq!(value["params"]["type"], "show");
    assert_eq!(value["params"]["market"], "US");
    assert_eq!(value["params"]["limit"], "5");
}

fn playlist_item(video_id: &str, title: &str) -> Value {
    json!({
        "snippet": {
            "title": title,
            "videoOwnerChannelTitle": "Daft Punk",
            "thumbnails": {"default": {"url": format!("https://i.ytimg.com/{}.jpg", video_id)}}
        },
        "contentDetails": {"videoId": video_id}
    })
}

#[tokio::test]
async fn test_youtube_track_list_pages_and_durations() {
    let video_batches = Arc::new(AtomicUsize::new(0));
    let batches = video_batches.clone();

    let router = Router::new()
        .route(
            "/playlists",
            get(|Query(params): Params| async move {
                assert_eq!(params.get("key").map(String::as_str), Some("yt-key"));
                Json(json!({"items": [{
                    "snippet": {
                        "title": "Discovery",
                        "channelTitle": "Daft Punk",
                        "publishedAt": "2001-03-12T00:00:00Z",
                        "description": "Full album"
                    },
                    "contentDetails": {"itemCount": 3}
                }]}))
            }),
        )
        .route(
            "/playlistItems",
            get(|Query(params): Params| async move {
                match params.get("pageToken").map(String::as_str) {
                    None => Json(json!({
                        "items": [
                            playlist_item("a", "One More Time"),
                            playlist_item("b", "Aerodynamic")
                        ],
                        "nextPageToken": "page-2"
                    })),
                    Some("page-2") => Json(json!({
                        "items": [playlist_item("c", "Digital Love")]
                    })),
                    Some(other) => panic!("unexpected page token {other}"),
                }
            }),
        )
        .route(
            "/videos",
            get(move |Query(params): Params| {
                let batches = batches.clone();
                async move {
                    batches.fetch_add(1, Ordering::SeqCst);
                    let ids = params.get("id").cloned().unwrap_or_default();
                    assert_eq!(ids, "a,b,c");
                    // Out of order, and "b" is gone.
                    Json(json!({"items": [
                        {"id": "c", "contentDetails": {"duration": "PT4M58S"}},
                        {"id": "a", "contentDetails": {"duration": "PT5M20S"}}
                    ]}))
                }
            }),
        );
    let base = common::spawn(router).await;
    let config = Config::from_values([
        ("YOUTUBE_API_URL", base.as_str()),
        ("YOUTUBE_API_KEY", "yt-key"),
    ]);

    let value = cli::youtube(&config, YouTubeAction::TrackList("playlist/PL1".to_string()))
        .await
        .unwrap();

    assert_eq!(value["Playlist"]["title"], "Discovery");
    assert_eq!(value["Playlist"]["releaseDate"], "2001-03-12T00:00:00Z");
    assert_eq!(value["Playlist"]["duration"], 3);

    let tracks = value["Tracks"].as_array().unwrap();
    assert_eq!(tracks.len(), 3);
    assert_eq!(tracks[0]["number"], 1);
    assert_eq!(tracks[0]["duration"], 320);
    assert_eq!(tracks[1]["duration"], 0);
    assert_eq!(tracks[2]["number"], 3);
    assert_eq!(tracks[2]["title"], "Digital Love");
    assert_eq!(tracks[2]["duration"], 298);
    assert_eq!(tracks[2]["playUrl"], "https://www.youtube.com/watch?v=c");
    assert_eq!(video_batches.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_youtube_unknown_playlist_is_payload_error() {
    let router = Router::new().route("/playlists", get(|| async { Json(json!({"items": []})) }));
    let base = common::spawn(router).await;
    let config = Config::from_values([
        ("YOUTUBE_API_URL", base.as_str()),
        ("YOUTUBE_API_KEY", "yt-key"),
    ]);

    let result = cli::youtube(&config, YouTubeAction::TrackList("PLnope".to_string())).await;
    assert!(matches!(result, Err(Error::Payload(msg)) if msg.contains("PLnope")));
}

#[tokio::test]
async fn test_youtube_video_search_reshapes_results() {
    let router = Router::new().route(
        "/search",
        get(|Query(params): Params| async move {
            assert_eq!(params.get("type").map(String::as_str), Some("video"));
            assert_eq!(params.get("maxResults").map(String::as_str), Some("2"));
            Json(json!({"items": [{
                "id": {"videoId": "abc"},
                "snippet": {"title": "Around the World", "channelTitle": "Daft Punk"}
            }]}))
        }),
    );
    let base = common::spawn(router).await;
    let config = Config::from_values([
        ("YOUTUBE_API_URL", base.as_str()),
        ("YOUTUBE_API_KEY", "yt-key"),
    ]);

    let value = cli::youtube(
        &config,
        YouTubeAction::Search {
            kind: youtube::SearchKind::Video,
            query: "around the world".to_string(),
            max_results: 2,
        },
    )
    .await
    .unwrap();

    assert_eq!(value[0]["Video Title"], "Around the World");
    assert_eq!(value[0]["Video URL"], "https://www.youtube.com/watch?v=abc");
}

#[tokio::test]
async fn test_apple_music_search_returns_results() {
    let router = Router::new().route(
        "/search",
        get(|Query(params): Params| async move {
            assert_eq!(params.get("entity").map(String::as_str), Some("album"));
            Json(json!({"resultCount": 1, "results": [{"collectionName": "Discovery"}, {}]}))
        }),
    );
    let base = common::spawn(router).await;
    let config =
        Config::from_values([("APPLE_MUSIC_API_URL", format!("{}/search", base))]);

    let value = cli::apple_music(&config, "discovery", MediaType::Album, 5)
        .await
        .unwrap();

    assert_eq!(value, json!([{"collectionName": "Discovery"}]));
}

#[test]
fn test_media_type_entities() {
    assert_eq!(MediaType::Track.entity(), "song");
    assert_eq!(MediaType::Album.entity(), "album");
    assert_eq!(MediaType::Artist.entity(), "musicArtist");
}
