use reqwest::Method;
use serde_json::Value;

use crate::{Error, Result};

use super::TidalApi;

/// Extracts an album id from a bare id or from anything containing
/// `album/<id>`, such as a share URL.
pub fn album_id_from_reference(reference: &str) -> Result<String> {
    let reference = reference.trim();
    let id = match reference.rsplit_once("album/") {
        Some((_, rest)) => rest.split(['/', '?']).next().unwrap_or_default(),
        None => reference,
    };

    if id.is_empty() {
        return Err(Error::Input(format!(
            "no album id found in '{}'",
            reference
        )));
    }
    Ok(id.to_string())
}

impl TidalApi {
    pub async fn get_track(&mut self, track_id: &str, country_code: &str) -> Result<Value> {
        let params = [
            ("countryCode", country_code.to_string()),
            ("include", "artists,albums".to_string()),
        ];
        self.client
            .request(Method::GET, &format!("tracks/{}", track_id), &params)
            .await
    }

    /// Fetches an album with its items. When the album carries an `artistId`
    /// instead of an embedded artist, the artist is looked up and its name is
    /// added as `artistName`.
    pub async fn get_album(&mut self, album_id: &str, country_code: &str) -> Result<Value> {
        let params = [
            ("countryCode", country_code.to_string()),
            ("include", "items".to_string()),
        ];
        let mut album = self
            .client
            .request(Method::GET, &format!("albums/{}", album_id), &params)
            .await?;

        if album.get("artist").is_some() {
            return Ok(album);
        }

        let artist_id = match album.get("artistId") {
            Some(Value::String(id)) => id.clone(),
            Some(Value::Number(id)) => id.to_string(),
            _ => return Ok(album),
        };

        let artist = self
            .client
            .request(
                Method::GET,
                &format!("artists/{}", artist_id),
                &[("countryCode", country_code.to_string())],
            )
            .await?;
        let artist_name = artist
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or("Unknown Artist")
            .to_string();

        if let Some(object) = album.as_object_mut() {
            object.insert("artistName".to_string(), Value::String(artist_name));
        }
        Ok(album)
    }

    /// Resolves a stream URL, with the caller's user token when given and the
    /// application token otherwise.
    pub async fn get_stream_url(
        &mut self,
        track_id: &str,
        country_code: &str,
        user_token: Option<&str>,
    ) -> Result<Value> {
        let url = format!(
            "{}/tracks/{}/streamUrl",
            self.stream_url.trim_end_matches('/'),
            track_id
        );
        let params = [("countryCode", country_code.to_string())];

        match user_token {
            Some(token) => {
                self.client
                    .request_with_token(Method::GET, &url, &params, token)
                    .await
            }
            None => {
                self.client
                    .request_with_accept(Method::GET, &url, &params, "application/json")
                    .await
            }
        }
    }
}
