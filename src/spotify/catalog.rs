use reqwest::Method;
use serde_json::Value;

use crate::Result;

use super::SpotifyApi;

impl SpotifyApi {
    pub async fn get_track(&mut self, track_id: &str) -> Result<Value> {
        self.client
            .request(Method::GET, &format!("tracks/{}", track_id), &[])
            .await
    }

    pub async fn get_album(&mut self, album_id: &str) -> Result<Value> {
        self.client
            .request(Method::GET, &format!("albums/{}", album_id), &[])
            .await
    }
}
