use serde_json::Value;

use crate::{
    Error, Result,
    apple_music::{AppleMusicApi, MediaType},
    config::Config,
};

pub async fn apple_music(
    config: &Config,
    term: &str,
    media_type: MediaType,
    limit: u32,
) -> Result<Value> {
    if term.trim().is_empty() {
        return Err(Error::Input("search term must not be empty".to_string()));
    }

    AppleMusicApi::from_config(config)
        .search(term, media_type, limit)
        .await
}
