use base64::{Engine, engine::general_purpose::STANDARD};
use chrono::{DateTime, TimeDelta, Utc};
use reqwest::{Client, header::AUTHORIZATION};

use crate::{
    Error, Result,
    types::{AccessToken, Credentials, TokenResponse},
};

/// The OAuth2 client-credentials grant against one token endpoint.
#[derive(Debug, Clone)]
pub struct ClientCredentials {
    pub token_url: String,
    pub credentials: Credentials,
}

impl ClientCredentials {
    pub fn new(token_url: String, credentials: Credentials) -> Self {
        Self {
            token_url,
            credentials,
        }
    }

    /// `Basic` authorization value: base64 of `id:secret`.
    pub fn basic_authorization(&self) -> String {
        let pair = format!(
            "{}:{}",
            self.credentials.client_id, self.credentials.client_secret
        );
        format!("Basic {}", STANDARD.encode(pair))
    }

    /// Perform the client credentials flow.
    pub async fn perform(&self, client: &Client) -> Result<AccessToken> {
        let res = client
            .post(&self.token_url)
            .header(AUTHORIZATION, self.basic_authorization())
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await?;
            return Err(Error::Authentication { status, body });
        }

        let body = res.text().await?;
        let token: TokenResponse = serde_json::from_str(&body)
            .map_err(|e| Error::Payload(format!("token response: {}", e)))?;

        Ok(AccessToken {
            access_token: token.access_token,
            expires_at: expiry_after(token.expires_in),
        })
    }
}

fn expiry_after(expires_in: u64) -> DateTime<Utc> {
    let lifetime = i64::try_from(expires_in)
        .ok()
        .and_then(TimeDelta::try_seconds)
        .unwrap_or(TimeDelta::MAX);
    Utc::now()
        .checked_add_signed(lifetime)
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// Holds at most one access token and replaces it whenever it is missing or
/// expired.
pub struct TokenManager {
    grant: ClientCredentials,
    token: Option<AccessToken>,
}

impl TokenManager {
    pub fn new(grant: ClientCredentials) -> Self {
        TokenManager { grant, token: None }
    }

    /// Returns a token that is present and unexpired, fetching a new one first
    /// if needed.
    ///
    /// A failed fetch leaves the previously held state untouched.
    pub async fn get_valid_token(&mut self, client: &Client) -> Result<String> {
        if let Some(token) = &self.token {
            if !token.is_expired() {
                tracing::debug!(token_expires_at = %token.expires_at, "using preexisting token");
                return Ok(token.access_token.clone());
            }
            tracing::debug!(
                token_expires_at = %token.expires_at,
                "existing token expired, refreshing"
            );
        }

        tracing::info!(
            token_url = %self.grant.token_url,
            token_is_stale = self.token.is_some(),
            "no active token found, about to get a new one"
        );

        let new_token = self.grant.perform(client).await?;
        tracing::debug!(token_expires_at = %new_token.expires_at, "got new token");

        let access_token = new_token.access_token.clone();
        self.token = Some(new_token);
        Ok(access_token)
    }

    pub fn is_valid(&self) -> bool {
        self.token.as_ref().is_some_and(|t| !t.is_expired())
    }

    pub fn current_token(&self) -> Option<&AccessToken> {
        self.token.as_ref()
    }

    pub fn grant(&self) -> &ClientCredentials {
        &self.grant
    }
}
