//! # Token-Managed API Client
//!
//! A single reusable HTTP client for upstream APIs protected by the OAuth2
//! client-credentials grant. Each service supplies a [`ServiceProfile`]
//! (token endpoint, API base URL, accept header and the configuration keys of
//! its credentials); the client does the rest.
//!
//! ## Token lifecycle
//!
//! The client is either *unauthenticated* (no token yet, or the held token
//! passed its expiry instant) or *authenticated*. Every request calls
//! [`ApiClient::authenticate`] first, which is a timestamp comparison when the
//! token is still valid and a token-endpoint round trip otherwise. Callers
//! never see the unauthenticated state.
//!
//! Tokens live in memory only and are discarded with the client.
//!
//! ## Errors
//!
//! - [`Error::Configuration`] - credentials missing when the client is built
//! - [`Error::Authentication`] - the token endpoint answered non-2xx
//! - [`Error::Upstream`] - the resource endpoint answered non-2xx
//! - [`Error::Payload`] - the resource endpoint answered with invalid JSON
//! - [`Error::Transport`] - no response at all
//!
//! Nothing is retried.

use reqwest::{
    Client, Method, Response,
    header::{ACCEPT, HeaderValue},
};
use serde_json::Value;

use crate::{
    Error, Result,
    config::Config,
    management::{ClientCredentials, TokenManager, load_credentials},
    types::{Credentials, ServiceProfile},
};

pub struct ApiClient {
    http: Client,
    profile: ServiceProfile,
    tokens: TokenManager,
}

impl ApiClient {
    pub fn new(profile: ServiceProfile, credentials: Credentials) -> Self {
        let grant = ClientCredentials::new(profile.token_url.clone(), credentials);
        Self {
            http: Client::new(),
            profile,
            tokens: TokenManager::new(grant),
        }
    }

    /// Builds a client whose credentials come from the profile's configuration
    /// keys.
    pub fn from_config(profile: ServiceProfile, config: &Config) -> Result<Self> {
        let credentials =
            load_credentials(config, profile.client_id_key, profile.client_secret_key)?;
        Ok(Self::new(profile, credentials))
    }

    pub fn profile(&self) -> &ServiceProfile {
        &self.profile
    }

    pub fn credentials(&self) -> &Credentials {
        &self.tokens.grant().credentials
    }

    pub fn has_valid_token(&self) -> bool {
        self.tokens.is_valid()
    }

    /// Makes sure a valid token is held; fetches one when it is missing or
    /// expired.
    pub async fn authenticate(&mut self) -> Result<()> {
        self.tokens.get_valid_token(&self.http).await.map(|_| ())
    }

    /// Sends an authenticated request and decodes the JSON response.
    ///
    /// `path` is either relative to the profile's API URL or an absolute URL.
    pub async fn request(
        &mut self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Value> {
        let accept = self.profile.accept;
        self.request_with_accept(method, path, query, accept).await
    }

    /// Like [`ApiClient::request`] with a per-call `Accept` header.
    pub async fn request_with_accept(
        &mut self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        accept: &str,
    ) -> Result<Value> {
        let token = self.tokens.get_valid_token(&self.http).await?;
        self.send(method, path, query, accept, &token).await
    }

    /// Sends a request with a bearer token supplied by the caller instead of
    /// the client-credentials token.
    pub async fn request_with_token(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        token: &str,
    ) -> Result<Value> {
        self.send(method, path, query, self.profile.accept, token).await
    }

    fn url_for(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!(
                "{}/{}",
                self.profile.api_url.trim_end_matches('/'),
                path.trim_start_matches('/')
            )
        }
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        accept: &str,
        token: &str,
    ) -> Result<Value> {
        let url = self.url_for(path);
        tracing::debug!(service = self.profile.name, %method, %url, "sending request");

        let accept = HeaderValue::from_str(accept)
            .map_err(|e| Error::Input(format!("invalid accept header: {}", e)))?;

        let res = self
            .http
            .request(method, &url)
            .bearer_auth(token)
            .header(ACCEPT, accept)
            .query(query)
            .send()
            .await?;

        decode_json(res).await
    }
}

/// Turns a response into JSON, mapping non-2xx statuses to [`Error::Upstream`].
pub(crate) async fn decode_json(res: Response) -> Result<Value> {
    let status = res.status();
    let body = res.text().await?;
    if !status.is_success() {
        return Err(Error::Upstream { status, body });
    }

    serde_json::from_str(&body).map_err(|e| Error::Payload(e.to_string()))
}
