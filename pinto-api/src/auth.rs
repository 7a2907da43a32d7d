//! Request authentication
//!
//! Two mechanisms, usable together:
//! - a static API key sent as `X-API-KEY` on every call
//! - an OAuth2 client-credentials grant producing a bearer token
//!
//! Tokens are fetched lazily and cached until shortly before they expire.

use chrono::{DateTime, Duration, Utc};
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use tokio::sync::RwLock;

use crate::error::{ApiError, Result};
use crate::utils::log_sanitizer::truncate_for_log;

/// Header carrying the static API key.
pub const API_KEY_HEADER: &str = "X-API-KEY";

/// Tokens are treated as expired this long before their real expiry.
const TOKEN_EXPIRY_MARGIN_SECS: i64 = 30;

/// OAuth2 client-credentials settings.
#[derive(Clone)]
pub struct ClientCredentials {
    pub token_url: String,
    pub client_id: String,
    pub client_secret: String,
    pub scopes: Vec<String>,
}

impl ClientCredentials {
    pub fn new(
        token_url: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            token_url: token_url.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            scopes: Vec::new(),
        }
    }

    /// Set scopes from a comma-separated list (`"openapigateway,nexus"`).
    #[must_use]
    pub fn with_scope_list(mut self, scopes: &str) -> Self {
        self.scopes = parse_scope_list(scopes);
        self
    }
}

impl std::fmt::Debug for ClientCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientCredentials")
            .field("token_url", &self.token_url)
            .field("client_id", &self.client_id)
            .field("client_secret", &"***")
            .field("scopes", &self.scopes)
            .finish()
    }
}

/// Split a comma-separated scope list, dropping blanks.
pub fn parse_scope_list(scopes: &str) -> Vec<String> {
    scopes
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
}

#[derive(Clone)]
struct CachedToken {
    access_token: String,
    expires_at: Option<DateTime<Utc>>,
}

impl CachedToken {
    fn is_valid(&self, now: DateTime<Utc>) -> bool {
        self.expires_at
            .is_none_or(|at| now + Duration::seconds(TOKEN_EXPIRY_MARGIN_SECS) < at)
    }
}

/// Fetches and caches client-credentials tokens.
pub(crate) struct TokenSource {
    credentials: ClientCredentials,
    cache: RwLock<Option<CachedToken>>,
}

impl TokenSource {
    pub(crate) fn new(credentials: ClientCredentials) -> Self {
        Self {
            credentials,
            cache: RwLock::new(None),
        }
    }

    /// Current access token, fetching a new one when the cache is stale.
    pub(crate) async fn token(&self, client: &Client) -> Result<String> {
        let now = Utc::now();
        if let Some(cached) = self.cache.read().await.as_ref()
            && cached.is_valid(now)
        {
            return Ok(cached.access_token.clone());
        }

        let mut cache = self.cache.write().await;
        // Another task may have refreshed while we waited for the lock.
        if let Some(cached) = cache.as_ref()
            && cached.is_valid(now)
        {
            return Ok(cached.access_token.clone());
        }

        let fresh = self.fetch(client).await?;
        let token = fresh.access_token.clone();
        *cache = Some(fresh);
        Ok(token)
    }

    async fn fetch(&self, client: &Client) -> Result<CachedToken> {
        let creds = &self.credentials;
        log::debug!("[pinto] Fetching access token from {}", creds.token_url);

        let mut form = vec![("grant_type", "client_credentials".to_string())];
        if !creds.scopes.is_empty() {
            form.push(("scope", creds.scopes.join(" ")));
        }

        let response = client
            .post(&creds.token_url)
            .basic_auth(&creds.client_id, Some(&creds.client_secret))
            .form(&form)
            .send()
            .await
            .map_err(|e| ApiError::Authentication {
                detail: e.to_string(),
                body: None,
            })?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if !status.is_success() {
            log::error!(
                "[pinto] Token request failed with {status}: {}",
                truncate_for_log(&body)
            );
            return Err(ApiError::Authentication {
                detail: format!("token endpoint returned {status}"),
                body: Some(body),
            });
        }

        let parsed: TokenResponse =
            serde_json::from_str(&body).map_err(|e| ApiError::Authentication {
                detail: format!("invalid token response: {e}"),
                body: None,
            })?;

        Ok(CachedToken {
            access_token: parsed.access_token,
            expires_at: parsed
                .expires_in
                .map(|secs| Utc::now() + Duration::seconds(secs)),
        })
    }
}

/// Authentication applied to every gateway request.
#[derive(Default)]
pub(crate) struct Authenticator {
    api_key: Option<String>,
    oauth: Option<TokenSource>,
}

impl Authenticator {
    pub(crate) fn new(api_key: Option<String>, oauth: Option<ClientCredentials>) -> Self {
        Self {
            api_key: api_key.filter(|k| !k.is_empty()),
            oauth: oauth.map(TokenSource::new),
        }
    }

    pub(crate) fn mode(&self) -> &'static str {
        match (&self.api_key, &self.oauth) {
            (Some(_), Some(_)) => "api-key+client-credentials",
            (Some(_), None) => "api-key",
            (None, Some(_)) => "client-credentials",
            (None, None) => "none",
        }
    }

    /// Attach credentials to a request.
    pub(crate) async fn apply(
        &self,
        mut request: RequestBuilder,
        client: &Client,
    ) -> Result<RequestBuilder> {
        if let Some(ref source) = self.oauth {
            let token = source.token(client).await?;
            request = request.bearer_auth(token);
        }
        if let Some(ref key) = self.api_key {
            request = request.header(API_KEY_HEADER, key);
        }
        Ok(request)
    }
}
