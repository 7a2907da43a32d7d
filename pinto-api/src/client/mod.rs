//! reqwest-backed Pinto client

mod api;
mod http;

use std::time::Duration;

use reqwest::Client;

use crate::auth::{Authenticator, ClientCredentials};
use crate::error::{ApiError, Result};
use crate::types::ApiOptions;

/// Default connect timeout (seconds)
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// Default request timeout (seconds)
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

pub(crate) const ZONES_PATH: &str = "/api/dns/zones";
pub(crate) const RECORDS_PATH: &str = "/api/dns/records";

/// Header carrying the serialized [`ApiOptions`].
pub const API_OPTIONS_HEADER: &str = "X-Api-Options";

/// Connection settings for [`PintoClient`].
#[derive(Clone, Default)]
pub struct ClientConfig {
    /// Base URL, e.g. `https://pinto.example.com`.
    pub base_url: String,
    /// Static API key, sent on every call when set.
    pub api_key: Option<String>,
    /// OAuth2 client-credentials grant, used for every call when set.
    pub client_credentials: Option<ClientCredentials>,
    /// Access options sent as the `X-Api-Options` header when set.
    pub api_options: Option<ApiOptions>,
}

/// Pinto DNS API client
pub struct PintoClient {
    pub(crate) client: Client,
    pub(crate) base_url: String,
    pub(crate) auth: Authenticator,
    pub(crate) api_options: Option<String>,
}

impl PintoClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = create_http_client()?;
        let api_options = config
            .api_options
            .as_ref()
            .map(serde_json::to_string)
            .transpose()
            .map_err(|e| ApiError::Serialization {
                operation: "CONFIGURE".to_string(),
                detail: format!("Unable to set up {API_OPTIONS_HEADER}: {e}"),
            })?;
        let auth = Authenticator::new(config.api_key, config.client_credentials);

        log::debug!(
            "[pinto] Client for {} (auth: {})",
            config.base_url,
            auth.mode()
        );

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            auth,
            api_options,
        })
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    pub(crate) fn zone_path(name: &str) -> String {
        format!("{ZONES_PATH}/{}", urlencoding::encode(name))
    }
}

/// Create an HTTP client with the default timeouts
pub fn create_http_client() -> Result<Client> {
    Client::builder()
        .connect_timeout(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS))
        .timeout(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS))
        .build()
        .map_err(|e| ApiError::Network {
            operation: "CONFIGURE".to_string(),
            detail: format!("Failed to create HTTP client: {e}"),
        })
}
