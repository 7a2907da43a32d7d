//! Provider configuration
//!
//! [`ProviderSettings`] is the decoded provider block. Gaps are filled from
//! `PINTO_*` environment variables, then [`ProviderContext::configure`]
//! validates the result and builds the gateway. The context is built once
//! per plugin invocation and shared read-only by every reconciler.

use std::sync::Arc;

use pinto_api::{AccessOptions, ApiOptions, ClientConfig, ClientCredentials, PintoApi, PintoClient};
use serde::Deserialize;

use crate::error::{CoreError, CoreResult};
use crate::types::Scope;

pub const ENV_BASE_URL: &str = "PINTO_BASE_URL";
pub const ENV_TOKEN_URL: &str = "PINTO_TOKEN_URL";
pub const ENV_CLIENT_ID: &str = "PINTO_CLIENT_ID";
pub const ENV_CLIENT_SECRET: &str = "PINTO_CLIENT_SECRET";
pub const ENV_CLIENT_SCOPE: &str = "PINTO_CLIENT_SCOPE";
pub const ENV_API_KEY: &str = "PINTO_API_KEY";
pub const ENV_CREDENTIALS_ID: &str = "PINTO_CREDENTIALS_ID";
pub const ENV_PROVIDER: &str = "PINTO_PROVIDER";
pub const ENV_ENVIRONMENT: &str = "PINTO_ENVIRONMENT";

/// Attribute name of the per-resource provider override.
pub const SCHEMA_PROVIDER: &str = "pinto_provider";

/// Provider block settings
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProviderSettings {
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub token_url: Option<String>,
    #[serde(default)]
    pub client_id: Option<String>,
    #[serde(default)]
    pub client_secret: Option<String>,
    /// Comma-separated
    #[serde(default)]
    pub client_scope: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub credentials_id: Option<String>,
    #[serde(default)]
    pub pinto_provider: Option<String>,
    #[serde(default)]
    pub pinto_environment: Option<String>,
}

impl std::fmt::Debug for ProviderSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redact = |v: &Option<String>| v.as_ref().map(|_| "***");
        f.debug_struct("ProviderSettings")
            .field("base_url", &self.base_url)
            .field("token_url", &self.token_url)
            .field("client_id", &self.client_id)
            .field("client_secret", &redact(&self.client_secret))
            .field("client_scope", &self.client_scope)
            .field("api_key", &redact(&self.api_key))
            .field("credentials_id", &self.credentials_id)
            .field("pinto_provider", &self.pinto_provider)
            .field("pinto_environment", &self.pinto_environment)
            .finish()
    }
}

/// `Some` only for non-empty values. An empty string counts as unset.
fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|v| !v.is_empty())
}

impl ProviderSettings {
    /// Settings taken from the process environment only.
    pub fn from_env() -> Self {
        Self::default().with_env_defaults(|key| std::env::var(key).ok())
    }

    /// Fill every unset (or empty) field from `lookup`.
    #[must_use]
    pub fn with_env_defaults<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let fields = [
            (&mut self.base_url, ENV_BASE_URL),
            (&mut self.token_url, ENV_TOKEN_URL),
            (&mut self.client_id, ENV_CLIENT_ID),
            (&mut self.client_secret, ENV_CLIENT_SECRET),
            (&mut self.client_scope, ENV_CLIENT_SCOPE),
            (&mut self.api_key, ENV_API_KEY),
            (&mut self.credentials_id, ENV_CREDENTIALS_ID),
            (&mut self.pinto_provider, ENV_PROVIDER),
            (&mut self.pinto_environment, ENV_ENVIRONMENT),
        ];
        for (field, key) in fields {
            if non_empty(field.as_ref()).is_none() {
                *field = lookup(key).filter(|v| !v.is_empty());
            }
        }
        self
    }

    /// Default scope applied to resources without overrides.
    pub fn scope_defaults(&self) -> ScopeDefaults {
        ScopeDefaults::new(
            non_empty(self.pinto_provider.as_ref()),
            non_empty(self.pinto_environment.as_ref()).unwrap_or_default(),
        )
    }

    /// Validate the settings and turn them into a gateway configuration.
    pub fn client_config(&self) -> CoreResult<ClientConfig> {
        let base_url = non_empty(self.base_url.as_ref()).ok_or_else(|| {
            CoreError::Configuration(format!("base_url (or {ENV_BASE_URL}) has to be set"))
        })?;

        let client_credentials = match non_empty(self.client_id.as_ref()) {
            None => None,
            Some(client_id) => {
                let secret = non_empty(self.client_secret.as_ref());
                let token_url = non_empty(self.token_url.as_ref());
                let (Some(secret), Some(token_url)) = (secret, token_url) else {
                    return Err(CoreError::Configuration(format!(
                        "client-credentials authentication requires {ENV_CLIENT_ID}, \
                         {ENV_CLIENT_SECRET} and {ENV_TOKEN_URL} to be set together"
                    )));
                };
                let mut creds = ClientCredentials::new(token_url, client_id, secret);
                if let Some(scopes) = non_empty(self.client_scope.as_ref()) {
                    creds = creds.with_scope_list(scopes);
                }
                Some(creds)
            }
        };

        let defaults = self.scope_defaults();
        let api_options =
            non_empty(self.credentials_id.as_ref()).map(|credentials_id| ApiOptions {
                access_options: AccessOptions {
                    provider: defaults.provider.clone().unwrap_or_default(),
                    environment: defaults.environment.clone(),
                    credentials_id: credentials_id.to_string(),
                },
            });

        Ok(ClientConfig {
            base_url: base_url.to_string(),
            api_key: non_empty(self.api_key.as_ref()).map(str::to_string),
            client_credentials,
            api_options,
        })
    }
}

/// Provider-level default scope.
///
/// A resource attribute wins over the default. A missing provider is a
/// configuration error, a missing environment resolves to `""`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeDefaults {
    pub provider: Option<String>,
    pub environment: String,
}

impl ScopeDefaults {
    pub fn new(provider: Option<&str>, environment: &str) -> Self {
        Self {
            provider: provider.filter(|p| !p.is_empty()).map(str::to_string),
            environment: environment.to_string(),
        }
    }

    pub fn provider(&self, attribute: Option<&str>) -> CoreResult<String> {
        attribute
            .filter(|p| !p.is_empty())
            .or(self.provider.as_deref())
            .map(str::to_string)
            .ok_or_else(|| {
                CoreError::Configuration(format!(
                    "{SCHEMA_PROVIDER} has to be set on provider or resource-level"
                ))
            })
    }

    pub fn environment(&self, attribute: Option<&str>) -> String {
        attribute
            .filter(|e| !e.is_empty())
            .unwrap_or(&self.environment)
            .to_string()
    }

    /// Resolve both scope values for one resource.
    pub fn resolve(&self, provider: Option<&str>, environment: Option<&str>) -> CoreResult<Scope> {
        Ok(Scope::new(
            self.provider(provider)?,
            self.environment(environment),
        ))
    }
}

/// Configured provider shared by all reconcilers
pub struct ProviderContext {
    pub defaults: ScopeDefaults,
    gateway: Arc<dyn PintoApi>,
}

impl ProviderContext {
    /// Context around an existing gateway (e.g. a mock in tests).
    #[must_use]
    pub fn new(gateway: Arc<dyn PintoApi>, defaults: ScopeDefaults) -> Self {
        Self { defaults, gateway }
    }

    /// Validate `settings` and build the HTTP gateway.
    pub fn configure(settings: &ProviderSettings) -> CoreResult<Self> {
        let config = settings.client_config()?;
        let defaults = settings.scope_defaults();
        log::info!(
            "[pinto] Configuring provider for {} (default provider: {}, environment: {:?})",
            config.base_url,
            defaults.provider.as_deref().unwrap_or("<unset>"),
            defaults.environment
        );
        let client = PintoClient::new(config)?;
        Ok(Self::new(Arc::new(client), defaults))
    }

    pub fn gateway(&self) -> &dyn PintoApi {
        self.gateway.as_ref()
    }
}
