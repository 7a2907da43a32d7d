//! # pinto-api
//!
//! Gateway to the Pinto multi-tenant DNS platform. Pinto manages DNS zones and
//! records on behalf of several DNS backends ("providers", e.g.
//! `digitalocean`), each split into logical environments (e.g. `prod1`).
//!
//! ## Endpoints
//!
//! | Operation | Method & path |
//! |-----------|---------------|
//! | list zones | `GET /api/dns/zones` |
//! | create zone | `POST /api/dns/zones` |
//! | get zone | `GET /api/dns/zones/{zone}` |
//! | delete zone | `DELETE /api/dns/zones/{zone}` |
//! | list/filter records | `GET /api/dns/records` |
//! | create record | `POST /api/dns/records` |
//! | delete record | `DELETE /api/dns/records` |
//!
//! The API has no update endpoint. Callers replace entities instead.
//!
//! ## Authentication
//!
//! - **API key** sent as `X-API-KEY`
//! - **OAuth2 client credentials** producing a bearer token, cached until
//!   shortly before expiry
//!
//! ## Usage
//!
//! ```rust,no_run
//! use pinto_api::{ClientConfig, ClientCredentials, PintoApi, PintoClient, Scope};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = PintoClient::new(ClientConfig {
//!         base_url: "https://pinto.example.com".to_string(),
//!         client_credentials: Some(
//!             ClientCredentials::new("https://auth.example.com/connect/token", "machineclient", "secret")
//!                 .with_scope_list("openapigateway,nexus"),
//!         ),
//!         ..ClientConfig::default()
//!     })?;
//!
//!     let zones = client.list_zones(&Scope::new("digitalocean", "prod1")).await?;
//!     for zone in &zones {
//!         println!("{}", zone.name);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Every call returns [`Result<T, ApiError>`](ApiError). Status `>= 400`
//! becomes [`ApiError::Http`] carrying the operation name and the drained
//! response body. Nothing is retried.

mod auth;
mod client;
mod error;
mod http_client;
mod traits;
mod types;
mod utils;

pub use auth::{API_KEY_HEADER, ClientCredentials, parse_scope_list};
pub use client::{API_OPTIONS_HEADER, ClientConfig, PintoClient, create_http_client};
pub use error::{ApiError, Result};
pub use traits::PintoApi;
pub use types::{
    AccessOptions, ApiOptions, CreateRecordRequest, CreateZoneRequest, Record, RecordKey,
    RecordQuery, RecordType, Scope, Zone,
};
pub use utils::log_sanitizer::truncate_for_log;
