//! Pinto DNS provider core
//!
//! Reconciles declarative zone and record state against the Pinto API:
//! - Identity computation (state ids, import ids)
//! - Resource mapping between attributes and domain entities
//! - Zone and record reconcilers (create/read/update/delete/import)
//! - Read-only data sources
//! - Provider configuration and the host-facing [`PintoProvider`]
//!
//! The gateway is abstracted behind [`pinto_api::PintoApi`], so every
//! reconciler can run against an in-memory implementation.

pub mod config;
pub mod error;
pub mod identity;
pub mod mapper;
pub mod provider;
pub mod services;
pub mod types;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use config::{ProviderContext, ProviderSettings, ScopeDefaults};
pub use error::{CoreError, CoreResult};
pub use provider::{DATA_SOURCES, Diagnostic, PintoProvider, RESOURCES};
pub use services::{DataSourceService, RecordService, ReplaceOutcome, ZoneService};
