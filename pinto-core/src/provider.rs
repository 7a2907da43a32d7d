//! Host boundary
//!
//! [`PintoProvider`] is what the plugin host talks to. States cross the
//! boundary as JSON objects keyed by schema attribute names and are decoded
//! into the typed attribute sets before any reconciler runs.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::ProviderContext;
use crate::error::{CoreError, CoreResult};
use crate::services::{DataSourceService, RecordService, ZoneService};
use crate::types::{
    RecordAttributes, RecordDataAttributes, RecordsDataAttributes, ZoneAttributes,
    ZoneDataAttributes, ZonesDataAttributes,
};

pub const ZONE: &str = "pinto_dns_zone";
pub const ZONES: &str = "pinto_dns_zones";
pub const RECORD: &str = "pinto_dns_record";
pub const RECORDS: &str = "pinto_dns_records";

/// Managed resource types
pub const RESOURCES: [&str; 2] = [ZONE, RECORD];
/// Data source types
pub const DATA_SOURCES: [&str; 4] = [ZONE, ZONES, RECORD, RECORDS];

/// Error reported back to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: &'static str,
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl From<&CoreError> for Diagnostic {
    fn from(err: &CoreError) -> Self {
        Self {
            severity: "error",
            summary: err.to_string(),
            detail: err
                .remote()
                .and_then(|e| e.body())
                .filter(|b| !b.is_empty())
                .map(str::to_string),
        }
    }
}

fn decode<T: DeserializeOwned>(type_name: &str, state: Value) -> CoreResult<T> {
    serde_json::from_value(state)
        .map_err(|e| CoreError::InvalidState(format!("{type_name}: {e}")))
}

fn encode<T: Serialize>(type_name: &str, state: &T) -> CoreResult<Value> {
    serde_json::to_value(state).map_err(|e| CoreError::InvalidState(format!("{type_name}: {e}")))
}

/// Dispatches host calls to the reconcilers by type name.
pub struct PintoProvider {
    zones: ZoneService,
    records: RecordService,
    data: DataSourceService,
}

impl PintoProvider {
    #[must_use]
    pub fn new(ctx: Arc<ProviderContext>) -> Self {
        Self {
            zones: ZoneService::new(ctx.clone()),
            records: RecordService::new(ctx.clone()),
            data: DataSourceService::new(ctx),
        }
    }

    pub async fn create(&self, type_name: &str, planned: Value) -> CoreResult<Value> {
        match type_name {
            ZONE => {
                let state = self.zones.create(decode(type_name, planned)?).await?;
                encode(type_name, &state)
            }
            RECORD => {
                let state = self.records.create(decode(type_name, planned)?).await?;
                encode(type_name, &state)
            }
            _ => Err(CoreError::UnknownResource(type_name.to_string())),
        }
    }

    /// `id: null` in the result means the resource is gone.
    pub async fn read(&self, type_name: &str, state: Value) -> CoreResult<Value> {
        match type_name {
            ZONE => {
                let state = self.zones.read(decode(type_name, state)?).await?;
                encode(type_name, &state)
            }
            RECORD => {
                let state = self.records.read(decode(type_name, state)?).await?;
                encode(type_name, &state)
            }
            _ => Err(CoreError::UnknownResource(type_name.to_string())),
        }
    }

    pub async fn update(&self, type_name: &str, prior: Value, planned: Value) -> CoreResult<Value> {
        match type_name {
            ZONE => {
                let prior: ZoneAttributes = decode(type_name, prior)?;
                let state = self
                    .zones
                    .update(&prior, decode(type_name, planned)?)
                    .await?;
                encode(type_name, &state)
            }
            RECORD => {
                let prior: RecordAttributes = decode(type_name, prior)?;
                let state = self
                    .records
                    .update(&prior, decode(type_name, planned)?)
                    .await?;
                encode(type_name, &state)
            }
            _ => Err(CoreError::UnknownResource(type_name.to_string())),
        }
    }

    pub async fn delete(&self, type_name: &str, state: Value) -> CoreResult<()> {
        match type_name {
            ZONE => {
                let state: ZoneAttributes = decode(type_name, state)?;
                self.zones.delete(&state).await
            }
            RECORD => {
                let state: RecordAttributes = decode(type_name, state)?;
                self.records.delete(&state).await
            }
            _ => Err(CoreError::UnknownResource(type_name.to_string())),
        }
    }

    pub async fn import(&self, type_name: &str, id: &str) -> CoreResult<Value> {
        match type_name {
            ZONE => encode(type_name, &self.zones.import(id).await?),
            RECORD => encode(type_name, &self.records.import(id).await?),
            _ => Err(CoreError::UnknownResource(type_name.to_string())),
        }
    }

    pub async fn read_data_source(&self, type_name: &str, config: Value) -> CoreResult<Value> {
        match type_name {
            ZONE => {
                let attrs: ZoneDataAttributes = decode(type_name, config)?;
                encode(type_name, &self.data.zone(attrs).await?)
            }
            ZONES => {
                let attrs: ZonesDataAttributes = decode(type_name, config)?;
                encode(type_name, &self.data.zones(attrs).await?)
            }
            RECORD => {
                let attrs: RecordDataAttributes = decode(type_name, config)?;
                encode(type_name, &self.data.record(attrs).await?)
            }
            RECORDS => {
                let attrs: RecordsDataAttributes = decode(type_name, config)?;
                encode(type_name, &self.data.records(attrs).await?)
            }
            _ => Err(CoreError::UnknownResource(type_name.to_string())),
        }
    }
}
