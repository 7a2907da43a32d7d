//! Test helper module
//!
//! In-memory gateway with a call log and per-operation failure injection.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use pinto_api::{
    ApiError, CreateRecordRequest, CreateZoneRequest, PintoApi, Record, RecordKey, RecordQuery,
    Result, Scope, Zone,
};
use tokio::sync::RwLock;

use crate::config::{ProviderContext, ScopeDefaults};

#[derive(Debug, Clone)]
pub struct StoredRecord {
    pub scope: Scope,
    pub zone: String,
    pub record: Record,
}

// ===== MockPintoApi =====

pub struct MockPintoApi {
    zones: RwLock<Vec<(Scope, String)>>,
    records: RwLock<Vec<StoredRecord>>,
    calls: RwLock<Vec<String>>,
    /// Operation name -> status returned instead of doing the call
    failures: RwLock<HashMap<String, u16>>,
}

impl MockPintoApi {
    pub fn new() -> Self {
        Self {
            zones: RwLock::new(Vec::new()),
            records: RwLock::new(Vec::new()),
            calls: RwLock::new(Vec::new()),
            failures: RwLock::new(HashMap::new()),
        }
    }

    pub async fn insert_zone(&self, scope: &Scope, name: &str) {
        self.zones
            .write()
            .await
            .push((scope.clone(), name.to_string()));
    }

    pub async fn has_zone(&self, scope: &Scope, name: &str) -> bool {
        self.zones
            .read()
            .await
            .iter()
            .any(|(s, n)| s == scope && n == name)
    }

    pub async fn insert_record(&self, scope: &Scope, zone: &str, record: Record) {
        self.records.write().await.push(StoredRecord {
            scope: scope.clone(),
            zone: zone.to_string(),
            record,
        });
    }

    pub async fn records(&self) -> Vec<StoredRecord> {
        self.records.read().await.clone()
    }

    pub async fn calls(&self) -> Vec<String> {
        self.calls.read().await.clone()
    }

    /// Make every later call of `operation` answer with `status`.
    pub async fn fail_on(&self, operation: &str, status: u16) {
        self.failures
            .write()
            .await
            .insert(operation.to_string(), status);
    }

    async fn enter(&self, operation: &str, label: &str) -> Result<()> {
        self.calls.write().await.push(operation.to_string());
        match self.failures.read().await.get(operation) {
            Some(&status) => Err(http_error(label, status, "injected failure")),
            None => Ok(()),
        }
    }
}

fn http_error(operation: &str, status: u16, body: &str) -> ApiError {
    ApiError::Http {
        operation: operation.to_string(),
        status,
        message: status.to_string(),
        body: body.to_string(),
    }
}

fn query_matches(query: &RecordQuery, stored: &StoredRecord) -> bool {
    stored.scope == query.scope
        && stored.zone == query.zone
        && query.name.as_ref().is_none_or(|n| *n == stored.record.name)
        && query
            .record_type
            .is_none_or(|t| t == stored.record.record_type)
}

fn key_matches(key: &RecordKey, stored: &StoredRecord) -> bool {
    stored.scope == key.scope
        && stored.zone == key.zone
        && stored.record.name == key.name
        && stored.record.record_type == key.record_type
}

#[async_trait]
impl PintoApi for MockPintoApi {
    async fn list_zones(&self, scope: &Scope) -> Result<Vec<Zone>> {
        self.enter("list_zones", "ZONES READ").await?;
        Ok(self
            .zones
            .read()
            .await
            .iter()
            .filter(|(s, _)| s == scope)
            .map(|(_, name)| Zone { name: name.clone() })
            .collect())
    }

    async fn create_zone(&self, req: &CreateZoneRequest) -> Result<()> {
        self.enter("create_zone", "ZONE CREATE").await?;
        let scope = Scope::new(&req.provider, req.environment.clone().unwrap_or_default());
        if self.has_zone(&scope, &req.name).await {
            return Err(http_error("ZONE CREATE", 409, "zone already exists"));
        }
        self.insert_zone(&scope, &req.name).await;
        Ok(())
    }

    async fn get_zone(&self, name: &str, scope: &Scope) -> Result<Zone> {
        self.enter("get_zone", "ZONE READ").await?;
        if self.has_zone(scope, name).await {
            Ok(Zone {
                name: name.to_string(),
            })
        } else {
            Err(http_error("ZONE READ", 404, "zone not found"))
        }
    }

    async fn delete_zone(&self, name: &str, scope: &Scope) -> Result<()> {
        self.enter("delete_zone", "ZONE DELETE").await?;
        let mut zones = self.zones.write().await;
        let before = zones.len();
        zones.retain(|(s, n)| !(s == scope && n == name));
        if zones.len() == before {
            return Err(http_error("ZONE DELETE", 404, "zone not found"));
        }
        Ok(())
    }

    async fn list_records(&self, query: &RecordQuery) -> Result<Vec<Record>> {
        self.enter("list_records", "RECORD READ").await?;
        Ok(self
            .records
            .read()
            .await
            .iter()
            .filter(|stored| query_matches(query, stored))
            .map(|stored| stored.record.clone())
            .collect())
    }

    async fn create_record(&self, req: &CreateRecordRequest) -> Result<()> {
        self.enter("create_record", "RECORD CREATE").await?;
        let scope = Scope::new(&req.provider, req.environment.clone().unwrap_or_default());
        self.insert_record(
            &scope,
            &req.zone,
            Record {
                name: req.name.clone(),
                record_type: req.record_type,
                class: req.class.clone(),
                ttl: Some(req.ttl),
                data: req.data.clone(),
            },
        )
        .await;
        Ok(())
    }

    async fn delete_record(&self, key: &RecordKey) -> Result<()> {
        self.enter("delete_record", "RECORD DELETE").await?;
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|stored| !key_matches(key, stored));
        if records.len() == before {
            return Err(http_error("RECORD DELETE", 404, "record not found"));
        }
        Ok(())
    }
}

// ===== Factory helpers =====

/// Default scope used by [`context_with`].
pub fn test_defaults() -> ScopeDefaults {
    ScopeDefaults::new(Some("digitalocean"), "prod1")
}

/// Provider context around `api` with [`test_defaults`].
pub fn context_with(api: MockPintoApi) -> (Arc<MockPintoApi>, Arc<ProviderContext>) {
    let api = Arc::new(api);
    let ctx = Arc::new(ProviderContext::new(api.clone(), test_defaults()));
    (api, ctx)
}
