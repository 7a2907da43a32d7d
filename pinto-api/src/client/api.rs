//! `PintoApi` implementation

use async_trait::async_trait;

use crate::error::Result;
use crate::traits::PintoApi;
use crate::types::{
    CreateRecordRequest, CreateZoneRequest, Record, RecordKey, RecordQuery, Scope, Zone,
};

use super::{PintoClient, RECORDS_PATH, ZONES_PATH};

#[async_trait]
impl PintoApi for PintoClient {
    async fn list_zones(&self, scope: &Scope) -> Result<Vec<Zone>> {
        self.get(ZONES_PATH, &scope.query_pairs(), "ZONES READ")
            .await
    }

    async fn create_zone(&self, req: &CreateZoneRequest) -> Result<()> {
        log::info!(
            "[pinto] Creating zone {} in environment {} of provider {}",
            req.name,
            req.environment.as_deref().unwrap_or_default(),
            req.provider
        );
        self.post(ZONES_PATH, req, "ZONE CREATE").await
    }

    async fn get_zone(&self, name: &str, scope: &Scope) -> Result<Zone> {
        self.get(&Self::zone_path(name), &scope.query_pairs(), "ZONE READ")
            .await
    }

    async fn delete_zone(&self, name: &str, scope: &Scope) -> Result<()> {
        log::info!(
            "[pinto] Deleting zone {name} in environment {} of provider {}",
            scope.environment,
            scope.provider
        );
        self.delete(&Self::zone_path(name), &scope.query_pairs(), None, "ZONE DELETE")
            .await
    }

    async fn list_records(&self, query: &RecordQuery) -> Result<Vec<Record>> {
        self.get(RECORDS_PATH, &query.query_pairs(), "RECORD READ")
            .await
    }

    async fn create_record(&self, req: &CreateRecordRequest) -> Result<()> {
        log::info!(
            "[pinto] Creating record {} {} in zone {} of provider {}",
            req.record_type,
            req.name,
            req.zone,
            req.provider
        );
        self.post(RECORDS_PATH, req, "RECORD CREATE").await
    }

    async fn delete_record(&self, key: &RecordKey) -> Result<()> {
        log::info!(
            "[pinto] Deleting record {} {} in zone {} of provider {}",
            key.record_type,
            key.name,
            key.zone,
            key.scope.provider
        );
        // The endpoint expects a JSON body, even an empty one.
        let empty = serde_json::json!({});
        self.delete(RECORDS_PATH, &key.query_pairs(), Some(&empty), "RECORD DELETE")
            .await
    }
}
