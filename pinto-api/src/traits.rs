use async_trait::async_trait;

use crate::error::Result;
use crate::types::{CreateRecordRequest, CreateZoneRequest, Record, RecordKey, RecordQuery, Scope, Zone};

/// Pinto DNS API
///
/// One method per remote endpoint. Implementations classify every response
/// (status `>= 400` or transport failure is an error) and never retry.
#[async_trait]
pub trait PintoApi: Send + Sync {
    /// List all zones of a scope
    async fn list_zones(&self, scope: &Scope) -> Result<Vec<Zone>>;

    /// Create a zone
    async fn create_zone(&self, req: &CreateZoneRequest) -> Result<()>;

    /// Read a zone by name
    async fn get_zone(&self, name: &str, scope: &Scope) -> Result<Zone>;

    /// Delete a zone by name
    async fn delete_zone(&self, name: &str, scope: &Scope) -> Result<()>;

    /// List records matching a filter
    async fn list_records(&self, query: &RecordQuery) -> Result<Vec<Record>>;

    /// Create a record
    async fn create_record(&self, req: &CreateRecordRequest) -> Result<()>;

    /// Delete every record matching the full key
    async fn delete_record(&self, key: &RecordKey) -> Result<()>;
}
