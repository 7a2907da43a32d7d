use std::sync::Arc;

use async_trait::async_trait;
use pinto_api::{
    ApiError, CreateRecordRequest, CreateZoneRequest, PintoApi, Record, RecordKey, RecordQuery,
    Result, Scope, Zone,
};
use pinto_core::{PintoProvider, ProviderContext, ScopeDefaults};
use tokio::sync::RwLock;
use tokio::time::Duration;

use super::ProviderServer;

/// Zone-only in-memory gateway. Record calls fail with 501.
#[derive(Default)]
pub struct ZoneOnlyGateway {
    pub(crate) zones: RwLock<Vec<String>>,
    /// Sleep before answering, to exercise the deadline
    pub delay: Option<Duration>,
}

fn unsupported(operation: &str) -> ApiError {
    ApiError::Http {
        operation: operation.to_string(),
        status: 501,
        message: "501 Not Implemented".to_string(),
        body: String::new(),
    }
}

#[async_trait]
impl PintoApi for ZoneOnlyGateway {
    async fn list_zones(&self, _scope: &Scope) -> Result<Vec<Zone>> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        Ok(self
            .zones
            .read()
            .await
            .iter()
            .map(|name| Zone { name: name.clone() })
            .collect())
    }

    async fn create_zone(&self, req: &CreateZoneRequest) -> Result<()> {
        self.zones.write().await.push(req.name.clone());
        Ok(())
    }

    async fn get_zone(&self, name: &str, _scope: &Scope) -> Result<Zone> {
        if self.zones.read().await.iter().any(|z| z == name) {
            Ok(Zone {
                name: name.to_string(),
            })
        } else {
            Err(ApiError::Http {
                operation: "ZONE READ".to_string(),
                status: 404,
                message: "404 Not Found".to_string(),
                body: "zone not found".to_string(),
            })
        }
    }

    async fn delete_zone(&self, name: &str, _scope: &Scope) -> Result<()> {
        self.zones.write().await.retain(|z| z != name);
        Ok(())
    }

    async fn list_records(&self, _query: &RecordQuery) -> Result<Vec<Record>> {
        Err(unsupported("RECORD READ"))
    }

    async fn create_record(&self, _req: &CreateRecordRequest) -> Result<()> {
        Err(unsupported("RECORD CREATE"))
    }

    async fn delete_record(&self, _key: &RecordKey) -> Result<()> {
        Err(unsupported("RECORD DELETE"))
    }
}

pub fn server_with(gateway: ZoneOnlyGateway, deadline: Duration) -> ProviderServer {
    let ctx = ProviderContext::new(
        Arc::new(gateway),
        ScopeDefaults::new(Some("digitalocean"), "prod1"),
    );
    ProviderServer::new(PintoProvider::new(Arc::new(ctx)), deadline)
}
