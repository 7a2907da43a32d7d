//! Read-only data sources

use std::sync::Arc;

use pinto_api::RecordQuery;

use crate::config::ProviderContext;
use crate::error::{CoreError, CoreResult};
use crate::identity::{record_id, scope_id, zone_id};
use crate::types::{
    Record, RecordDataAttributes, RecordSummary, RecordType, RecordsDataAttributes, Zone,
    ZoneDataAttributes, ZoneSummary, ZonesDataAttributes,
};

/// Data sources `pinto_dns_zone`, `pinto_dns_zones`, `pinto_dns_record`, `pinto_dns_records`
pub struct DataSourceService {
    ctx: Arc<ProviderContext>,
}

impl DataSourceService {
    #[must_use]
    pub fn new(ctx: Arc<ProviderContext>) -> Self {
        Self { ctx }
    }

    /// Single zone. Fails unless the zone exists.
    pub async fn zone(&self, mut attrs: ZoneDataAttributes) -> CoreResult<ZoneDataAttributes> {
        let scope = self.ctx.defaults.resolve(
            attrs.pinto_provider.as_deref(),
            attrs.pinto_environment.as_deref(),
        )?;
        log::info!(
            "[pinto] Read zone {} at {} for {:?}",
            attrs.name,
            scope.provider,
            scope.environment
        );
        self.ctx.gateway().get_zone(&attrs.name, &scope).await?;
        attrs.id = Some(zone_id(&Zone::new(
            &attrs.name,
            scope.environment,
            scope.provider,
        )));
        Ok(attrs)
    }

    /// Every zone of the scope.
    pub async fn zones(&self, mut attrs: ZonesDataAttributes) -> CoreResult<ZonesDataAttributes> {
        let scope = self.ctx.defaults.resolve(
            attrs.pinto_provider.as_deref(),
            attrs.pinto_environment.as_deref(),
        )?;
        log::info!(
            "[pinto] Read zones at {} for {:?}",
            scope.provider,
            scope.environment
        );
        let zones = self.ctx.gateway().list_zones(&scope).await?;

        attrs.zones = zones
            .into_iter()
            .map(|zone| {
                let id = zone_id(&Zone::new(
                    &zone.name,
                    &scope.environment,
                    &scope.provider,
                ));
                ZoneSummary { id, name: zone.name }
            })
            .collect();
        attrs.id = Some(scope_id(&scope));
        Ok(attrs)
    }

    /// Exactly one record matching zone, name and type.
    pub async fn record(&self, mut attrs: RecordDataAttributes) -> CoreResult<RecordDataAttributes> {
        let scope = self.ctx.defaults.resolve(
            attrs.pinto_provider.as_deref(),
            attrs.pinto_environment.as_deref(),
        )?;
        let what = || {
            format!(
                "record {} {} in zone {}",
                attrs.record_type, attrs.name, attrs.zone
            )
        };
        let query = RecordQuery::zone(scope.clone(), &attrs.zone)
            .with_name(&attrs.name)
            .with_type(attrs.record_type);
        let mut found = self.ctx.gateway().list_records(&query).await?;

        let remote = match found.len() {
            0 => return Err(CoreError::NotFound(what())),
            1 => found.remove(0),
            count => {
                return Err(CoreError::AmbiguousResult {
                    what: what(),
                    count,
                });
            }
        };

        let record = Record::from_remote(remote, &attrs.zone, &scope);
        attrs.id = Some(record_id(&record));
        attrs.class = Some(record.class);
        attrs.ttl = record.ttl;
        attrs.data = Some(record.data);
        Ok(attrs)
    }

    /// Records of a zone, optionally narrowed by type and name.
    pub async fn records(
        &self,
        mut attrs: RecordsDataAttributes,
    ) -> CoreResult<RecordsDataAttributes> {
        let scope = self.ctx.defaults.resolve(
            attrs.pinto_provider.as_deref(),
            attrs.pinto_environment.as_deref(),
        )?;
        log::info!(
            "[pinto] Read records from zone {} at {} for {:?}",
            attrs.zone,
            scope.provider,
            scope.environment
        );

        let mut query = RecordQuery::zone(scope.clone(), &attrs.zone);
        if let Some(record_type) = attrs.record_type.as_deref().filter(|t| !t.is_empty()) {
            let record_type = record_type
                .parse::<RecordType>()
                .map_err(|e| CoreError::Configuration(format!("record_type filter: {e}")))?;
            query = query.with_type(record_type);
        }
        if let Some(name) = attrs.name.as_deref().filter(|n| !n.is_empty()) {
            query = query.with_name(name);
        }
        let found = self.ctx.gateway().list_records(&query).await?;

        attrs.records = found
            .into_iter()
            .map(|remote| {
                let record = Record::from_remote(remote, &attrs.zone, &scope);
                RecordSummary {
                    id: record_id(&record),
                    name: record.name,
                    record_type: record.record_type,
                    class: record.class,
                    ttl: record.ttl,
                    data: record.data,
                }
            })
            .collect();
        attrs.id = Some(zone_id(&Zone::new(
            &attrs.zone,
            scope.environment,
            scope.provider,
        )));
        Ok(attrs)
    }
}
