//! Zone reconciler

use std::sync::Arc;

use crate::config::ProviderContext;
use crate::error::CoreResult;
use crate::identity::{parse_zone_import_id, zone_id};
use crate::mapper::{compute_zone_change, to_zone, zone_attributes};
use crate::services::ReplaceOutcome;
use crate::types::{Zone, ZoneAttributes};

/// `pinto_dns_zone` lifecycle
pub struct ZoneService {
    ctx: Arc<ProviderContext>,
}

impl ZoneService {
    #[must_use]
    pub fn new(ctx: Arc<ProviderContext>) -> Self {
        Self { ctx }
    }

    /// Create the zone and set its identity.
    pub async fn create(&self, mut attrs: ZoneAttributes) -> CoreResult<ZoneAttributes> {
        let zone = to_zone(&attrs, &self.ctx.defaults)?;
        self.ctx.gateway().create_zone(&zone.create_request()).await?;
        attrs.id = Some(zone_id(&zone));
        Ok(attrs)
    }

    /// Check the zone still exists remotely.
    ///
    /// A failed lookup is returned as an error and the state keeps its id.
    /// Records behave differently: a missing record is dropped from state.
    pub async fn read(&self, mut attrs: ZoneAttributes) -> CoreResult<ZoneAttributes> {
        let zone = to_zone(&attrs, &self.ctx.defaults)?;
        let remote = self
            .ctx
            .gateway()
            .get_zone(&zone.name, &zone.scope())
            .await?;
        let zone = Zone { name: remote.name, ..zone };
        attrs.id = Some(zone_id(&zone));
        attrs.name = zone.name;
        Ok(attrs)
    }

    /// Rename by deleting the old zone and creating the new one.
    pub async fn update(
        &self,
        prior: &ZoneAttributes,
        mut planned: ZoneAttributes,
    ) -> CoreResult<ZoneAttributes> {
        let change = compute_zone_change(prior, &planned, &self.ctx.defaults)?;
        if change.is_empty() {
            planned.id = Some(zone_id(&change.new));
            return Ok(planned);
        }
        log::info!(
            "[pinto] Replacing zone {} with {} (changed: {})",
            change.old.name,
            change.new.name,
            change.changed.join(", ")
        );
        self.replace(&change.old, &change.new)
            .await
            .into_result(zone_id(&change.old))?;
        planned.id = Some(zone_id(&change.new));
        Ok(planned)
    }

    /// Delete `old`, then create `new`.
    pub async fn replace(&self, old: &Zone, new: &Zone) -> ReplaceOutcome {
        let gateway = self.ctx.gateway();
        ReplaceOutcome::run(
            gateway.delete_zone(&old.name, &old.scope()),
            gateway.create_zone(&new.create_request()),
        )
        .await
    }

    pub async fn delete(&self, attrs: &ZoneAttributes) -> CoreResult<()> {
        let zone = to_zone(attrs, &self.ctx.defaults)?;
        self.ctx
            .gateway()
            .delete_zone(&zone.name, &zone.scope())
            .await?;
        Ok(())
    }

    /// Import from `{zoneName}.{environment}.{provider}.`. No remote call is made.
    pub async fn import(&self, id: &str) -> CoreResult<ZoneAttributes> {
        log::info!("[pinto] Importing zone with id {id}");
        let defaults = &self.ctx.defaults;
        let zone = parse_zone_import_id(
            id,
            &defaults.environment,
            defaults.provider.as_deref().unwrap_or_default(),
        )?;
        log::debug!("[pinto] Zone name = {}", zone.name);
        Ok(zone_attributes(&zone))
    }
}
