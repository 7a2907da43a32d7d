//! Record reconciler

use std::sync::Arc;

use crate::config::ProviderContext;
use crate::error::{CoreError, CoreResult};
use crate::identity::{parse_record_import_id, record_id};
use crate::mapper::{compute_change_set, record_attributes, to_record};
use crate::services::ReplaceOutcome;
use crate::types::{Record, RecordAttributes};

/// `pinto_dns_record` lifecycle
pub struct RecordService {
    ctx: Arc<ProviderContext>,
}

impl RecordService {
    #[must_use]
    pub fn new(ctx: Arc<ProviderContext>) -> Self {
        Self { ctx }
    }

    /// Create the record. An unset `ttl` becomes [`DEFAULT_TTL`](crate::types::DEFAULT_TTL) and is written back.
    pub async fn create(&self, mut attrs: RecordAttributes) -> CoreResult<RecordAttributes> {
        let mut record = to_record(&attrs, &self.ctx.defaults)?;
        record.ttl = Some(record.effective_ttl());
        self.ctx
            .gateway()
            .create_record(&record.create_request())
            .await?;
        attrs.ttl = record.ttl;
        attrs.id = Some(record_id(&record));
        Ok(attrs)
    }

    /// Refresh the record from the remote side.
    ///
    /// No match clears the id, which drops the record from state. Otherwise
    /// the first match wins and its `ttl` is taken over.
    pub async fn read(&self, mut attrs: RecordAttributes) -> CoreResult<RecordAttributes> {
        let record = to_record(&attrs, &self.ctx.defaults)?;
        let found = self.ctx.gateway().list_records(&record.query()).await?;

        let Some(remote) = found.first() else {
            log::warn!(
                "[pinto] Record {} {} in zone {} not found, removing it from state",
                record.record_type,
                record.name,
                record.zone
            );
            attrs.id = None;
            return Ok(attrs);
        };
        if found.len() > 1 {
            log::warn!(
                "[pinto] {} records match {} {} in zone {}, using the first",
                found.len(),
                record.record_type,
                record.name,
                record.zone
            );
        }

        if remote.ttl.is_some() {
            attrs.ttl = remote.ttl;
        }
        attrs.id = Some(record_id(&record));
        Ok(attrs)
    }

    /// Delete the old record and create the new one.
    pub async fn update(
        &self,
        prior: &RecordAttributes,
        mut planned: RecordAttributes,
    ) -> CoreResult<RecordAttributes> {
        let mut change = compute_change_set(prior, &planned, &self.ctx.defaults)?;
        change.new.ttl = Some(change.new.effective_ttl());
        // An unset TTL and the default TTL describe the same remote record.
        let same_ttl = change.old.effective_ttl() == change.new.effective_ttl();
        if change.is_empty() || (same_ttl && change.changed == ["ttl"]) {
            planned.ttl = change.new.ttl;
            planned.id = Some(record_id(&change.new));
            return Ok(planned);
        }
        log::info!(
            "[pinto] Replacing record {} {} in zone {} (changed: {})",
            change.old.record_type,
            change.old.name,
            change.old.zone,
            change.changed.join(", ")
        );
        self.replace(&change.old, &change.new)
            .await
            .into_result(record_id(&change.old))?;
        planned.ttl = change.new.ttl;
        planned.id = Some(record_id(&change.new));
        Ok(planned)
    }

    /// Delete `old`, then create `new`.
    pub async fn replace(&self, old: &Record, new: &Record) -> ReplaceOutcome {
        let gateway = self.ctx.gateway();
        ReplaceOutcome::run(
            gateway.delete_record(&old.key()),
            gateway.create_record(&new.create_request()),
        )
        .await
    }

    pub async fn delete(&self, attrs: &RecordAttributes) -> CoreResult<()> {
        let record = to_record(attrs, &self.ctx.defaults)?;
        self.ctx.gateway().delete_record(&record.key()).await?;
        Ok(())
    }

    /// Import from `{type}/{name}/{zone}/{environment}/{provider}`.
    pub async fn import(&self, id: &str) -> CoreResult<RecordAttributes> {
        let key = parse_record_import_id(id)?;
        log::debug!("[pinto] Retrieving information for {id}");

        let scope = key.scope();
        let query = pinto_api::RecordQuery::zone(scope.clone(), &key.zone)
            .with_name(&key.name)
            .with_type(key.record_type);
        let mut found = self.ctx.gateway().list_records(&query).await?;

        match found.len() {
            0 => Err(CoreError::NotFound(format!("record {id}"))),
            1 => {
                let remote = found.remove(0);
                let record = Record::from_remote(remote, &key.zone, &scope);
                Ok(record_attributes(&record))
            }
            count => Err(CoreError::AmbiguousResult {
                what: format!("record {id}"),
                count,
            }),
        }
    }
}
