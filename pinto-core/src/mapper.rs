//! Resource mapper: declarative attributes <-> domain entities
//!
//! Provider and environment come from the per-resource override first and
//! the provider defaults second. Empty strings count as unset, as does a
//! `ttl` of zero. No TTL default is applied here; that happens on create.

use crate::config::ScopeDefaults;
use crate::error::CoreResult;
use crate::identity::{record_id, zone_id};
use crate::types::{Record, RecordAttributes, Zone, ZoneAttributes};

/// Old and new entity of an update, plus the names of the changed fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeSet<T> {
    pub old: T,
    pub new: T,
    pub changed: Vec<&'static str>,
}

impl<T> ChangeSet<T> {
    pub fn is_empty(&self) -> bool {
        self.changed.is_empty()
    }
}

pub fn to_zone(attrs: &ZoneAttributes, defaults: &ScopeDefaults) -> CoreResult<Zone> {
    let scope = defaults.resolve(
        attrs.pinto_provider.as_deref(),
        attrs.pinto_environment.as_deref(),
    )?;
    Ok(Zone::new(&attrs.name, scope.environment, scope.provider))
}

/// State for `zone` with its identity, scope overrides set explicitly.
pub fn zone_attributes(zone: &Zone) -> ZoneAttributes {
    ZoneAttributes {
        id: Some(zone_id(zone)),
        name: zone.name.clone(),
        pinto_provider: Some(zone.provider.clone()),
        pinto_environment: Some(zone.environment.clone()),
    }
}

pub fn to_record(attrs: &RecordAttributes, defaults: &ScopeDefaults) -> CoreResult<Record> {
    let scope = defaults.resolve(
        attrs.pinto_provider.as_deref(),
        attrs.pinto_environment.as_deref(),
    )?;
    Ok(Record {
        name: attrs.name.clone(),
        zone: attrs.zone.clone(),
        record_type: attrs.record_type,
        class: attrs.class.clone(),
        ttl: attrs.ttl.filter(|ttl| *ttl != 0),
        data: attrs.data.clone(),
        environment: scope.environment,
        provider: scope.provider,
    })
}

/// State for `record` with its identity, scope overrides set explicitly.
pub fn record_attributes(record: &Record) -> RecordAttributes {
    RecordAttributes {
        id: Some(record_id(record)),
        zone: record.zone.clone(),
        name: record.name.clone(),
        record_type: record.record_type,
        class: record.class.clone(),
        ttl: record.ttl,
        data: record.data.clone(),
        pinto_provider: Some(record.provider.clone()),
        pinto_environment: Some(record.environment.clone()),
    }
}

/// Old and new zone of an update. Only `name` and the scope can differ.
pub fn compute_zone_change(
    old: &ZoneAttributes,
    new: &ZoneAttributes,
    defaults: &ScopeDefaults,
) -> CoreResult<ChangeSet<Zone>> {
    let new_zone = to_zone(new, defaults)?;
    let old_zone = to_zone(old, defaults)?;
    let mut changed = Vec::new();
    if old_zone.name != new_zone.name {
        changed.push("name");
    }
    if old_zone.provider != new_zone.provider {
        changed.push("pinto_provider");
    }
    if old_zone.environment != new_zone.environment {
        changed.push("pinto_environment");
    }
    Ok(ChangeSet {
        old: old_zone,
        new: new_zone,
        changed,
    })
}

/// Old and new record of an update.
///
/// Both start from the new values. Each field that differs in `old` is
/// copied over to the old record, so unchanged fields are identical in both.
pub fn compute_change_set(
    old: &RecordAttributes,
    new: &RecordAttributes,
    defaults: &ScopeDefaults,
) -> CoreResult<ChangeSet<Record>> {
    let new_record = to_record(new, defaults)?;
    let prior = to_record(old, defaults)?;
    let mut old_record = new_record.clone();
    let mut changed = Vec::new();

    macro_rules! diff {
        ($($field:ident => $label:literal),+ $(,)?) => {
            $(
                if prior.$field != new_record.$field {
                    old_record.$field.clone_from(&prior.$field);
                    changed.push($label);
                }
            )+
        };
    }
    diff! {
        name => "name",
        zone => "zone",
        record_type => "type",
        class => "class",
        ttl => "ttl",
        data => "data",
        provider => "pinto_provider",
        environment => "pinto_environment",
    }

    Ok(ChangeSet {
        old: old_record,
        new: new_record,
        changed,
    })
}
