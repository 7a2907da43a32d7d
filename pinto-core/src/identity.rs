//! Identity computation and import identifiers
//!
//! Identifiers are stored in Terraform state, so their formats are part of
//! the user-facing contract and must stay byte-stable:
//!
//! | Entity | State id | Import id |
//! |--------|----------|-----------|
//! | zone | `{name}.{environment}.{provider}.` | same as the state id |
//! | record | lowercase SHA-1 hex of `{data}-{type}.{name}.{zone}{environment}.{provider}.` | `{type}/{name}/{zone}/{environment}/{provider}` |
//!
//! An empty environment still takes part in both formats.

use sha1::{Digest, Sha1};

use crate::error::{CoreError, CoreResult};
use crate::types::{Record, RecordType, Scope, Zone};

/// State id of a zone.
pub fn zone_id(zone: &Zone) -> String {
    format!(
        "{}.{}",
        zone.name.trim_end_matches('.'),
        scope_suffix(&zone.environment, &zone.provider)
    )
}

/// State id of a record.
pub fn record_id(record: &Record) -> String {
    let input = format!(
        "{}-{}.{}.{}{}",
        record.data,
        record.record_type,
        record.name,
        record.zone,
        scope_suffix(&record.environment, &record.provider)
    );
    hex::encode(Sha1::digest(input.as_bytes()))
}

/// Id of a whole scope (`{environment}.{provider}.`), used by list data sources.
pub fn scope_id(scope: &Scope) -> String {
    scope_suffix(&scope.environment, &scope.provider)
}

fn scope_suffix(environment: &str, provider: &str) -> String {
    format!("{environment}.{provider}.")
}

/// Import id that [`parse_zone_import_id`] turns back into `zone`.
pub fn zone_import_id(zone: &Zone) -> String {
    zone_id(zone)
}

/// Parse `{zoneName}.{environment}.{provider}.`
///
/// The id must mention both default scope values. The last two
/// segments before the trailing dot are provider and environment, everything
/// in front of them is the zone name.
pub fn parse_zone_import_id(
    id: &str,
    default_environment: &str,
    default_provider: &str,
) -> CoreResult<Zone> {
    let invalid = || {
        CoreError::ImportFormat(format!(
            "zone id {id:?} has to be of format \"{{zoneName}}.{{environment}}.{{provider}}.\""
        ))
    };

    if !id.contains(default_environment) || !id.contains(default_provider) {
        return Err(invalid());
    }

    let segments: Vec<&str> = id.split('.').collect();
    let [name_segments @ .., environment, provider, ""] = segments.as_slice() else {
        return Err(invalid());
    };
    if name_segments.is_empty() || name_segments.iter().any(|s| s.is_empty()) || provider.is_empty()
    {
        return Err(invalid());
    }

    let name: String = name_segments.iter().map(|s| format!("{s}.")).collect();
    Ok(Zone::new(name, *environment, *provider))
}

/// Import id that [`parse_record_import_id`] turns back into the record's key.
pub fn record_import_id(record: &Record) -> String {
    format!(
        "{}/{}/{}/{}/{}",
        record.record_type, record.name, record.zone, record.environment, record.provider
    )
}

/// Key parsed from a record import id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordImportKey {
    pub record_type: RecordType,
    pub name: String,
    pub zone: String,
    pub environment: String,
    pub provider: String,
}

impl RecordImportKey {
    pub fn scope(&self) -> Scope {
        Scope::new(&self.provider, &self.environment)
    }
}

/// Parse `{type}/{name}/{zone}/{environment}/{provider}` (exactly five parts).
pub fn parse_record_import_id(id: &str) -> CoreResult<RecordImportKey> {
    let parts: Vec<&str> = id.split('/').collect();
    let [record_type, name, zone, environment, provider] = parts.as_slice() else {
        return Err(CoreError::ImportFormat(format!(
            "record id {id:?} has to be of format \"{{type}}/{{name}}/{{zone}}/{{environment}}/{{provider}}\""
        )));
    };
    let record_type = record_type
        .parse::<RecordType>()
        .map_err(|e| CoreError::ImportFormat(format!("record id {id:?}: {e}")))?;

    Ok(RecordImportKey {
        record_type,
        name: (*name).to_string(),
        zone: (*zone).to_string(),
        environment: (*environment).to_string(),
        provider: (*provider).to_string(),
    })
}
