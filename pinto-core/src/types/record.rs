use pinto_api::{CreateRecordRequest, RecordKey, RecordQuery, RecordType, Scope};

/// TTL (seconds) given to records created without one.
pub const DEFAULT_TTL: u32 = 3600;

/// A DNS resource record scoped to a zone, provider and environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub name: String,
    pub zone: String,
    pub record_type: RecordType,
    pub class: String,
    /// Unset until create applies [`DEFAULT_TTL`].
    pub ttl: Option<u32>,
    pub data: String,
    pub environment: String,
    pub provider: String,
}

impl Record {
    pub fn scope(&self) -> Scope {
        Scope::new(&self.provider, &self.environment)
    }

    /// Full key addressing this record remotely.
    pub fn key(&self) -> RecordKey {
        RecordKey {
            scope: self.scope(),
            zone: self.zone.clone(),
            name: self.name.clone(),
            record_type: self.record_type,
        }
    }

    /// Filter matching this record's name and type inside its zone.
    pub fn query(&self) -> RecordQuery {
        RecordQuery::zone(self.scope(), &self.zone)
            .with_name(&self.name)
            .with_type(self.record_type)
    }

    /// TTL to send on create, falling back to [`DEFAULT_TTL`].
    pub fn effective_ttl(&self) -> u32 {
        self.ttl.unwrap_or(DEFAULT_TTL)
    }

    pub fn create_request(&self) -> CreateRecordRequest {
        CreateRecordRequest {
            provider: self.provider.clone(),
            environment: self.scope().environment_param().map(str::to_string),
            zone: self.zone.clone(),
            name: self.name.clone(),
            record_type: self.record_type,
            class: self.class.clone(),
            ttl: self.effective_ttl(),
            data: self.data.clone(),
        }
    }

    /// Build from an API record found in `zone` of `scope`.
    pub fn from_remote(remote: pinto_api::Record, zone: impl Into<String>, scope: &Scope) -> Self {
        Self {
            name: remote.name,
            zone: zone.into(),
            record_type: remote.record_type,
            class: remote.class,
            ttl: remote.ttl,
            data: remote.data,
            environment: scope.environment.clone(),
            provider: scope.provider.clone(),
        }
    }
}
