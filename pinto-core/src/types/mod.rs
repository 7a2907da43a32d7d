//! Type definitions module

mod attributes;
mod record;
mod zone;

pub use attributes::{
    RecordAttributes, RecordDataAttributes, RecordSummary, RecordsDataAttributes, ZoneAttributes,
    ZoneDataAttributes, ZoneSummary, ZonesDataAttributes,
};
pub use record::{DEFAULT_TTL, Record};
pub use zone::Zone;

// Re-export gateway types
pub use pinto_api::{RecordType, Scope};
