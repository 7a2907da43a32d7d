//! Declarative attribute sets exchanged with the plugin host.
//!
//! Field names follow the Terraform schema. A `None` id in a resource state
//! means the resource is gone and must be dropped from state.

use serde::{Deserialize, Serialize};

use super::RecordType;

/// `pinto_dns_zone` resource
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneAttributes {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub pinto_provider: Option<String>,
    #[serde(default)]
    pub pinto_environment: Option<String>,
}

/// `pinto_dns_record` resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordAttributes {
    #[serde(default)]
    pub id: Option<String>,
    pub zone: String,
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: RecordType,
    pub class: String,
    #[serde(default)]
    pub ttl: Option<u32>,
    pub data: String,
    #[serde(default)]
    pub pinto_provider: Option<String>,
    #[serde(default)]
    pub pinto_environment: Option<String>,
}

/// `pinto_dns_zone` data source
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneDataAttributes {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub pinto_provider: Option<String>,
    #[serde(default)]
    pub pinto_environment: Option<String>,
}

/// `pinto_dns_zones` data source
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZonesDataAttributes {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub pinto_provider: Option<String>,
    #[serde(default)]
    pub pinto_environment: Option<String>,
    #[serde(default)]
    pub zones: Vec<ZoneSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneSummary {
    pub id: String,
    pub name: String,
}

/// `pinto_dns_record` data source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordDataAttributes {
    #[serde(default)]
    pub id: Option<String>,
    pub zone: String,
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: RecordType,
    #[serde(default)]
    pub class: Option<String>,
    #[serde(default)]
    pub ttl: Option<u32>,
    #[serde(default)]
    pub data: Option<String>,
    #[serde(default)]
    pub pinto_provider: Option<String>,
    #[serde(default)]
    pub pinto_environment: Option<String>,
}

/// `pinto_dns_records` data source
///
/// `record_type` stays a string so an empty value can mean "no filter".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordsDataAttributes {
    #[serde(default)]
    pub id: Option<String>,
    pub zone: String,
    #[serde(default)]
    pub record_type: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub pinto_provider: Option<String>,
    #[serde(default)]
    pub pinto_environment: Option<String>,
    #[serde(default)]
    pub records: Vec<RecordSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSummary {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: RecordType,
    pub class: String,
    pub ttl: Option<u32>,
    pub data: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn record_state_decodes_terraform_shape() {
        let attrs: RecordAttributes = serde_json::from_value(json!({
            "zone": "env0.co.",
            "name": "somewhere",
            "type": "TXT",
            "class": "IN",
            "data": "127.0.0.1"
        }))
        .unwrap();
        assert_eq!(attrs.record_type, RecordType::Txt);
        assert_eq!(attrs.id, None);
        assert_eq!(attrs.ttl, None);
        assert_eq!(attrs.pinto_provider, None);
    }

    #[test]
    fn cleared_id_encodes_as_null() {
        let attrs = ZoneAttributes {
            name: "env0.co.".into(),
            ..ZoneAttributes::default()
        };
        let json = serde_json::to_value(&attrs).unwrap();
        assert!(json["id"].is_null());
        assert_eq!(json["name"], "env0.co.");
    }

    #[test]
    fn lowercase_record_type_is_rejected() {
        let result = serde_json::from_value::<RecordAttributes>(json!({
            "zone": "env0.co.", "name": "www", "type": "a", "class": "IN", "data": "1.2.3.4"
        }));
        assert!(result.is_err());
    }
}
