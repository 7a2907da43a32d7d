use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ApiError;

// ============ Scope ============

/// Provider/environment slice every Pinto call is scoped to.
///
/// An empty `environment` is a legitimate value. It is left out of query
/// strings and request bodies, which the API treats as "no environment".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Scope {
    /// DNS backend identifier, e.g. `"digitalocean"`.
    pub provider: String,
    /// Logical deployment slice, e.g. `"prod1"`. May be empty.
    pub environment: String,
}

impl Scope {
    pub fn new(provider: impl Into<String>, environment: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            environment: environment.into(),
        }
    }

    /// Environment as an optional parameter (`None` when empty).
    pub fn environment_param(&self) -> Option<&str> {
        if self.environment.is_empty() {
            None
        } else {
            Some(&self.environment)
        }
    }

    pub(crate) fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("Provider", self.provider.clone())];
        if let Some(env) = self.environment_param() {
            pairs.push(("Environment", env.to_string()));
        }
        pairs
    }
}

// ============ Record Type ============

/// DNS record types accepted by the Pinto API.
///
/// Parsing is case-sensitive: the type string is part of a record's identity
/// digest, so `"txt"` and `"TXT"` must not silently become the same value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordType {
    A,
    Aaaa,
    Caa,
    Cname,
    Mx,
    Ns,
    Ptr,
    Soa,
    Srv,
    Txt,
}

impl RecordType {
    pub const ALL: [Self; 10] = [
        Self::A,
        Self::Aaaa,
        Self::Caa,
        Self::Cname,
        Self::Mx,
        Self::Ns,
        Self::Ptr,
        Self::Soa,
        Self::Srv,
        Self::Txt,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::Aaaa => "AAAA",
            Self::Caa => "CAA",
            Self::Cname => "CNAME",
            Self::Mx => "MX",
            Self::Ns => "NS",
            Self::Ptr => "PTR",
            Self::Soa => "SOA",
            Self::Srv => "SRV",
            Self::Txt => "TXT",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordType {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ApiError::Serialization {
                operation: "RECORD TYPE".to_string(),
                detail: format!("unsupported record type: {s}"),
            })
    }
}

// ============ Wire Entities ============

/// Zone as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Zone {
    pub name: String,
}

/// Record as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: RecordType,
    pub class: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    pub data: String,
}

// ============ Requests ============

/// Body of `POST /api/dns/zones`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateZoneRequest {
    pub provider: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
    pub name: String,
}

impl CreateZoneRequest {
    pub fn new(scope: &Scope, name: impl Into<String>) -> Self {
        Self {
            provider: scope.provider.clone(),
            environment: scope.environment_param().map(str::to_string),
            name: name.into(),
        }
    }
}

/// Body of `POST /api/dns/records`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRecordRequest {
    pub provider: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
    pub zone: String,
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: RecordType,
    pub class: String,
    pub ttl: u32,
    pub data: String,
}

/// Filter for `GET /api/dns/records`.
///
/// `zone` is always sent; `name` and `record_type` narrow the result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordQuery {
    pub scope: Scope,
    pub zone: String,
    pub name: Option<String>,
    pub record_type: Option<RecordType>,
}

impl RecordQuery {
    /// Query listing every record of a zone.
    pub fn zone(scope: Scope, zone: impl Into<String>) -> Self {
        Self {
            scope,
            zone: zone.into(),
            name: None,
            record_type: None,
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_type(mut self, record_type: RecordType) -> Self {
        self.record_type = Some(record_type);
        self
    }

    pub(crate) fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = self.scope.query_pairs();
        pairs.push(("Zone", self.zone.clone()));
        if let Some(ref name) = self.name {
            pairs.push(("Name", name.clone()));
        }
        if let Some(record_type) = self.record_type {
            pairs.push(("RecordType", record_type.as_str().to_string()));
        }
        pairs
    }
}

/// Full key of `DELETE /api/dns/records`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordKey {
    pub scope: Scope,
    pub zone: String,
    pub name: String,
    pub record_type: RecordType,
}

impl RecordKey {
    pub(crate) fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = self.scope.query_pairs();
        pairs.push(("Zone", self.zone.clone()));
        pairs.push(("Name", self.name.clone()));
        pairs.push(("RecordType", self.record_type.as_str().to_string()));
        pairs
    }
}

// ============ Access Options ============

/// Value of the `X-Api-Options` header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiOptions {
    pub access_options: AccessOptions,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessOptions {
    pub provider: String,
    pub environment: String,
    pub credentials_id: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn record_type_parse_is_case_sensitive() {
        assert_eq!("TXT".parse::<RecordType>().unwrap(), RecordType::Txt);
        assert_eq!("AAAA".parse::<RecordType>().unwrap(), RecordType::Aaaa);
        assert!("txt".parse::<RecordType>().is_err());
        assert!("LOC".parse::<RecordType>().is_err());
    }

    #[test]
    fn record_type_serde_uses_wire_names() {
        for t in RecordType::ALL {
            let json = serde_json::to_string(&t).unwrap();
            assert_eq!(json, format!("\"{}\"", t.as_str()));
        }
    }

    #[test]
    fn empty_environment_is_left_out_of_queries() {
        let scope = Scope::new("digitalocean", "");
        assert_eq!(
            scope.query_pairs(),
            vec![("Provider", "digitalocean".to_string())]
        );

        let scope = Scope::new("digitalocean", "prod1");
        assert_eq!(
            scope.query_pairs(),
            vec![
                ("Provider", "digitalocean".to_string()),
                ("Environment", "prod1".to_string())
            ]
        );
    }

    #[test]
    fn record_query_pairs_include_optional_filters() {
        let q = RecordQuery::zone(Scope::new("digitalocean", "prod1"), "env0.co.")
            .with_name("www")
            .with_type(RecordType::A);
        let pairs = q.query_pairs();
        assert!(pairs.contains(&("Zone", "env0.co.".to_string())));
        assert!(pairs.contains(&("Name", "www".to_string())));
        assert!(pairs.contains(&("RecordType", "A".to_string())));

        let q = RecordQuery::zone(Scope::new("digitalocean", ""), "env0.co.");
        assert_eq!(q.query_pairs().len(), 2);
    }

    #[test]
    fn create_zone_request_omits_empty_environment() {
        let req = CreateZoneRequest::new(&Scope::new("digitalocean", ""), "env0.co.");
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"provider": "digitalocean", "name": "env0.co."})
        );
    }

    #[test]
    fn record_deserializes_without_ttl() {
        let r: Record = serde_json::from_str(
            r#"{"name":"www","type":"CNAME","class":"IN","data":"example.com."}"#,
        )
        .unwrap();
        assert_eq!(r.record_type, RecordType::Cname);
        assert_eq!(r.ttl, None);
    }

    #[test]
    fn api_options_header_shape() {
        let opts = ApiOptions {
            access_options: AccessOptions {
                provider: "digitalocean".into(),
                environment: "prod1".into(),
                credentials_id: "cred-1".into(),
            },
        };
        assert_eq!(
            serde_json::to_string(&opts).unwrap(),
            r#"{"accessOptions":{"provider":"digitalocean","environment":"prod1","credentialsId":"cred-1"}}"#
        );
    }
}
