//! JSON messages exchanged with the plugin host over stdin/stdout.

use pinto_core::Diagnostic;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One host call.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "operation", rename_all = "snake_case")]
pub enum Request {
    /// Registered resource and data source names
    Schema,
    Create {
        type_name: String,
        planned_state: Value,
    },
    Read {
        type_name: String,
        state: Value,
    },
    Update {
        type_name: String,
        prior_state: Value,
        planned_state: Value,
    },
    Delete {
        type_name: String,
        state: Value,
    },
    Import {
        type_name: String,
        id: String,
    },
    ReadDataSource {
        type_name: String,
        config: Value,
    },
}

impl Request {
    pub fn operation(&self) -> &'static str {
        match self {
            Self::Schema => "schema",
            Self::Create { .. } => "create",
            Self::Read { .. } => "read",
            Self::Update { .. } => "update",
            Self::Delete { .. } => "delete",
            Self::Import { .. } => "import",
            Self::ReadDataSource { .. } => "read_data_source",
        }
    }

    pub fn type_name(&self) -> Option<&str> {
        match self {
            Self::Schema => None,
            Self::Create { type_name, .. }
            | Self::Read { type_name, .. }
            | Self::Update { type_name, .. }
            | Self::Delete { type_name, .. }
            | Self::Import { type_name, .. }
            | Self::ReadDataSource { type_name, .. } => Some(type_name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaInfo {
    pub resources: Vec<&'static str>,
    pub data_sources: Vec<&'static str>,
}

/// Answer to one host call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<SchemaInfo>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,
}

impl Response {
    pub fn state(state: Value) -> Self {
        Self {
            ok: true,
            state: Some(state),
            schema: None,
            diagnostics: Vec::new(),
        }
    }

    pub fn empty() -> Self {
        Self {
            ok: true,
            state: None,
            schema: None,
            diagnostics: Vec::new(),
        }
    }

    pub fn schema(schema: SchemaInfo) -> Self {
        Self {
            schema: Some(schema),
            ..Self::empty()
        }
    }

    pub fn error(diagnostic: Diagnostic) -> Self {
        Self {
            ok: false,
            diagnostics: vec![diagnostic],
            ..Self::empty()
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_tagged_requests() {
        let req: Request = serde_json::from_value(json!({
            "operation": "read_data_source",
            "type_name": "pinto_dns_zones",
            "config": {}
        }))
        .unwrap();
        assert_eq!(req.operation(), "read_data_source");
        assert_eq!(req.type_name(), Some("pinto_dns_zones"));

        let req: Request = serde_json::from_value(json!({"operation": "schema"})).unwrap();
        assert_eq!(req.type_name(), None);
    }

    #[test]
    fn rejects_unknown_operation() {
        let result = serde_json::from_value::<Request>(json!({"operation": "plan"}));
        assert!(result.is_err());
    }

    #[test]
    fn error_response_shape() {
        let response = Response::error(Diagnostic {
            severity: "error",
            summary: "not found: record www".into(),
            detail: None,
        });
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "ok": false,
                "diagnostics": [{"severity": "error", "summary": "not found: record www"}]
            })
        );
    }
}
