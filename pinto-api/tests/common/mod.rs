//! Shared helpers for live Pinto integration tests

#![allow(dead_code)]

use std::env;

use pinto_api::{
    ClientConfig, ClientCredentials, CreateRecordRequest, PintoApi, PintoClient, RecordKey,
    RecordQuery, RecordType, Scope,
};

/// Skip the test when an environment variable is missing.
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("skipping test: missing environment variable {}", $var);
                return;
            }
        )+
    };
}

/// Assert that an `Option` is `Some` and unwrap it (fails the test otherwise).
#[macro_export]
macro_rules! require_some {
    ($expr:expr $(,)?) => {{
        let opt = $expr;
        assert!(opt.is_some(), "expected Some(..), got None");
        let Some(val) = opt else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let opt = $expr;
        assert!(opt.is_some(), "{}", format_args!($($msg)+));
        let Some(val) = opt else {
            return;
        };
        val
    }};
}

/// Assert that a `Result` is `Ok` and unwrap it (fails the test otherwise).
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(
            res.is_ok(),
            "{}: {res:?}",
            format_args!($($msg)+)
        );
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

/// Unique record name so parallel runs never collide
pub fn generate_test_record_name() -> String {
    let uuid = uuid::Uuid::new_v4();
    format!("_test-{}", &uuid.to_string()[..8])
}

/// Live test context: client, scope and an existing zone to write records into
pub struct TestContext {
    pub client: PintoClient,
    pub scope: Scope,
    pub zone: String,
}

impl TestContext {
    /// Build a context from `PINTO_*` variables and `TEST_ZONE`
    pub fn from_env() -> Option<Self> {
        let base_url = env::var("PINTO_BASE_URL").ok()?;
        let provider = env::var("PINTO_PROVIDER").ok()?;
        let environment = env::var("PINTO_ENVIRONMENT").unwrap_or_default();
        let zone = env::var("TEST_ZONE").ok()?;

        let client_credentials = match (
            env::var("PINTO_TOKEN_URL"),
            env::var("PINTO_CLIENT_ID"),
            env::var("PINTO_CLIENT_SECRET"),
        ) {
            (Ok(token_url), Ok(id), Ok(secret)) => Some(
                ClientCredentials::new(token_url, id, secret)
                    .with_scope_list(&env::var("PINTO_CLIENT_SCOPE").unwrap_or_default()),
            ),
            _ => None,
        };

        let client = PintoClient::new(ClientConfig {
            base_url,
            api_key: env::var("PINTO_API_KEY").ok(),
            client_credentials,
            api_options: None,
        })
        .ok()?;

        Some(Self {
            client,
            scope: Scope::new(provider, environment),
            zone,
        })
    }

    pub fn txt_request(&self, name: &str, data: &str) -> CreateRecordRequest {
        CreateRecordRequest {
            provider: self.scope.provider.clone(),
            environment: self.scope.environment_param().map(str::to_string),
            zone: self.zone.clone(),
            name: name.to_string(),
            record_type: RecordType::Txt,
            class: "IN".to_string(),
            ttl: 600,
            data: data.to_string(),
        }
    }

    pub fn txt_key(&self, name: &str) -> RecordKey {
        RecordKey {
            scope: self.scope.clone(),
            zone: self.zone.clone(),
            name: name.to_string(),
            record_type: RecordType::Txt,
        }
    }

    /// Delete every leftover `_test-` record of the zone
    pub async fn cleanup_all_test_records(&self) {
        let query = RecordQuery::zone(self.scope.clone(), self.zone.clone());
        if let Ok(records) = self.client.list_records(&query).await {
            for record in records {
                if record.name.starts_with("_test-") {
                    let _ = self
                        .client
                        .delete_record(&RecordKey {
                            scope: self.scope.clone(),
                            zone: self.zone.clone(),
                            name: record.name.clone(),
                            record_type: record.record_type,
                        })
                        .await;
                }
            }
        }
    }
}
