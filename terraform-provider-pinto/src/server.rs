//! Request handling on top of [`PintoProvider`]

use pinto_core::{CoreError, DATA_SOURCES, Diagnostic, PintoProvider, RESOURCES};
use tokio::time::{Duration, timeout};

use crate::protocol::{Request, Response, SchemaInfo};

/// Default deadline for one host call (seconds)
pub const DEFAULT_DEADLINE_SECS: u64 = 300;

pub struct ProviderServer {
    provider: PintoProvider,
    deadline: Duration,
}

impl ProviderServer {
    pub fn new(provider: PintoProvider, deadline: Duration) -> Self {
        Self { provider, deadline }
    }

    /// Run one request. Failures become error diagnostics, never panics.
    ///
    /// A call running past the deadline is dropped, which cancels any
    /// in-flight HTTP request, and reported as a failure.
    pub async fn handle(&self, request: Request) -> Response {
        let operation = request.operation();
        let type_name = request.type_name().unwrap_or("-").to_string();
        tracing::debug!("Handling {operation} for {type_name}");

        let result = match timeout(self.deadline, self.dispatch(request)).await {
            Ok(result) => result,
            Err(_) => {
                tracing::error!("{operation} for {type_name} exceeded the deadline");
                return Response::error(Diagnostic {
                    severity: "error",
                    summary: format!(
                        "{operation} of {type_name} did not finish within {}s",
                        self.deadline.as_secs()
                    ),
                    detail: None,
                });
            }
        };

        match result {
            Ok(response) => response,
            Err(e) => {
                if e.is_expected() {
                    tracing::warn!("{operation} for {type_name} failed: {e}");
                } else {
                    tracing::error!("{operation} for {type_name} failed: {e}");
                }
                Response::error(Diagnostic::from(&e))
            }
        }
    }

    async fn dispatch(&self, request: Request) -> Result<Response, CoreError> {
        let provider = &self.provider;
        let response = match request {
            Request::Schema => Response::schema(SchemaInfo {
                resources: RESOURCES.to_vec(),
                data_sources: DATA_SOURCES.to_vec(),
            }),
            Request::Create {
                type_name,
                planned_state,
            } => Response::state(provider.create(&type_name, planned_state).await?),
            Request::Read { type_name, state } => {
                Response::state(provider.read(&type_name, state).await?)
            }
            Request::Update {
                type_name,
                prior_state,
                planned_state,
            } => Response::state(
                provider
                    .update(&type_name, prior_state, planned_state)
                    .await?,
            ),
            Request::Delete { type_name, state } => {
                provider.delete(&type_name, state).await?;
                Response::empty()
            }
            Request::Import { type_name, id } => {
                Response::state(provider.import(&type_name, &id).await?)
            }
            Request::ReadDataSource { type_name, config } => {
                Response::state(provider.read_data_source(&type_name, config).await?)
            }
        };
        Ok(response)
    }
}

#[cfg(test)]
#[path = "test_mocks.rs"]
#[allow(clippy::unwrap_used, clippy::panic)]
pub(crate) mod test_mocks;

#[cfg(test)]
#[path = "server_tests.rs"]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests;
