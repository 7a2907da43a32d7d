//! Reconcilers and data sources

mod data_source_service;
mod record_service;
mod zone_service;

pub use data_source_service::DataSourceService;
pub use record_service::RecordService;
pub use zone_service::ZoneService;

use pinto_api::ApiError;

use crate::error::{CoreError, CoreResult};

/// Result of an update performed as delete-old then create-new.
///
/// The backend has no update endpoint and the two calls are not atomic.
/// `DeletedOnly` is the window where the old entity is gone and the new one
/// was never created.
#[derive(Debug)]
pub enum ReplaceOutcome {
    /// Both calls succeeded.
    Replaced,
    /// Delete succeeded, create failed.
    DeletedOnly(ApiError),
    /// Delete failed, nothing changed remotely.
    FailedBeforeDelete(ApiError),
}

impl ReplaceOutcome {
    /// Run `delete`, then `create` only if the delete succeeded.
    pub(crate) async fn run<D, C>(delete: D, create: C) -> Self
    where
        D: Future<Output = pinto_api::Result<()>>,
        C: Future<Output = pinto_api::Result<()>>,
    {
        if let Err(e) = delete.await {
            return Self::FailedBeforeDelete(e);
        }
        match create.await {
            Ok(()) => Self::Replaced,
            Err(e) => Self::DeletedOnly(e),
        }
    }

    pub fn is_replaced(&self) -> bool {
        matches!(self, Self::Replaced)
    }

    /// `deleted` names the lost entity in the error.
    pub fn into_result(self, deleted: impl Into<String>) -> CoreResult<()> {
        match self {
            Self::Replaced => Ok(()),
            Self::FailedBeforeDelete(e) => Err(CoreError::Remote(e)),
            Self::DeletedOnly(source) => {
                let deleted = deleted.into();
                log::error!(
                    "[pinto] {deleted} was deleted but its replacement could not be created: {source}"
                );
                Err(CoreError::ReplaceIncomplete { deleted, source })
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn failure(operation: &str) -> ApiError {
        ApiError::Http {
            operation: operation.into(),
            status: 500,
            message: "500 Internal Server Error".into(),
            body: String::new(),
        }
    }

    #[tokio::test]
    async fn create_is_skipped_when_delete_fails() {
        let mut created = false;
        let outcome = ReplaceOutcome::run(async { Err(failure("RECORD DELETE")) }, async {
            created = true;
            Ok(())
        })
        .await;
        assert!(matches!(outcome, ReplaceOutcome::FailedBeforeDelete(_)));
        assert!(!created);
        assert!(matches!(
            outcome.into_result("old"),
            Err(CoreError::Remote(_))
        ));
    }

    #[tokio::test]
    async fn failed_create_reports_lost_entity() {
        let outcome =
            ReplaceOutcome::run(async { Ok(()) }, async { Err(failure("RECORD CREATE")) }).await;
        assert!(!outcome.is_replaced());
        let err = outcome.into_result("abc").unwrap_err();
        assert!(
            matches!(&err, CoreError::ReplaceIncomplete { deleted, source } if deleted == "abc" && source.operation() == "RECORD CREATE")
        );
    }

    #[tokio::test]
    async fn both_steps_succeed() {
        let outcome = ReplaceOutcome::run(async { Ok(()) }, async { Ok(()) }).await;
        assert!(outcome.is_replaced());
        assert!(outcome.into_result("abc").is_ok());
    }
}
