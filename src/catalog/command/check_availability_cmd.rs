use std::sync::Arc;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::books::domain::model::BookId;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};

// CheckAvailabilityCommand answers "can this book be lent". An unknown book is reported
// as not available instead of NotFound; the catalog service itself still says NotFound.
pub(crate) struct CheckAvailabilityCommand {
    catalog_service: Arc<dyn CatalogService>,
}

impl CheckAvailabilityCommand {
    pub(crate) fn new(catalog_service: Arc<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct CheckAvailabilityCommandRequest {
    pub(crate) book_id: String,
}

impl CheckAvailabilityCommandRequest {
    pub fn new(book_id: String) -> Self {
        Self {
            book_id,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub(crate) struct CheckAvailabilityCommandResponse {
    pub available: bool,
}

impl CheckAvailabilityCommandResponse {
    pub fn new(available: bool) -> Self {
        Self {
            available,
        }
    }
}

#[async_trait]
impl Command<CheckAvailabilityCommandRequest, CheckAvailabilityCommandResponse> for CheckAvailabilityCommand {
    async fn execute(&self, req: CheckAvailabilityCommandRequest) -> Result<CheckAvailabilityCommandResponse, CommandError> {
        match self.catalog_service.is_available(&BookId::from(req.book_id)).await {
            Ok(available) => Ok(CheckAvailabilityCommandResponse::new(available)),
            Err(err) if err.is_not_found() => Ok(CheckAvailabilityCommandResponse::new(false)),
            Err(err) => Err(CommandError::from(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use async_once::AsyncOnce;
    use lazy_static::lazy_static;
    use crate::catalog::command::check_availability_cmd::{CheckAvailabilityCommand, CheckAvailabilityCommandRequest};
    use crate::catalog::factory;
    use crate::core::command::Command;
    use crate::core::domain::Configuration;
    use crate::core::repository::RepositoryStore;

    lazy_static! {
        static ref CHECK_CMD : AsyncOnce<CheckAvailabilityCommand> = AsyncOnce::new(async {
                let svc = factory::create_catalog_service(&Configuration::new("test"), RepositoryStore::Memory).await;
                CheckAvailabilityCommand::new(svc.into())
            });
    }

    #[tokio::test]
    async fn test_should_run_check_availability() {
        let check_cmd = CHECK_CMD.get().await;
        let res = check_cmd.execute(CheckAvailabilityCommandRequest::new("1".to_string())).await.expect("should check book");
        assert!(res.available);
        let res = check_cmd.execute(CheckAvailabilityCommandRequest::new("3".to_string())).await.expect("should check book");
        assert!(!res.available);
    }

    #[tokio::test]
    async fn test_should_report_unknown_book_as_unavailable() {
        let check_cmd = CHECK_CMD.get().await;
        let res = check_cmd.execute(CheckAvailabilityCommandRequest::new("99".to_string())).await.expect("should not fail");
        assert!(!res.available);
    }
}
