use std::sync::Arc;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::books::domain::model::BookId;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};

pub(crate) struct UpdateAvailabilityCommand {
    catalog_service: Arc<dyn CatalogService>,
}

impl UpdateAvailabilityCommand {
    pub(crate) fn new(catalog_service: Arc<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct UpdateAvailabilityCommandRequest {
    pub book_id: String,
    pub available: bool,
}

impl UpdateAvailabilityCommandRequest {
    pub fn new(book_id: &str, available: bool) -> Self {
        Self {
            book_id: book_id.to_string(),
            available,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct UpdateAvailabilityCommandResponse {
    pub book_id: String,
    pub available: bool,
}

impl UpdateAvailabilityCommandResponse {
    pub fn new(book_id: String, available: bool) -> Self {
        Self {
            book_id,
            available,
        }
    }
}

#[async_trait]
impl Command<UpdateAvailabilityCommandRequest, UpdateAvailabilityCommandResponse> for UpdateAvailabilityCommand {
    async fn execute(&self, req: UpdateAvailabilityCommandRequest) -> Result<UpdateAvailabilityCommandResponse, CommandError> {
        self.catalog_service.set_availability(&BookId::new(req.book_id.as_str()), req.available).await
            .map_err(CommandError::from).map(|_| UpdateAvailabilityCommandResponse::new(req.book_id, req.available))
    }
}
