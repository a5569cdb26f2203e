use std::sync::Arc;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::books::domain::model::{BookId, Category};
use crate::books::dto::BookDto;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};

pub(crate) struct UpdateCategoryCommand {
    catalog_service: Arc<dyn CatalogService>,
}

impl UpdateCategoryCommand {
    pub(crate) fn new(catalog_service: Arc<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct UpdateCategoryCommandRequest {
    #[serde(default)]
    pub book_id: String,
    pub category: Category,
}

impl UpdateCategoryCommandRequest {
    pub fn new(book_id: &str, category: &str) -> Self {
        Self {
            book_id: book_id.to_string(),
            category: Category::new(category),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub(crate) struct UpdateCategoryCommandResponse {
    pub book: BookDto,
}

impl UpdateCategoryCommandResponse {
    pub fn new(book: BookDto) -> Self {
        Self {
            book,
        }
    }
}

#[async_trait]
impl Command<UpdateCategoryCommandRequest, UpdateCategoryCommandResponse> for UpdateCategoryCommand {
    async fn execute(&self, req: UpdateCategoryCommandRequest) -> Result<UpdateCategoryCommandResponse, CommandError> {
        self.catalog_service.update_category(&BookId::from(req.book_id), req.category).await
            .map_err(CommandError::from).map(UpdateCategoryCommandResponse::new)
    }
}
