use std::sync::Arc;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::books::dto::BookDto;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};

pub(crate) struct SearchBooksCommand {
    catalog_service: Arc<dyn CatalogService>,
}

impl SearchBooksCommand {
    pub(crate) fn new(catalog_service: Arc<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchBooksCommandRequest {
    #[serde(rename = "criterio", default)]
    pub term: String,
}

impl SearchBooksCommandRequest {
    pub fn new(term: &str) -> Self {
        Self {
            term: term.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub(crate) struct SearchBooksCommandResponse {
    pub books: Vec<BookDto>,
}

impl SearchBooksCommandResponse {
    pub fn new(books: Vec<BookDto>) -> Self {
        Self {
            books,
        }
    }
}

#[async_trait]
impl Command<SearchBooksCommandRequest, SearchBooksCommandResponse> for SearchBooksCommand {
    async fn execute(&self, req: SearchBooksCommandRequest) -> Result<SearchBooksCommandResponse, CommandError> {
        self.catalog_service.search_books(req.term.as_str())
            .await.map_err(CommandError::from).map(SearchBooksCommandResponse::new)
    }
}

#[cfg(test)]
mod tests {
    use async_once::AsyncOnce;
    use lazy_static::lazy_static;
    use crate::catalog::command::search_books_cmd::{SearchBooksCommand, SearchBooksCommandRequest};
    use crate::catalog::factory;
    use crate::core::command::Command;
    use crate::core::domain::Configuration;
    use crate::core::repository::RepositoryStore;

    lazy_static! {
        static ref SEARCH_CMD : AsyncOnce<SearchBooksCommand> = AsyncOnce::new(async {
                let svc = factory::create_catalog_service(&Configuration::new("test"), RepositoryStore::Memory).await;
                SearchBooksCommand::new(svc.into())
            });
    }

    #[tokio::test]
    async fn test_should_run_search_books() {
        let search_cmd = SEARCH_CMD.get().await;
        let res = search_cmd.execute(SearchBooksCommandRequest::new("Cien")).await.expect("should search");
        assert_eq!(1, res.books.len());
        assert_eq!("1", res.books[0].book_id.as_str());
    }

    #[tokio::test]
    async fn test_should_return_empty_results() {
        let search_cmd = SEARCH_CMD.get().await;
        let res = search_cmd.execute(SearchBooksCommandRequest::new("")).await.expect("should search");
        assert!(res.books.is_empty());
        let res = search_cmd.execute(SearchBooksCommandRequest::new("Don Quijote")).await.expect("should search");
        assert!(res.books.is_empty());
    }
}
