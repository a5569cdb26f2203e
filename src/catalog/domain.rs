pub mod service;

use async_trait::async_trait;
use crate::books::domain::model::{BookId, Category};
use crate::books::dto::BookDto;
use crate::core::library::CatalogResult;

// CatalogService owns the catalog rules. Calls arrive already authenticated and authorized.
#[async_trait]
pub(crate) trait CatalogService: Sync + Send {
    async fn get_book(&self, id: &BookId) -> CatalogResult<BookDto>;
    async fn is_available(&self, id: &BookId) -> CatalogResult<bool>;
    async fn set_availability(&self, id: &BookId, available: bool) -> CatalogResult<()>;
    async fn update_category(&self, id: &BookId, category: Category) -> CatalogResult<BookDto>;
    async fn search_books(&self, term: &str) -> CatalogResult<Vec<BookDto>>;
}
