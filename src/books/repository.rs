pub mod ddb_author_repository;
pub mod ddb_book_repository;
pub mod memory_book_repository;

use async_trait::async_trait;
use crate::books::domain::model::{AuthorEntity, BookEntity};
use crate::core::library::CatalogResult;
use crate::core::repository::Repository;

// BookRepository is the catalog store: it saves whole aggregates and hands books back
// with their authors already resolved.
#[async_trait]
pub(crate) trait BookRepository: Repository<BookEntity> {
    // match policy is owned by the store, a blank term matches nothing
    async fn search_by_term(&self, term: &str, page_size: usize) -> CatalogResult<Vec<BookEntity>>;
}

#[async_trait]
pub(crate) trait AuthorRepository: Sync + Send {
    // allocates the next author id
    async fn create(&self, name: &str) -> CatalogResult<AuthorEntity>;

    // resolves references in the given order, a dangling id is NotFound
    async fn find_by_ids(&self, ids: &[i64]) -> CatalogResult<Vec<AuthorEntity>>;
}
