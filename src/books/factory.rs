use std::sync::Arc;
use crate::books::repository::{AuthorRepository, BookRepository};
use crate::books::repository::ddb_author_repository::DDBAuthorRepository;
use crate::books::repository::ddb_book_repository::DDBBookRepository;
use crate::books::repository::memory_book_repository::{MemoryAuthorRepository, MemoryBookRepository};
use crate::core::repository::RepositoryStore;
use crate::utils::ddb::{build_db_client, create_table};

pub(crate) async fn create_author_repository(store: RepositoryStore) -> Arc<dyn AuthorRepository> {
    match store {
        RepositoryStore::DynamoDB => {
            let client = build_db_client(store).await;
            Arc::new(DDBAuthorRepository::new(client, "authors"))
        }
        RepositoryStore::LocalDynamoDB => {
            let client = build_db_client(store).await;
            let _ = create_table(&client, "authors", "author_id").await;
            Arc::new(DDBAuthorRepository::new(client, "authors"))
        }
        RepositoryStore::Memory => {
            Arc::new(MemoryAuthorRepository::new())
        }
    }
}

pub(crate) async fn create_book_repository(store: RepositoryStore,
                                           authors: Arc<dyn AuthorRepository>) -> Box<dyn BookRepository> {
    match store {
        RepositoryStore::DynamoDB => {
            let client = build_db_client(store).await;
            Box::new(DDBBookRepository::new(client, "books", authors))
        }
        RepositoryStore::LocalDynamoDB => {
            let client = build_db_client(store).await;
            let _ = create_table(&client, "books", "book_id").await;
            Box::new(DDBBookRepository::new(client, "books", authors))
        }
        RepositoryStore::Memory => {
            Box::new(MemoryBookRepository::new(authors))
        }
    }
}
