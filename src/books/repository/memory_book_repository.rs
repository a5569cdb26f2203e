use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::books::domain::model::{AuthorEntity, BookEntity};
use crate::books::repository::{AuthorRepository, BookRepository};
use crate::core::domain::Identifiable;
use crate::core::library::{CatalogError, CatalogResult};
use crate::core::repository::Repository;

// In-memory author store, ids come from a process-local counter.
#[derive(Debug, Default)]
pub(crate) struct MemoryAuthorRepository {
    sequence: AtomicI64,
    authors: RwLock<HashMap<i64, AuthorEntity>>,
}

impl MemoryAuthorRepository {
    pub(crate) fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AuthorRepository for MemoryAuthorRepository {
    async fn create(&self, name: &str) -> CatalogResult<AuthorEntity> {
        let author = AuthorEntity::new(self.sequence.fetch_add(1, Ordering::SeqCst) + 1, name);
        self.authors.write().await.insert(author.author_id, author.clone());
        Ok(author)
    }

    async fn find_by_ids(&self, ids: &[i64]) -> CatalogResult<Vec<AuthorEntity>> {
        let authors = self.authors.read().await;
        ids.iter().map(|id| {
            authors.get(id).cloned()
                .ok_or_else(|| CatalogError::not_found(format!("author not found for {}", id).as_str()))
        }).collect()
    }
}

// Books are kept in insertion order, which is the order search results come back in.
// Only author ids are stored; names are resolved on every read.
#[derive(Debug)]
struct BookRecord {
    book: BookEntity,
    author_ids: Vec<i64>,
}

pub(crate) struct MemoryBookRepository {
    authors: Arc<dyn AuthorRepository>,
    books: RwLock<Vec<BookRecord>>,
}

impl MemoryBookRepository {
    pub(crate) fn new(authors: Arc<dyn AuthorRepository>) -> Self {
        Self {
            authors,
            books: RwLock::new(vec![]),
        }
    }

    // NotFound is reserved for the book itself, a dangling author is a store fault
    async fn resolve(&self, record: &BookRecord) -> CatalogResult<BookEntity> {
        let authors = self.authors.find_by_ids(&record.author_ids).await.map_err(|err| {
            CatalogError::database(&format!("book {} has unresolved authors: {}", record.book.book_id, err), None, false)
        })?;
        Ok(record.book.clone().with_authors(authors))
    }
}

#[async_trait]
impl Repository<BookEntity> for MemoryBookRepository {
    async fn save(&self, entity: &BookEntity) -> CatalogResult<usize> {
        let author_ids = entity.author_ids();
        self.authors.find_by_ids(&author_ids).await.map_err(|err| {
            CatalogError::validation(format!("book {} references unknown author: {}", entity.id(), err).as_str(), None)
        })?;
        let record = BookRecord {
            book: entity.clone().with_authors(vec![]),
            author_ids,
        };
        let mut books = self.books.write().await;
        match books.iter_mut().find(|r| r.book.book_id == entity.book_id) {
            Some(existing) => *existing = record,
            None => books.push(record),
        }
        Ok(1)
    }

    async fn get(&self, id: &str) -> CatalogResult<BookEntity> {
        let books = self.books.read().await;
        match books.iter().find(|r| r.book.book_id.as_str() == id) {
            Some(record) => self.resolve(record).await,
            None => Err(CatalogError::not_found(format!("book not found for {}", id).as_str())),
        }
    }
}

#[async_trait]
impl BookRepository for MemoryBookRepository {
    async fn search_by_term(&self, term: &str, page_size: usize) -> CatalogResult<Vec<BookEntity>> {
        if term.trim().is_empty() {
            return Ok(vec![]);
        }
        let books = self.books.read().await;
        let mut matched = vec![];
        for record in books.iter() {
            if matched.len() >= page_size {
                break;
            }
            let book = self.resolve(record).await?;
            if book.matches(term) {
                matched.push(book);
            }
        }
        Ok(matched)
    }
}
