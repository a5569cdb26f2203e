use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types::AttributeValue;
use serde::Serialize;

use crate::books::domain::model::{BookEntity, BookId, Category, Isbn};
use crate::books::repository::{AuthorRepository, BookRepository};
use crate::core::domain::Identifiable;
use crate::core::library::{CatalogError, CatalogResult};
use crate::core::repository::Repository;
use crate::utils::ddb::{parse_bool_attribute, parse_item, parse_number_list_attribute, parse_string_attribute};

// Item layout of the books table. `search_text` is the lower-cased text that
// search_by_term matches against.
#[derive(Serialize)]
struct BookItem<'a> {
    book_id: &'a str,
    title: &'a str,
    isbn: &'a str,
    category: &'a str,
    available: bool,
    author_ids: Vec<i64>,
    search_text: String,
}

impl<'a> From<&'a BookEntity> for BookItem<'a> {
    fn from(book: &'a BookEntity) -> Self {
        Self {
            book_id: book.book_id.as_str(),
            title: book.title.as_str(),
            isbn: book.isbn.as_str(),
            category: book.category.as_str(),
            available: book.available,
            author_ids: book.author_ids(),
            search_text: book.search_text(),
        }
    }
}

pub struct DDBBookRepository {
    client: Client,
    table_name: String,
    authors: Arc<dyn AuthorRepository>,
}

impl DDBBookRepository {
    pub(crate) fn new(client: Client, table_name: &str, authors: Arc<dyn AuthorRepository>) -> Self {
        Self {
            client,
            table_name: table_name.to_string(),
            authors,
        }
    }

    // a book whose author references no longer resolve is a store fault, not a missing book
    async fn resolve(&self, map: &HashMap<String, AttributeValue>) -> CatalogResult<BookEntity> {
        let (book, author_ids) = map_to_book(map);
        let authors = self.authors.find_by_ids(&author_ids).await.map_err(|err| {
            CatalogError::database(&format!("book {} has unresolved authors: {}", book.book_id, err), None, false)
        })?;
        Ok(book.with_authors(authors))
    }
}

#[async_trait]
impl Repository<BookEntity> for DDBBookRepository {
    async fn save(&self, entity: &BookEntity) -> CatalogResult<usize> {
        self.authors.find_by_ids(&entity.author_ids()).await.map_err(|err| {
            CatalogError::validation(format!("book {} references unknown author: {}", entity.id(), err).as_str(), None)
        })?;
        let table_name: &str = self.table_name.as_ref();
        let val = serde_json::to_value(BookItem::from(entity))?;
        self.client
            .put_item()
            .table_name(table_name)
            .set_item(Some(parse_item(val)?))
            .send()
            .await.map(|_| 1).map_err(CatalogError::from)
    }

    async fn get(&self, id: &str) -> CatalogResult<BookEntity> {
        let table_name: &str = self.table_name.as_ref();
        let out = self.client
            .query()
            .table_name(table_name)
            .limit(2)
            .consistent_read(true)
            .key_condition_expression(
                "book_id = :book_id",
            )
            .expression_attribute_values(
                ":book_id",
                AttributeValue::S(id.to_string()),
            )
            .send()
            .await?;
        match out.items() {
            Some(items) if items.len() > 1 => {
                Err(CatalogError::database(format!("too many books for {}", id).as_str(), None, false))
            }
            Some([map]) => self.resolve(map).await,
            _ => Err(CatalogError::not_found(format!("book not found for {}", id).as_str())),
        }
    }
}

#[async_trait]
impl BookRepository for DDBBookRepository {
    async fn search_by_term(&self, term: &str, page_size: usize) -> CatalogResult<Vec<BookEntity>> {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return Ok(vec![]);
        }
        let table_name: &str = self.table_name.as_ref();
        let mut books = vec![];
        let mut start_key = None;
        loop {
            let out = self.client
                .scan()
                .table_name(table_name)
                .filter_expression("contains(search_text, :term)")
                .expression_attribute_values(":term", AttributeValue::S(term.clone()))
                .set_exclusive_start_key(start_key)
                .send()
                .await?;
            for item in out.items().unwrap_or_default() {
                if books.len() >= page_size {
                    return Ok(books);
                }
                books.push(self.resolve(item).await?);
            }
            start_key = out.last_evaluated_key().cloned();
            if start_key.is_none() || books.len() >= page_size {
                return Ok(books);
            }
        }
    }
}

fn map_to_book(map: &HashMap<String, AttributeValue>) -> (BookEntity, Vec<i64>) {
    let book = BookEntity {
        book_id: BookId::from(parse_string_attribute("book_id", map).unwrap_or_default()),
        title: parse_string_attribute("title", map).unwrap_or_default(),
        isbn: Isbn::from(parse_string_attribute("isbn", map).unwrap_or_default()),
        category: Category::from(parse_string_attribute("category", map).unwrap_or_default()),
        available: parse_bool_attribute("available", map),
        authors: vec![],
    };
    (book, parse_number_list_attribute("author_ids", map))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use async_once::AsyncOnce;
    use aws_sdk_dynamodb::Client;
    use lazy_static::lazy_static;

    use crate::books::domain::model::{BookEntity, BookId};
    use crate::books::repository::{AuthorRepository, BookRepository};
    use crate::books::repository::ddb_author_repository::DDBAuthorRepository;
    use crate::books::repository::ddb_book_repository::DDBBookRepository;
    use crate::core::library::CatalogError;
    use crate::core::repository::{Repository, RepositoryStore};
    use crate::utils::ddb::{build_db_client, create_table, delete_table};

    lazy_static! {
        static ref CLIENT: AsyncOnce<Client> = AsyncOnce::new(async {
                let client = build_db_client(RepositoryStore::LocalDynamoDB).await;
                let _ = delete_table(&client, "test_books").await;
                let _ = delete_table(&client, "test_book_authors").await;
                let _ = create_table(&client, "test_books", "book_id").await;
                let _ = create_table(&client, "test_book_authors", "author_id").await;
                client
            });
    }

    async fn build_repos() -> (Arc<DDBAuthorRepository>, DDBBookRepository) {
        let client = CLIENT.get().await.clone();
        let authors = Arc::new(DDBAuthorRepository::new(client.clone(), "test_book_authors"));
        let books = DDBBookRepository::new(client, "test_books", authors.clone());
        (authors, books)
    }

    #[tokio::test]
    #[ignore = "requires DynamoDB local"]
    async fn test_should_save_get_books() {
        let (authors, books_repo) = build_repos().await;
        let author = authors.create("Gabriel García Márquez").await.expect("should create author");
        let book = BookEntity::new(BookId::generate(), "Cien años de soledad", "978-0307474728", "Ficción", true)
            .with_authors(vec![author]);
        let size = books_repo.save(&book).await.expect("should save book");
        assert_eq!(1, size);

        let loaded = books_repo.get(book.book_id.as_str()).await.expect("should return book");
        assert_eq!(book, loaded);
    }

    #[tokio::test]
    #[ignore = "requires DynamoDB local"]
    async fn test_should_upsert_books() {
        let (_, books_repo) = build_repos().await;
        let mut book = BookEntity::new(BookId::generate(), "title", "isbn", "", true);
        let _ = books_repo.save(&book).await.expect("should save book");
        book.mark_unavailable();
        let _ = books_repo.save(&book).await.expect("should save book");

        let loaded = books_repo.get(book.book_id.as_str()).await.expect("should return book");
        assert!(!loaded.available);
        assert!(loaded.category.is_empty());
    }

    #[tokio::test]
    #[ignore = "requires DynamoDB local"]
    async fn test_should_fail_get_unknown_book() {
        let (_, books_repo) = build_repos().await;
        let res = books_repo.get(BookId::generate().as_str()).await;
        assert!(matches!(res, Err(CatalogError::NotFound { .. })));
    }

    #[tokio::test]
    #[ignore = "requires DynamoDB local"]
    async fn test_should_search_books() {
        let (authors, books_repo) = build_repos().await;
        let author = authors.create("Juan Rulfo").await.expect("should create author");
        let title = format!("Pedro Páramo {}", BookId::generate());
        let book = BookEntity::new(BookId::generate(), title.as_str(), "978-8437604183", "Novela", true)
            .with_authors(vec![author]);
        let _ = books_repo.save(&book).await.expect("should save book");

        let res = books_repo.search_by_term(title.to_uppercase().as_str(), 10).await.expect("should search");
        assert_eq!(1, res.len());
        assert_eq!(book.book_id, res[0].book_id);
        assert!(books_repo.search_by_term(" ", 10).await.expect("should search").is_empty());
    }
}
