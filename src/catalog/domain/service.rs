use async_trait::async_trait;
use crate::books::domain::Book;
use crate::books::domain::model::{BookEntity, BookId, Category};
use crate::books::dto::BookDto;
use crate::books::repository::BookRepository;
use crate::catalog::domain::CatalogService;
use crate::core::domain::Configuration;
use crate::core::library::CatalogResult;

pub(crate) struct CatalogServiceImpl {
    book_repository: Box<dyn BookRepository>,
    search_page_size: usize,
}

impl CatalogServiceImpl {
    pub(crate) fn new(config: &Configuration, book_repository: Box<dyn BookRepository>) -> Self {
        Self {
            book_repository,
            search_page_size: config.search_page_size,
        }
    }

    async fn load(&self, id: &BookId) -> CatalogResult<BookEntity> {
        self.book_repository.get(id.as_str()).await
    }
}

#[async_trait]
impl CatalogService for CatalogServiceImpl {
    async fn get_book(&self, id: &BookId) -> CatalogResult<BookDto> {
        self.load(id).await.map(|b| BookDto::from(&b))
    }

    async fn is_available(&self, id: &BookId) -> CatalogResult<bool> {
        self.load(id).await.map(|b| b.is_available())
    }

    // Last writer wins, there is no version check on the stored book.
    async fn set_availability(&self, id: &BookId, available: bool) -> CatalogResult<()> {
        let mut book = self.load(id).await?;
        book.set_available(available);
        let _ = self.book_repository.save(&book).await?;
        tracing::info!(book_id = %id, available, "book availability updated");
        Ok(())
    }

    async fn update_category(&self, id: &BookId, category: Category) -> CatalogResult<BookDto> {
        let mut book = self.load(id).await?;
        book.update_category(category);
        let _ = self.book_repository.save(&book).await?;
        tracing::info!(book_id = %id, category = %book.category, "book category updated");
        Ok(BookDto::from(&book))
    }

    async fn search_books(&self, term: &str) -> CatalogResult<Vec<BookDto>> {
        let term = term.trim();
        if term.is_empty() {
            return Ok(vec![]);
        }
        let res = self.book_repository.search_by_term(term, self.search_page_size).await?;
        tracing::debug!(term, matches = res.len(), "catalog search");
        Ok(res.iter().map(BookDto::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use async_once::AsyncOnce;
    use lazy_static::lazy_static;
    use crate::books::domain::model::{BookId, Category};
    use crate::catalog::domain::CatalogService;
    use crate::catalog::factory;
    use crate::core::domain::Configuration;
    use crate::core::library::CatalogError;
    use crate::core::repository::RepositoryStore;

    lazy_static! {
        static ref SUT_SVC: AsyncOnce<Box<dyn CatalogService>> = AsyncOnce::new(async {
                factory::create_catalog_service(&Configuration::new("test"), RepositoryStore::Memory).await
            });
    }

    // each test that mutates gets its own catalog so the shared one stays as seeded
    async fn fresh_service() -> Box<dyn CatalogService> {
        factory::create_catalog_service(&Configuration::new("test"), RepositoryStore::Memory).await
    }

    #[tokio::test]
    async fn test_should_get_book() {
        let catalog_svc = SUT_SVC.get().await;
        let book = catalog_svc.get_book(&BookId::new("1")).await.expect("should return book");
        assert_eq!("1", book.book_id.as_str());
        assert_eq!("Cien años de soledad", book.title.as_str());
        assert_eq!("Gabriel García Márquez", book.authors[0].name.as_str());
    }

    #[tokio::test]
    async fn test_should_fail_for_unknown_book() {
        let catalog_svc = SUT_SVC.get().await;
        let id = BookId::new("99");
        assert!(matches!(catalog_svc.get_book(&id).await, Err(CatalogError::NotFound { .. })));
        assert!(matches!(catalog_svc.is_available(&id).await, Err(CatalogError::NotFound { .. })));
        assert!(matches!(catalog_svc.set_availability(&id, true).await, Err(CatalogError::NotFound { .. })));
        assert!(matches!(catalog_svc.update_category(&id, Category::new("x")).await, Err(CatalogError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_should_set_availability() {
        let catalog_svc = fresh_service().await;
        let id = BookId::new("1");
        assert!(catalog_svc.is_available(&id).await.expect("should check book"));

        catalog_svc.set_availability(&id, false).await.expect("should update book");
        assert!(!catalog_svc.is_available(&id).await.expect("should check book"));
        assert!(!catalog_svc.get_book(&id).await.expect("should return book").available);

        catalog_svc.set_availability(&id, true).await.expect("should update book");
        assert!(catalog_svc.get_book(&id).await.expect("should return book").available);
    }

    #[tokio::test]
    async fn test_should_set_availability_idempotently() {
        let catalog_svc = fresh_service().await;
        let id = BookId::new("2");
        for _ in 0..2 {
            catalog_svc.set_availability(&id, true).await.expect("should update book");
            assert!(catalog_svc.is_available(&id).await.expect("should check book"));
        }
        let book = catalog_svc.get_book(&id).await.expect("should return book");
        assert_eq!(1, book.authors.len());
    }

    #[tokio::test]
    async fn test_should_update_category() {
        let catalog_svc = fresh_service().await;
        let id = BookId::new("3");
        let updated = catalog_svc.update_category(&id, Category::new("Literatura latinoamericana"))
            .await.expect("should update category");
        assert_eq!("Literatura latinoamericana", updated.category.as_str());
        let loaded = catalog_svc.get_book(&id).await.expect("should return book");
        assert_eq!(updated, loaded);
    }

    #[tokio::test]
    async fn test_should_search_books() {
        let catalog_svc = SUT_SVC.get().await;
        let res = catalog_svc.search_books("Cien").await.expect("should search");
        assert_eq!(1, res.len());
        assert_eq!("1", res[0].book_id.as_str());

        let res = catalog_svc.search_books("garcía márquez").await.expect("should search");
        assert_eq!(2, res.len());

        assert!(catalog_svc.search_books("").await.expect("should search").is_empty());
        assert!(catalog_svc.search_books("   ").await.expect("should search").is_empty());
        assert!(catalog_svc.search_books("Don Quijote").await.expect("should search").is_empty());
    }
}
