use crate::books::domain::model::{BookEntity, BookId};
use crate::books::factory;
use crate::books::repository::{AuthorRepository, BookRepository};
use crate::catalog::domain::CatalogService;
use crate::catalog::domain::service::CatalogServiceImpl;
use crate::core::domain::Configuration;
use crate::core::library::CatalogResult;
use crate::core::repository::RepositoryStore;

pub(crate) async fn create_catalog_service(config: &Configuration, store: RepositoryStore) -> Box<dyn CatalogService> {
    let author_repo = factory::create_author_repository(store).await;
    let book_repo = factory::create_book_repository(store, author_repo.clone()).await;
    if store == RepositoryStore::Memory {
        if let Err(err) = seed_sample_catalog(author_repo.as_ref(), book_repo.as_ref()).await {
            tracing::warn!(%err, "failed to seed in-memory catalog");
        }
    }
    Box::new(CatalogServiceImpl::new(config, book_repo))
}

// the in-memory store starts with a small catalog so local runs have data to serve
pub(crate) async fn seed_sample_catalog(authors: &dyn AuthorRepository, books: &dyn BookRepository) -> CatalogResult<()> {
    let garcia_marquez = authors.create("Gabriel García Márquez").await?;
    let cortazar = authors.create("Julio Cortázar").await?;
    let samples = vec![
        BookEntity::new(BookId::new("1"), "Cien años de soledad", "978-0307474728", "Ficción", true)
            .with_authors(vec![garcia_marquez.clone()]),
        BookEntity::new(BookId::new("2"), "El amor en los tiempos del cólera", "978-0307387264", "Ficción", true)
            .with_authors(vec![garcia_marquez]),
        BookEntity::new(BookId::new("3"), "Rayuela", "978-8437604572", "Novela", false)
            .with_authors(vec![cortazar]),
    ];
    for book in samples {
        let _ = books.save(&book).await?;
    }
    Ok(())
}
