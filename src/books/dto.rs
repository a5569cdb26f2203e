use serde::{Deserialize, Serialize};
use crate::books::domain::Book;
use crate::books::domain::model::{AuthorEntity, BookEntity, Category};
use crate::core::domain::Identifiable;

// AuthorDto is a data transfer object for an author reference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct AuthorDto {
    pub author_id: i64,
    pub name: String,
}

// BookDto is a data transfer object for Catalog service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct BookDto {
    pub book_id: String,
    pub title: String,
    pub isbn: String,
    pub category: Category,
    pub available: bool,
    pub authors: Vec<AuthorDto>,
}

impl Identifiable for BookDto {
    fn id(&self) -> String {
        self.book_id.to_string()
    }
}

impl Book for BookDto {
    fn is_available(&self) -> bool {
        self.available
    }

    fn category(&self) -> &Category {
        &self.category
    }
}

impl From<&AuthorEntity> for AuthorDto {
    fn from(other: &AuthorEntity) -> Self {
        Self {
            author_id: other.author_id,
            name: other.name.to_string(),
        }
    }
}

impl From<&BookEntity> for BookDto {
    fn from(other: &BookEntity) -> Self {
        Self {
            book_id: other.book_id.to_string(),
            title: other.title.to_string(),
            isbn: other.isbn.to_string(),
            category: other.category.clone(),
            available: other.available,
            authors: other.authors.iter().map(AuthorDto::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::books::domain::Book;
    use crate::books::domain::model::{AuthorEntity, BookEntity, BookId};
    use crate::books::dto::BookDto;

    #[tokio::test]
    async fn test_should_convert_books() {
        let entity = BookEntity::new(BookId::new("7"), "Rayuela", "978-8437604572", "Novela", false)
            .with_authors(vec![AuthorEntity::new(3, "Julio Cortázar")]);
        let dto = BookDto::from(&entity);
        assert_eq!("7", dto.book_id.as_str());
        assert_eq!("Rayuela", dto.title.as_str());
        assert_eq!("Novela", dto.category().as_str());
        assert!(!dto.is_available());
        assert_eq!("Julio Cortázar", dto.authors[0].name.as_str());
        assert_eq!(3, dto.authors[0].author_id);
    }

    #[tokio::test]
    async fn test_should_serialize_json_shape() {
        let entity = BookEntity::new(BookId::new("7"), "Rayuela", "978-8437604572", "", true);
        let json = serde_json::to_value(BookDto::from(&entity)).expect("should serialize");
        assert_eq!(serde_json::json!({
            "book_id": "7",
            "title": "Rayuela",
            "isbn": "978-8437604572",
            "category": "",
            "available": true,
            "authors": [],
        }), json);
    }
}
