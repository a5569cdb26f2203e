use std::fmt;
use std::fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::books::domain::Book;
use crate::core::domain::Identifiable;

// BookId is the primary key of a book; it is assigned by the caller, never by the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(String);

impl BookId {
    pub fn new(id: &str) -> Self {
        BookId(id.to_string())
    }

    pub fn generate() -> Self {
        BookId(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

// Isbn is stored as given, there is no checksum validation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Isbn(String);

impl Isbn {
    pub fn new(isbn: &str) -> Self {
        Isbn(isbn.to_string())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

// Category is a free label; an empty label is a valid value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(String);

impl Category {
    pub fn new(name: &str) -> Self {
        Category(name.to_string())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

macro_rules! string_value_object {
    ($($name:ident),*) => {
        $(
            impl Display for $name {
                fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                    write!(f, "{}", self.0)
                }
            }

            impl From<&str> for $name {
                fn from(s: &str) -> Self {
                    $name(s.to_string())
                }
            }

            impl From<String> for $name {
                fn from(s: String) -> Self {
                    $name(s)
                }
            }
        )*
    };
}

string_value_object!(BookId, Isbn, Category);

// AuthorEntity is shared by many books; its id is allocated by the author repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorEntity {
    pub author_id: i64,
    pub name: String,
}

impl AuthorEntity {
    pub fn new(author_id: i64, name: &str) -> Self {
        Self {
            author_id,
            name: name.to_string(),
        }
    }
}

// BookEntity is the catalog aggregate root. Authors are references resolved by the store,
// the book does not own them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookEntity {
    pub book_id: BookId,
    pub title: String,
    pub isbn: Isbn,
    pub category: Category,
    pub available: bool,
    pub authors: Vec<AuthorEntity>,
}

impl BookEntity {
    pub fn new(book_id: BookId, title: &str, isbn: &str, category: &str, available: bool) -> Self {
        Self {
            book_id,
            title: title.to_string(),
            isbn: Isbn::new(isbn),
            category: Category::new(category),
            available,
            authors: vec![],
        }
    }

    pub fn with_authors(mut self, authors: Vec<AuthorEntity>) -> Self {
        self.authors = authors;
        self
    }

    pub fn mark_available(&mut self) {
        self.available = true;
    }

    pub fn mark_unavailable(&mut self) {
        self.available = false;
    }

    pub fn set_available(&mut self, available: bool) {
        if available {
            self.mark_available();
        } else {
            self.mark_unavailable();
        }
    }

    pub fn update_category(&mut self, category: Category) {
        self.category = category;
    }

    pub fn author_ids(&self) -> Vec<i64> {
        self.authors.iter().map(|a| a.author_id).collect()
    }

    // lower-cased text the search policy runs over
    pub fn search_text(&self) -> String {
        let mut text = vec![self.title.as_str(), self.isbn.as_str(), self.category.as_str()];
        text.extend(self.authors.iter().map(|a| a.name.as_str()));
        text.join(" ").to_lowercase()
    }

    // Case-insensitive substring match over title, isbn, category and author names.
    pub fn matches(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        !term.is_empty() && self.search_text().contains(term.as_str())
    }
}

impl Identifiable for BookEntity {
    fn id(&self) -> String {
        self.book_id.to_string()
    }
}

impl Book for BookEntity {
    fn is_available(&self) -> bool {
        self.available
    }

    fn category(&self) -> &Category {
        &self.category
    }
}
