use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use crate::books::domain::Book;
use crate::books::domain::model::BookEntity;
use crate::core::domain::Identifiable;
use crate::core::library::{LibraryError, LibraryResult, Partition};
use crate::utils::date::{opt_serializer, serializer};

// BookDto is a data transfer object for Catalog service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookDto {
    #[serde(rename = "id")]
    pub book_id: i64,
    pub title: String,
    pub author: String,
    pub isbn: String,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    pub deleted: bool,
    #[serde(with = "opt_serializer")]
    pub deleted_at: Option<NaiveDateTime>,
}

impl Identifiable for BookDto {
    fn id(&self) -> i64 {
        self.book_id
    }
}

impl Book for BookDto {
    fn partition(&self) -> Partition {
        Partition::of(self.deleted)
    }
}

impl From<&BookEntity> for BookDto {
    fn from(other: &BookEntity) -> Self {
        Self {
            book_id: other.book_id,
            title: other.title.to_string(),
            author: other.author.to_string(),
            isbn: other.isbn.to_string(),
            created_at: other.created_at,
            deleted: other.deleted,
            deleted_at: other.deleted_at,
        }
    }
}

// BookFields is the caller supplied part of a book, used by create and update.
// Anything else in the payload (an `id` in particular) is dropped while parsing.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BookFields {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub isbn: String,
}

impl BookFields {
    pub fn new(title: &str, author: &str, isbn: &str) -> Self {
        Self {
            title: title.to_string(),
            author: author.to_string(),
            isbn: isbn.to_string(),
        }
    }

    // every field is required and must hold more than whitespace
    pub fn validate(&self) -> LibraryResult<()> {
        for (name, value) in [("title", &self.title), ("author", &self.author), ("isbn", &self.isbn)] {
            if value.trim().is_empty() {
                return Err(LibraryError::required(name));
            }
        }
        Ok(())
    }

    pub fn build_book(&self) -> BookEntity {
        BookEntity::new(self.title.as_str(), self.author.as_str(), self.isbn.as_str())
    }
}
