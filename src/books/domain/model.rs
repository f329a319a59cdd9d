use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use crate::books::domain::Book;
use crate::core::domain::Identifiable;
use crate::core::library::Partition;
use crate::utils::date::{now, opt_serializer, serializer};

// BookEntity is the stored catalog record. `deleted` and `deleted_at` always move together:
// a trashed book carries the instant it was trashed, an active one carries none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookEntity {
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

impl BookEntity {
    // an unsaved active book, the store assigns book_id on insert
    pub fn new(title: &str, author: &str, isbn: &str) -> Self {
        Self {
            book_id: 0,
            title: title.to_string(),
            author: author.to_string(),
            isbn: isbn.to_string(),
            created_at: now(),
            deleted: false,
            deleted_at: None,
        }
    }
}

impl Identifiable for BookEntity {
    fn id(&self) -> i64 {
        self.book_id
    }
}

impl Book for BookEntity {
    fn partition(&self) -> Partition {
        Partition::of(self.deleted)
    }
}

// BookCounts is one consistent snapshot of the shelf sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BookCounts {
    pub active: usize,
    pub active_since: usize,
    pub trashed: usize,
}
