pub mod service;

use async_trait::async_trait;
use crate::books::dto::{BookDto, BookFields};
use crate::core::library::{LibraryResult, PageRequest, PaginatedResult, Partition};

// CatalogService owns every lifecycle transition of a book (active, trashed, purged)
// together with the partition-scoped lookups and searches.
#[async_trait]
pub trait CatalogService: Sync + Send {
    async fn add_book(&self, fields: &BookFields) -> LibraryResult<BookDto>;
    async fn update_book(&self, id: i64, fields: &BookFields) -> LibraryResult<BookDto>;
    async fn remove_book(&self, id: i64) -> LibraryResult<()>;
    async fn restore_book(&self, id: i64) -> LibraryResult<BookDto>;
    async fn purge_book(&self, id: i64) -> LibraryResult<()>;
    async fn find_book_by_id(&self, id: i64) -> LibraryResult<BookDto>;
    async fn find_book_by_isbn(&self, isbn: &str) -> LibraryResult<BookDto>;
    async fn search_books(&self, partition: Partition, query: &str,
                          page: &PageRequest) -> LibraryResult<PaginatedResult<BookDto>>;
}
