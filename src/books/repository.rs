pub mod sqlite_book_repository;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use crate::books::domain::model::{BookCounts, BookEntity};
use crate::core::library::{LibraryResult, Partition};
use crate::core::repository::Repository;

#[async_trait]
pub trait BookRepository: Repository<BookEntity> {
    // find a book by id, only if it lives in the given partition
    async fn find_by_id(&self, id: i64, partition: Partition) -> LibraryResult<Option<BookEntity>>;

    // get a book by isbn from any partition
    async fn get_by_isbn(&self, isbn: &str) -> LibraryResult<Option<BookEntity>>;

    // find a book by isbn, only if it lives in the given partition
    async fn find_by_isbn(&self, isbn: &str, partition: Partition) -> LibraryResult<Option<BookEntity>>;

    // moves an active book to the trash, stamping deleted_at
    async fn mark_deleted(&self, id: i64, deleted_at: NaiveDateTime) -> LibraryResult<BookEntity>;

    // moves a trashed book back to the active partition
    async fn restore(&self, id: i64) -> LibraryResult<BookEntity>;

    // counts both partitions and the active books created at or after `since`
    async fn count(&self, since: NaiveDateTime) -> LibraryResult<BookCounts>;
}
