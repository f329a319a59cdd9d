use std::collections::HashMap;
use async_trait::async_trait;
use tracing::{info, warn};
use crate::books::domain::Book;
use crate::books::domain::model::BookEntity;
use crate::books::dto::{BookDto, BookFields};
use crate::books::repository::BookRepository;
use crate::catalog::domain::CatalogService;
use crate::core::domain::{Configuration, Identifiable};
use crate::core::events::DomainEvent;
use crate::core::library::{LibraryError, LibraryResult, PageRequest, PaginatedResult, Partition};
use crate::core::repository::Repository;
use crate::gateway::events::EventPublisher;
use crate::utils::date::now;

const EVENT_NAME: &str = "books";

pub(crate) struct CatalogServiceImpl {
    branch_id: String,
    book_repository: Box<dyn BookRepository>,
    events_publisher: Box<dyn EventPublisher>,
}

impl CatalogServiceImpl {
    pub(crate) fn new(config: &Configuration, book_repository: Box<dyn BookRepository>,
                      events_publisher: Box<dyn EventPublisher>) -> Self {
        Self {
            branch_id: config.branch_id.to_string(),
            book_repository,
            events_publisher,
        }
    }

    // the transition already committed, so a failed publish is reported but never undone
    async fn publish(&self, event: serde_json::Result<DomainEvent>) {
        let res = match event {
            Ok(event) => self.events_publisher.publish(&event).await,
            Err(err) => Err(LibraryError::from(err)),
        };
        if let Err(err) = res {
            warn!(branch_id = %self.branch_id, error = %err, retryable = err.retryable(), "failed to publish book event");
        }
    }

    fn metadata(&self) -> HashMap<String, String> {
        HashMap::from([("branch_id".to_string(), self.branch_id.to_string())])
    }
}

#[async_trait]
impl CatalogService for CatalogServiceImpl {
    async fn add_book(&self, fields: &BookFields) -> LibraryResult<BookDto> {
        fields.validate()?;
        let saved = self.book_repository.create(&fields.build_book()).await?;
        let book = BookDto::from(&saved);
        info!(book_id = book.id(), isbn = %book.isbn, "book added");
        self.publish(DomainEvent::added(
            EVENT_NAME, EVENT_NAME, book.id().to_string().as_str(), &self.metadata(), &book)).await;
        Ok(book)
    }

    async fn update_book(&self, id: i64, fields: &BookFields) -> LibraryResult<BookDto> {
        // not-found wins over validation, an unknown id is reported as such whatever the payload
        if self.book_repository.find_by_id(id, Partition::Active).await?.is_none() {
            return Err(LibraryError::not_found(format!("Book not found for id {}", id).as_str()));
        }
        fields.validate()?;
        let saved = self.book_repository.update(id, &fields.build_book()).await?;
        let book = BookDto::from(&saved);
        info!(book_id = book.id(), "book updated");
        self.publish(DomainEvent::updated(
            EVENT_NAME, EVENT_NAME, book.id().to_string().as_str(), &self.metadata(), &book)).await;
        Ok(book)
    }

    async fn remove_book(&self, id: i64) -> LibraryResult<()> {
        let trashed = self.book_repository.mark_deleted(id, now()).await?;
        let book = BookDto::from(&trashed);
        info!(book_id = id, partition = %book.partition(), "book moved to trash");
        self.publish(DomainEvent::deleted(
            EVENT_NAME, EVENT_NAME, id.to_string().as_str(), &self.metadata(), &book)).await;
        Ok(())
    }

    async fn restore_book(&self, id: i64) -> LibraryResult<BookDto> {
        let restored = self.book_repository.restore(id).await?;
        let book = BookDto::from(&restored);
        info!(book_id = id, partition = %book.partition(), "book restored from trash");
        self.publish(DomainEvent::restored(
            EVENT_NAME, EVENT_NAME, id.to_string().as_str(), &self.metadata(), &book)).await;
        Ok(book)
    }

    async fn purge_book(&self, id: i64) -> LibraryResult<()> {
        self.book_repository.delete(id, Partition::Trashed).await?;
        info!(book_id = id, "book purged");
        let data = id.to_string();
        self.publish(DomainEvent::purged(
            EVENT_NAME, EVENT_NAME, data.as_str(), &self.metadata(), &data)).await;
        Ok(())
    }

    async fn find_book_by_id(&self, id: i64) -> LibraryResult<BookDto> {
        self.book_repository.find_by_id(id, Partition::Active).await?
            .map(|b| BookDto::from(&b))
            .ok_or_else(|| LibraryError::not_found(format!("Book not found for id {}", id).as_str()))
    }

    async fn find_book_by_isbn(&self, isbn: &str) -> LibraryResult<BookDto> {
        if isbn.trim().is_empty() {
            return Err(LibraryError::required("isbn"));
        }
        self.book_repository.find_by_isbn(isbn, Partition::Active).await?
            .map(|b| BookDto::from(&b))
            .ok_or_else(|| LibraryError::not_found(format!("Book not found for isbn {}", isbn).as_str()))
    }

    async fn search_books(&self, partition: Partition, query: &str,
                          page: &PageRequest) -> LibraryResult<PaginatedResult<BookDto>> {
        let res = self.book_repository.query(partition, query, page).await?;
        Ok(res.map(|b: &BookEntity| BookDto::from(b)))
    }
}
