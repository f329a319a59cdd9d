use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::books::dto::BookDto;
use crate::catalog::command::parse_book_id;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};

pub struct RestoreBookCommand {
    catalog_service: Box<dyn CatalogService>,
}

impl RestoreBookCommand {
    pub fn new(catalog_service: Box<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RestoreBookCommandRequest {
    pub book_id: String,
}

impl RestoreBookCommandRequest {
    pub fn new(book_id: String) -> Self {
        Self {
            book_id,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RestoreBookCommandResponse {
    pub book: BookDto,
}

impl RestoreBookCommandResponse {
    pub fn new(book: BookDto) -> Self {
        Self {
            book,
        }
    }
}

#[async_trait]
impl Command<RestoreBookCommandRequest, RestoreBookCommandResponse> for RestoreBookCommand {
    async fn execute(&self, req: RestoreBookCommandRequest) -> Result<RestoreBookCommandResponse, CommandError> {
        let id = parse_book_id(req.book_id.as_str())?;
        self.catalog_service.restore_book(id)
            .await.map_err(CommandError::from).map(RestoreBookCommandResponse::new)
    }
}
