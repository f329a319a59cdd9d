use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::books::dto::BookDto;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};

pub struct FindBookByIsbnCommand {
    catalog_service: Box<dyn CatalogService>,
}

impl FindBookByIsbnCommand {
    pub fn new(catalog_service: Box<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct FindBookByIsbnCommandRequest {
    pub isbn: String,
}

impl FindBookByIsbnCommandRequest {
    pub fn new(isbn: &str) -> Self {
        Self {
            isbn: isbn.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FindBookByIsbnCommandResponse {
    pub book: BookDto,
}

impl FindBookByIsbnCommandResponse {
    pub fn new(book: BookDto) -> Self {
        Self {
            book,
        }
    }
}

#[async_trait]
impl Command<FindBookByIsbnCommandRequest, FindBookByIsbnCommandResponse> for FindBookByIsbnCommand {
    async fn execute(&self, req: FindBookByIsbnCommandRequest) -> Result<FindBookByIsbnCommandResponse, CommandError> {
        self.catalog_service.find_book_by_isbn(req.isbn.as_str())
            .await.map_err(CommandError::from).map(FindBookByIsbnCommandResponse::new)
    }
}
