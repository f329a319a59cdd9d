use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::catalog::command::parse_book_id;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};

pub struct PurgeBookCommand {
    catalog_service: Box<dyn CatalogService>,
}

impl PurgeBookCommand {
    pub fn new(catalog_service: Box<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PurgeBookCommandRequest {
    pub book_id: String,
}

impl PurgeBookCommandRequest {
    pub fn new(book_id: String) -> Self {
        Self {
            book_id,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PurgeBookCommandResponse {}

#[async_trait]
impl Command<PurgeBookCommandRequest, PurgeBookCommandResponse> for PurgeBookCommand {
    async fn execute(&self, req: PurgeBookCommandRequest) -> Result<PurgeBookCommandResponse, CommandError> {
        let id = parse_book_id(req.book_id.as_str())?;
        self.catalog_service.purge_book(id)
            .await.map_err(CommandError::from).map(|_| PurgeBookCommandResponse {})
    }
}
