use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::books::dto::BookDto;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};
use crate::core::library::{PageRequest, Partition};

pub struct ListBooksCommand {
    catalog_service: Box<dyn CatalogService>,
    default_take: usize,
}

impl ListBooksCommand {
    pub fn new(catalog_service: Box<dyn CatalogService>, default_take: usize) -> Self {
        Self {
            catalog_service,
            default_take,
        }
    }
}

// raw query-string values, normalized when the command runs
#[derive(Debug, Default, Deserialize)]
pub struct ListBooksCommandRequest {
    #[serde(skip)]
    pub partition: Partition,
    pub page: Option<String>,
    pub take: Option<String>,
    pub query: Option<String>,
}

impl ListBooksCommandRequest {
    pub fn new(partition: Partition, page: Option<&str>, take: Option<&str>, query: Option<&str>) -> Self {
        Self {
            partition,
            page: page.map(str::to_string),
            take: take.map(str::to_string),
            query: query.map(str::to_string),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListBooksCommandResponse {
    pub books: Vec<BookDto>,
    pub total_count: usize,
}

impl ListBooksCommandResponse {
    pub fn new(books: Vec<BookDto>, total_count: usize) -> Self {
        Self {
            books,
            total_count,
        }
    }
}

#[async_trait]
impl Command<ListBooksCommandRequest, ListBooksCommandResponse> for ListBooksCommand {
    async fn execute(&self, req: ListBooksCommandRequest) -> Result<ListBooksCommandResponse, CommandError> {
        let page = PageRequest::parse(req.page.as_deref(), req.take.as_deref(), self.default_take)?;
        let query = req.query.as_deref().unwrap_or("");
        self.catalog_service.search_books(req.partition, query, &page)
            .await.map_err(CommandError::from)
            .map(|res| ListBooksCommandResponse::new(res.records, res.total_count))
    }
}
