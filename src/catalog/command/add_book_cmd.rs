use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::books::dto::{BookDto, BookFields};
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};

pub struct AddBookCommand {
    catalog_service: Box<dyn CatalogService>,
}

impl AddBookCommand {
    pub fn new(catalog_service: Box<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AddBookCommandRequest {
    #[serde(flatten)]
    pub fields: BookFields,
}

impl AddBookCommandRequest {
    pub fn new(title: &str, author: &str, isbn: &str) -> Self {
        Self {
            fields: BookFields::new(title, author, isbn),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AddBookCommandResponse {
    pub book: BookDto,
}

impl AddBookCommandResponse {
    pub fn new(book: BookDto) -> Self {
        Self {
            book,
        }
    }
}

#[async_trait]
impl Command<AddBookCommandRequest, AddBookCommandResponse> for AddBookCommand {
    async fn execute(&self, req: AddBookCommandRequest) -> Result<AddBookCommandResponse, CommandError> {
        self.catalog_service.add_book(&req.fields).await
            .map_err(CommandError::from).map(AddBookCommandResponse::new)
    }
}

#[cfg(test)]
mod tests {
    use crate::catalog::command::add_book_cmd::{AddBookCommand, AddBookCommandRequest};
    use crate::catalog::factory;
    use crate::core::command::{Command, CommandError};
    use crate::core::domain::Configuration;
    use crate::core::repository::RepositoryStore;
    use crate::utils::sqlite::build_db_client;

    async fn new_cmd() -> AddBookCommand {
        let config = Configuration::new("test");
        let client = build_db_client(RepositoryStore::LocalSqlite, &config).await.expect("should build client");
        AddBookCommand::new(factory::create_catalog_service(&config, &client))
    }

    #[tokio::test]
    async fn test_should_run_add_book() {
        let cmd = new_cmd().await;
        let res = cmd.execute(AddBookCommandRequest::new("test book", "author", "isbn"))
            .await.expect("should add book");
        assert_eq!("test book", res.book.title);
        assert!(res.book.book_id > 0);
    }

    #[tokio::test]
    async fn test_should_fail_add_book_twice() {
        let cmd = new_cmd().await;
        cmd.execute(AddBookCommandRequest::new("test book", "author", "isbn")).await.expect("should add book");
        let res = cmd.execute(AddBookCommandRequest::new("test book", "author", "isbn")).await;
        assert!(matches!(res, Err(CommandError::DuplicateKey { .. })));
    }
}
