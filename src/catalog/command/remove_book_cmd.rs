use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::catalog::command::parse_book_id;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};

pub struct RemoveBookCommand {
    catalog_service: Box<dyn CatalogService>,
}

impl RemoveBookCommand {
    pub fn new(catalog_service: Box<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RemoveBookCommandRequest {
    pub book_id: String,
}

impl RemoveBookCommandRequest {
    pub fn new(book_id: String) -> Self {
        Self {
            book_id,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RemoveBookCommandResponse {}

#[async_trait]
impl Command<RemoveBookCommandRequest, RemoveBookCommandResponse> for RemoveBookCommand {
    async fn execute(&self, req: RemoveBookCommandRequest) -> Result<RemoveBookCommandResponse, CommandError> {
        let id = parse_book_id(req.book_id.as_str())?;
        self.catalog_service.remove_book(id)
            .await.map_err(CommandError::from).map(|_| RemoveBookCommandResponse {})
    }
}

#[cfg(test)]
mod tests {
    use crate::catalog::command::add_book_cmd::{AddBookCommand, AddBookCommandRequest};
    use crate::catalog::command::get_book_cmd::{GetBookCommand, GetBookCommandRequest};
    use crate::catalog::command::remove_book_cmd::{RemoveBookCommand, RemoveBookCommandRequest};
    use crate::catalog::factory;
    use crate::core::command::{Command, CommandError};
    use crate::core::domain::Configuration;
    use crate::core::repository::RepositoryStore;
    use crate::utils::sqlite::build_db_client;

    #[tokio::test]
    async fn test_should_run_remove_book() {
        let config = Configuration::new("test");
        let client = build_db_client(RepositoryStore::LocalSqlite, &config).await.expect("should build client");
        let add_cmd = AddBookCommand::new(factory::create_catalog_service(&config, &client));
        let remove_cmd = RemoveBookCommand::new(factory::create_catalog_service(&config, &client));
        let get_cmd = GetBookCommand::new(factory::create_catalog_service(&config, &client));

        let res = add_cmd.execute(AddBookCommandRequest::new("test book", "author", "isbn")).await.expect("should add book");
        let id = res.book.book_id.to_string();
        remove_cmd.execute(RemoveBookCommandRequest::new(id.clone())).await.expect("should remove book");

        // trashed books are hidden from active lookups
        let hidden = get_cmd.execute(GetBookCommandRequest::new(id.clone())).await;
        assert!(matches!(hidden, Err(CommandError::NotFound { .. })));

        let again = remove_cmd.execute(RemoveBookCommandRequest::new(id)).await;
        assert!(matches!(again, Err(CommandError::NotFound { .. })));
    }
}
