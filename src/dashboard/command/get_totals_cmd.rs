use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError};
use crate::dashboard::domain::DashboardService;
use crate::dashboard::dto::TotalsDto;

pub struct GetTotalsCommand {
    dashboard_service: Box<dyn DashboardService>,
}

impl GetTotalsCommand {
    pub fn new(dashboard_service: Box<dyn DashboardService>) -> Self {
        Self {
            dashboard_service,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct GetTotalsCommandRequest {}

#[derive(Debug, Serialize)]
pub struct GetTotalsCommandResponse {
    pub totals: TotalsDto,
}

#[async_trait]
impl Command<GetTotalsCommandRequest, GetTotalsCommandResponse> for GetTotalsCommand {
    async fn execute(&self, _req: GetTotalsCommandRequest) -> Result<GetTotalsCommandResponse, CommandError> {
        self.dashboard_service.totals()
            .await.map_err(CommandError::from).map(|totals| GetTotalsCommandResponse { totals })
    }
}

#[cfg(test)]
mod tests {
    use crate::catalog::command::add_book_cmd::{AddBookCommand, AddBookCommandRequest};
    use crate::catalog::command::remove_book_cmd::{RemoveBookCommand, RemoveBookCommandRequest};
    use crate::catalog::factory::create_catalog_service;
    use crate::core::command::Command;
    use crate::core::domain::Configuration;
    use crate::core::repository::RepositoryStore;
    use crate::dashboard::command::get_totals_cmd::{GetTotalsCommand, GetTotalsCommandRequest};
    use crate::dashboard::factory::create_dashboard_service;
    use crate::utils::sqlite::build_db_client;

    #[tokio::test]
    async fn test_should_run_get_totals() {
        let config = Configuration::new("test");
        let client = build_db_client(RepositoryStore::LocalSqlite, &config).await.expect("should build client");
        let add_cmd = AddBookCommand::new(create_catalog_service(&config, &client));
        let remove_cmd = RemoveBookCommand::new(create_catalog_service(&config, &client));
        let totals_cmd = GetTotalsCommand::new(create_dashboard_service(&client));

        add_cmd.execute(AddBookCommandRequest::new("one", "author", "isbn1")).await.expect("should add book");
        let res = add_cmd.execute(AddBookCommandRequest::new("two", "author", "isbn2")).await.expect("should add book");
        remove_cmd.execute(RemoveBookCommandRequest::new(res.book.book_id.to_string())).await.expect("should remove book");

        let res = totals_cmd.execute(GetTotalsCommandRequest::default()).await.expect("should get totals");
        assert_eq!(1, res.totals.total_in_bookshelf);
        assert_eq!(1, res.totals.total_added_current_month);
        assert_eq!(1, res.totals.total_to_be_discarded);
    }
}
