use crate::books::factory;
use crate::catalog::domain::CatalogService;
use crate::catalog::domain::service::CatalogServiceImpl;
use crate::core::domain::Configuration;
use crate::gateway::factory::create_publisher;
use crate::utils::sqlite::SqliteClient;

pub(crate) fn create_catalog_service(config: &Configuration, client: &SqliteClient) -> Box<dyn CatalogService> {
    let book_repo = factory::create_book_repository(client);
    let publisher = create_publisher(config.store.gateway_publisher(), client);
    Box::new(CatalogServiceImpl::new(config, book_repo, publisher))
}
