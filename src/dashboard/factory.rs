use crate::books::factory;
use crate::dashboard::domain::DashboardService;
use crate::dashboard::domain::service::DashboardServiceImpl;
use crate::utils::sqlite::SqliteClient;

pub(crate) fn create_dashboard_service(client: &SqliteClient) -> Box<dyn DashboardService> {
    Box::new(DashboardServiceImpl::new(factory::create_book_repository(client)))
}
