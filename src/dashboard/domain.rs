pub mod service;

use async_trait::async_trait;
use crate::core::library::LibraryResult;
use crate::dashboard::dto::TotalsDto;

// DashboardService reports the shelf totals, it never mutates books
#[async_trait]
pub trait DashboardService: Sync + Send {
    async fn totals(&self) -> LibraryResult<TotalsDto>;
}
