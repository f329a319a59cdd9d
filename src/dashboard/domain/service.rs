use async_trait::async_trait;
use chrono::{DateTime, Local, TimeZone};
use tracing::debug;
use crate::books::repository::BookRepository;
use crate::core::library::LibraryResult;
use crate::dashboard::domain::DashboardService;
use crate::dashboard::dto::TotalsDto;
use crate::utils::date::start_of_month;

pub(crate) struct DashboardServiceImpl {
    book_repository: Box<dyn BookRepository>,
}

impl DashboardServiceImpl {
    pub(crate) fn new(book_repository: Box<dyn BookRepository>) -> Self {
        Self {
            book_repository,
        }
    }

    // the current month is taken from the clock of `now`
    pub(crate) async fn totals_at<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> LibraryResult<TotalsDto> {
        let since = start_of_month(now);
        let counts = self.book_repository.count(since).await?;
        debug!(since = %since, active = counts.active, trashed = counts.trashed, "counted books");
        Ok(TotalsDto::from(counts))
    }
}

#[async_trait]
impl DashboardService for DashboardServiceImpl {
    async fn totals(&self) -> LibraryResult<TotalsDto> {
        self.totals_at(&Local::now()).await
    }
}
