use serde::{Deserialize, Serialize};
use crate::books::domain::model::BookCounts;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalsDto {
    pub total_in_bookshelf: usize,
    pub total_added_current_month: usize,
    pub total_to_be_discarded: usize,
}

impl From<BookCounts> for TotalsDto {
    fn from(counts: BookCounts) -> Self {
        Self {
            total_in_bookshelf: counts.active,
            total_added_current_month: counts.active_since,
            total_to_be_discarded: counts.trashed,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::books::domain::model::BookCounts;
    use crate::dashboard::dto::TotalsDto;

    #[tokio::test]
    async fn test_should_serialize_totals() {
        let totals = TotalsDto::from(BookCounts { active: 3, active_since: 2, trashed: 1 });
        let json = serde_json::to_value(totals).expect("should serialize");
        assert_eq!(3, json["totalInBookshelf"]);
        assert_eq!(2, json["totalAddedCurrentMonth"]);
        assert_eq!(1, json["totalToBeDiscarded"]);
    }
}
