//! API models.

pub mod concrete;
pub mod density;
pub mod inspection;

pub use concrete::*;
pub use density::*;
pub use inspection::*;

use chrono::NaiveDate;
use mt_core::RecordFilter;
use serde::{Deserialize, Serialize};

/// Query parameters shared by every list endpoint: paging plus the optional
/// project/date-range filter.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub project: Option<String>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

impl ListParams {
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(100).clamp(1, 500)
    }

    pub fn offset(&self) -> i64 {
        (self.page.unwrap_or(1).max(1) - 1) * self.limit()
    }

    pub fn filter(&self) -> RecordFilter {
        RecordFilter {
            project: self.project.clone(),
            date_from: self.date_from,
            date_to: self.date_to,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ListResponse<T> {
    pub items: Vec<T>,
    pub total: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paging_defaults_and_clamps() {
        let p = ListParams::default();
        assert_eq!(p.limit(), 100);
        assert_eq!(p.offset(), 0);

        let p = ListParams {
            page: Some(3),
            limit: Some(9999),
            ..Default::default()
        };
        assert_eq!(p.limit(), 500);
        assert_eq!(p.offset(), 1000);

        let p = ListParams {
            page: Some(0),
            limit: Some(0),
            ..Default::default()
        };
        assert_eq!(p.limit(), 1);
        assert_eq!(p.offset(), 0);
    }
}
