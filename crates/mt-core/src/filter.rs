//! Optional project / date-range narrowing applied to list views.

use chrono::NaiveDate;
use serde::Deserialize;

/// Filter state carried by list requests. Blank fields mean "no constraint".
///
/// The date range applies to each record type's primary date column (cast date
/// for concrete tests, inspection date otherwise); both bounds are inclusive.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecordFilter {
    pub project: Option<String>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

impl RecordFilter {
    /// The project constraint, if one is actually set.
    pub fn project(&self) -> Option<&str> {
        self.project.as_deref().map(str::trim).filter(|p| !p.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.project().is_none() && self.date_from.is_none() && self.date_to.is_none()
    }

    /// Whether a record with the given project and primary date passes.
    pub fn matches(&self, project: Option<&str>, date: Option<NaiveDate>) -> bool {
        if let Some(wanted) = self.project() {
            if project != Some(wanted) {
                return false;
            }
        }
        if let Some(from) = self.date_from {
            if date.map_or(true, |d| d < from) {
                return false;
            }
        }
        if let Some(to) = self.date_to {
            if date.map_or(true, |d| d > to) {
                return false;
            }
        }
        true
    }
}
