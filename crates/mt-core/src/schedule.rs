//! Test-due scheduling for concrete cylinder break tests.
//!
//! A cylinder is cast on one day and scheduled to be broken a fixed number of
//! days later. The expected test date is derived from the cast date plus the
//! cylinder age; each test is then classified as upcoming, overdue, or
//! completed.

use chrono::{Duration, NaiveDate};
use serde::Serialize;

/// Classification of a scheduled break test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TestStatus {
    Upcoming,
    Overdue,
    Completed,
}

/// The scheduling-relevant slice of a concrete test record.
#[derive(Debug, Clone, Default)]
pub struct ScheduleInput {
    pub id: i64,
    pub project: Option<String>,
    pub cast_date: Option<NaiveDate>,
    pub age_days: Option<i32>,
    pub strength_psi: Option<String>,
}

/// A classified test with its derived expected date.
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleEntry {
    pub id: i64,
    pub project: Option<String>,
    pub cast_date: NaiveDate,
    pub expected_date: NaiveDate,
    pub age_days: i32,
    pub strength_psi: Option<String>,
    pub status: TestStatus,
}

fn has_result(strength: Option<&str>) -> bool {
    strength.is_some_and(|s| !s.trim().is_empty())
}

/// Classifies every test that has both a cast date and a cylinder age.
///
/// Tests missing either field are excluded entirely. A recorded strength means
/// completed regardless of date; otherwise the test is overdue only when its
/// expected date is strictly before `today`.
pub fn build_schedule(tests: &[ScheduleInput], today: NaiveDate) -> Vec<ScheduleEntry> {
    tests
        .iter()
        .filter_map(|t| {
            let cast_date = t.cast_date?;
            let age_days = t.age_days?;
            let expected_date = cast_date + Duration::days(i64::from(age_days));

            let status = if has_result(t.strength_psi.as_deref()) {
                TestStatus::Completed
            } else if expected_date < today {
                TestStatus::Overdue
            } else {
                TestStatus::Upcoming
            };

            Some(ScheduleEntry {
                id: t.id,
                project: t.project.clone(),
                cast_date,
                expected_date,
                age_days,
                strength_psi: t.strength_psi.clone(),
                status,
            })
        })
        .collect()
}

/// Tests still waiting for a result that come due within the next `days` days,
/// ascending by expected date. Overdue tests are included.
pub fn upcoming_within(entries: &[ScheduleEntry], today: NaiveDate, days: i64) -> Vec<ScheduleEntry> {
    let end = today + Duration::days(days);
    let mut due: Vec<ScheduleEntry> = entries
        .iter()
        .filter(|e| e.status != TestStatus::Completed && e.expected_date <= end)
        .cloned()
        .collect();
    due.sort_by_key(|e| e.expected_date);
    due
}

/// Entries expected on a single calendar day.
pub fn entries_on(entries: &[ScheduleEntry], date: NaiveDate) -> Vec<ScheduleEntry> {
    entries
        .iter()
        .filter(|e| e.expected_date == date)
        .cloned()
        .collect()
}
