//! Role-scoped query assembly.
//!
//! Admin surfaces see every row; staff surfaces see only rows the current
//! user created. Both are the same base query with the scope and the optional
//! project/date-range filter appended — there is no merge logic between the
//! two views.

use mt_core::RecordFilter;
use sqlx::{Postgres, QueryBuilder};
use uuid::Uuid;

#[derive(Debug, Clone, Copy)]
pub enum Scope {
    /// Every record (admin surfaces).
    All,
    /// Only records created by this user (staff surfaces).
    Mine(Uuid),
}

impl Scope {
    pub fn push(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        if let Scope::Mine(user) = self {
            qb.push(" AND created_by = ").push_bind(*user);
        }
    }
}

/// Appends the optional narrowing filter. `date_column` is the record type's
/// primary date column and always comes from a call-site literal, never from
/// request input.
pub fn push_filter(qb: &mut QueryBuilder<'_, Postgres>, filter: &RecordFilter, date_column: &str) {
    if let Some(project) = filter.project() {
        qb.push(" AND project_name = ").push_bind(project.to_owned());
    }
    if let Some(from) = filter.date_from {
        qb.push(format!(" AND {date_column} >= ")).push_bind(from);
    }
    if let Some(to) = filter.date_to {
        qb.push(format!(" AND {date_column} <= ")).push_bind(to);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn builder() -> QueryBuilder<'static, Postgres> {
        QueryBuilder::new("SELECT * FROM concrete_tests WHERE 1=1")
    }

    #[test]
    fn all_scope_adds_no_ownership_clause() {
        let mut qb = builder();
        Scope::All.push(&mut qb);
        assert_eq!(qb.sql(), "SELECT * FROM concrete_tests WHERE 1=1");
    }

    #[test]
    fn mine_scope_binds_the_creator() {
        let mut qb = builder();
        Scope::Mine(Uuid::new_v4()).push(&mut qb);
        assert_eq!(
            qb.sql(),
            "SELECT * FROM concrete_tests WHERE 1=1 AND created_by = $1"
        );
    }

    #[test]
    fn filter_appends_only_set_constraints() {
        let mut qb = builder();
        push_filter(&mut qb, &RecordFilter::default(), "cast_date");
        assert_eq!(qb.sql(), "SELECT * FROM concrete_tests WHERE 1=1");

        let mut qb = builder();
        let filter = RecordFilter {
            project: Some("Bridge 12".to_string()),
            date_from: NaiveDate::from_ymd_opt(2024, 1, 1),
            date_to: None,
        };
        push_filter(&mut qb, &filter, "cast_date");
        assert_eq!(
            qb.sql(),
            "SELECT * FROM concrete_tests WHERE 1=1 AND project_name = $1 AND cast_date >= $2"
        );
    }

    #[test]
    fn scope_and_filter_compose() {
        let mut qb = builder();
        Scope::Mine(Uuid::new_v4()).push(&mut qb);
        let filter = RecordFilter {
            project: Some("Bridge 12".to_string()),
            date_from: None,
            date_to: NaiveDate::from_ymd_opt(2024, 6, 30),
        };
        push_filter(&mut qb, &filter, "cast_date");
        assert_eq!(
            qb.sql(),
            "SELECT * FROM concrete_tests WHERE 1=1 AND created_by = $1 AND project_name = $2 AND cast_date <= $3"
        );
    }
}
