//! Admin routes.

use axum::{extract::State, Json};
use chrono::Utc;
use mt_core::{build_schedule, ScheduleInput, TestStatus};
use serde::Serialize;
use std::sync::Arc;

use crate::auth::Session;
use crate::db::schema::ScheduleRow;
use crate::error::ApiError;
use crate::routes::calendar::SCHEDULE_SQL;
use crate::AppState;

#[derive(Serialize)]
pub struct StatsResponse {
    pub projects: i64,
    pub field_inspections: i64,
    pub concrete_tests: i64,
    pub nuclear_density_tests: i64,
    pub overdue_tests: i64,
}

#[derive(Serialize)]
pub struct ConfigResponse {
    pub company_name: String,
    pub version: String,
}

/// Dashboard counts. A failed count renders as zero so one bad query does not
/// blank the whole dashboard.
pub async fn get_stats(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Json<StatsResponse>, ApiError> {
    session.require_member()?;

    Ok(Json(StatsResponse {
        projects: count(&state, "projects").await,
        field_inspections: count(&state, "field_inspections").await,
        concrete_tests: count(&state, "concrete_tests").await,
        nuclear_density_tests: count(&state, "nuclear_density_tests").await,
        overdue_tests: overdue_count(&state).await,
    }))
}

pub async fn get_config(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Json<ConfigResponse>, ApiError> {
    session.require_admin()?;

    Ok(Json(ConfigResponse {
        company_name: state.config.company_name.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}

async fn count(state: &AppState, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(&state.db)
        .await
        .unwrap_or_else(|e| {
            tracing::warn!("stats count on {table} failed: {e}");
            0
        })
}

async fn overdue_count(state: &AppState) -> i64 {
    match sqlx::query_as::<_, ScheduleRow>(SCHEDULE_SQL).fetch_all(&state.db).await {
        Ok(rows) => {
            let inputs: Vec<ScheduleInput> = rows.into_iter().map(Into::into).collect();
            build_schedule(&inputs, Utc::now().date_naive())
                .iter()
                .filter(|e| e.status == TestStatus::Overdue)
                .count() as i64
        }
        Err(e) => {
            tracing::warn!("overdue count failed: {e}");
            0
        }
    }
}
