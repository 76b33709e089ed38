//! Test-due calendar routes.

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;
use mt_core::{build_schedule, upcoming_within, ScheduleEntry, ScheduleInput};
use serde::Deserialize;
use std::sync::Arc;

use crate::auth::Session;
use crate::db::schema::ScheduleRow;
use crate::error::ApiError;
use crate::AppState;

pub const SCHEDULE_SQL: &str = "SELECT id, project_name, cast_date, age_days, strength_psi \
     FROM concrete_tests WHERE cast_date IS NOT NULL AND age_days IS NOT NULL";

#[derive(Deserialize)]
pub struct DueQuery {
    pub days: Option<i64>,
}

async fn load_schedule(state: &AppState) -> Result<Vec<ScheduleEntry>, ApiError> {
    let rows: Vec<ScheduleRow> = sqlx::query_as(SCHEDULE_SQL).fetch_all(&state.db).await?;
    let inputs: Vec<ScheduleInput> = rows.into_iter().map(Into::into).collect();
    Ok(build_schedule(&inputs, Utc::now().date_naive()))
}

/// Every schedulable test, classified. Feeds the calendar grid.
pub async fn events(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Json<Vec<ScheduleEntry>>, ApiError> {
    session.require_member()?;
    Ok(Json(load_schedule(&state).await?))
}

/// Tests still waiting on a result that come due within the window
/// (default one week), ascending by expected date.
pub async fn due(
    State(state): State<Arc<AppState>>,
    session: Session,
    Query(query): Query<DueQuery>,
) -> Result<Json<Vec<ScheduleEntry>>, ApiError> {
    session.require_member()?;

    let days = query.days.unwrap_or(7).clamp(0, 365);
    let entries = load_schedule(&state).await?;
    Ok(Json(upcoming_within(&entries, Utc::now().date_naive(), days)))
}
