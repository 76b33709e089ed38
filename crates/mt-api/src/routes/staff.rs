//! Staff surface: the same record queries as the admin surface, scoped to
//! rows the signed-in user created. No merge logic exists between the two
//! views; only the scope differs.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Serialize;
use std::sync::Arc;

use crate::auth::Session;
use crate::db::schema::{ConcreteTestRow, FieldInspectionRow, NuclearDensityRow};
use crate::error::ApiError;
use crate::models::{ListParams, ListResponse};
use crate::routes::{concrete_tests, density_tests, inspections};
use crate::scope::Scope;
use crate::AppState;

#[derive(Serialize)]
pub struct StaffSummary {
    pub field_inspections: i64,
    pub concrete_tests: i64,
    pub nuclear_density_tests: i64,
}

pub async fn list_field_inspections(
    State(state): State<Arc<AppState>>,
    session: Session,
    Query(params): Query<ListParams>,
) -> Result<Json<ListResponse<FieldInspectionRow>>, ApiError> {
    session.require_member()?;
    let scope = Scope::Mine(session.user_id);
    Ok(Json(inspections::list_scoped(&state, scope, &params).await?))
}

pub async fn list_concrete_tests(
    State(state): State<Arc<AppState>>,
    session: Session,
    Query(params): Query<ListParams>,
) -> Result<Json<ListResponse<ConcreteTestRow>>, ApiError> {
    session.require_member()?;
    let scope = Scope::Mine(session.user_id);
    Ok(Json(concrete_tests::list_scoped(&state, scope, &params).await?))
}

pub async fn list_nuclear_density(
    State(state): State<Arc<AppState>>,
    session: Session,
    Query(params): Query<ListParams>,
) -> Result<Json<ListResponse<NuclearDensityRow>>, ApiError> {
    session.require_member()?;
    let scope = Scope::Mine(session.user_id);
    Ok(Json(density_tests::list_scoped(&state, scope, &params).await?))
}

/// Counts for the staff dashboard. A failed count renders as zero rather than
/// failing the whole view.
pub async fn summary(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Json<StaffSummary>, ApiError> {
    session.require_member()?;

    Ok(Json(StaffSummary {
        field_inspections: count_mine(&state, "field_inspections", &session).await,
        concrete_tests: count_mine(&state, "concrete_tests", &session).await,
        nuclear_density_tests: count_mine(&state, "nuclear_density_tests", &session).await,
    }))
}

async fn count_mine(state: &AppState, table: &str, session: &Session) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table} WHERE created_by = $1"))
        .bind(session.user_id)
        .fetch_one(&state.db)
        .await
        .unwrap_or_else(|e| {
            tracing::warn!("staff count on {table} failed: {e}");
            0
        })
}
