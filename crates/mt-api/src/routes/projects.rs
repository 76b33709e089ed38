//! Project registry routes.
//!
//! Projects are keyed by name and referenced softly from every record table.
//! The detail view aggregates counts and recent records per entity type; a
//! failed section comes back empty instead of failing the whole view.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::auth::Session;
use crate::db::schema::{ConcreteTestRow, FieldInspectionRow, NuclearDensityRow, ProjectRow};
use crate::error::ApiError;
use crate::AppState;

#[derive(Deserialize)]
pub struct CreateProjectRequest {
    pub name: String,
}

#[derive(Serialize)]
pub struct ProjectDetail {
    pub name: String,
    pub field_inspection_count: i64,
    pub concrete_test_count: i64,
    pub nuclear_density_count: i64,
    pub recent_field_inspections: Vec<FieldInspectionRow>,
    pub recent_concrete_tests: Vec<ConcreteTestRow>,
    pub recent_nuclear_density_tests: Vec<NuclearDensityRow>,
}

pub async fn list(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Json<Vec<ProjectRow>>, ApiError> {
    session.require_member()?;

    let projects = sqlx::query_as::<_, ProjectRow>("SELECT name FROM projects ORDER BY name")
        .fetch_all(&state.db)
        .await?;

    Ok(Json(projects))
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    session: Session,
    Json(payload): Json<CreateProjectRequest>,
) -> Result<Json<ProjectRow>, ApiError> {
    session.require_admin()?;

    let name = payload.name.trim();
    if name.is_empty() {
        return Err(ApiError::BadRequest("project name is required".to_string()));
    }

    let project = sqlx::query_as::<_, ProjectRow>("INSERT INTO projects (name) VALUES ($1) RETURNING name")
        .bind(name)
        .fetch_one(&state.db)
        .await?;

    Ok(Json(project))
}

pub async fn get(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(name): Path<String>,
) -> Result<Json<ProjectDetail>, ApiError> {
    session.require_member()?;

    sqlx::query_scalar::<_, String>("SELECT name FROM projects WHERE name = $1")
        .bind(&name)
        .fetch_optional(&state.db)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(ProjectDetail {
        field_inspection_count: count(&state, "field_inspections", &name).await,
        concrete_test_count: count(&state, "concrete_tests", &name).await,
        nuclear_density_count: count(&state, "nuclear_density_tests", &name).await,
        recent_field_inspections: recent::<FieldInspectionRow>(&state, "field_inspections", &name).await,
        recent_concrete_tests: recent::<ConcreteTestRow>(&state, "concrete_tests", &name).await,
        recent_nuclear_density_tests: recent::<NuclearDensityRow>(&state, "nuclear_density_tests", &name).await,
        name,
    }))
}

/// Table names here are call-site literals, never request input.
async fn count(state: &AppState, table: &str, project: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table} WHERE project_name = $1"))
        .bind(project)
        .fetch_one(&state.db)
        .await
        .unwrap_or_else(|e| {
            tracing::warn!("project count on {table} failed: {e}");
            0
        })
}

async fn recent<T>(state: &AppState, table: &str, project: &str) -> Vec<T>
where
    T: for<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow> + Send + Unpin,
{
    sqlx::query_as::<_, T>(&format!(
        "SELECT * FROM {table} WHERE project_name = $1 ORDER BY id DESC LIMIT 10"
    ))
    .bind(project)
    .fetch_all(&state.db)
    .await
    .unwrap_or_else(|e| {
        tracing::warn!("recent records on {table} failed: {e}");
        Vec::new()
    })
}
