//! Lookup table management.
//!
//! One generic handler set serves every controlled vocabulary. Table and
//! column names come only from the registry in `mt_core::lookups`; a name
//! that does not resolve there never reaches SQL.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use mt_core::lookups::{self, LookupTable, LOOKUP_TABLES};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::auth::Session;
use crate::error::ApiError;
use crate::AppState;

#[derive(Deserialize)]
pub struct AddValueRequest {
    pub value: String,
}

#[derive(Serialize)]
pub struct LookupValuesResponse {
    pub table: &'static str,
    pub label: &'static str,
    pub values: Vec<String>,
}

/// The registry itself, for the admin management page's table list.
pub async fn registry(session: Session) -> Result<Json<&'static [LookupTable]>, ApiError> {
    session.require_member()?;
    Ok(Json(LOOKUP_TABLES))
}

pub async fn values(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(table): Path<String>,
) -> Result<Json<LookupValuesResponse>, ApiError> {
    session.require_member()?;
    let lookup = lookups::find(&table).ok_or(ApiError::NotFound)?;

    let values: Vec<String> = sqlx::query_scalar(&format!(
        "SELECT {column} FROM {table} ORDER BY {column}",
        column = lookup.column,
        table = lookup.table,
    ))
    .fetch_all(&state.db)
    .await?;

    Ok(Json(LookupValuesResponse {
        table: lookup.table,
        label: lookup.label,
        values,
    }))
}

pub async fn add_value(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(table): Path<String>,
    Json(payload): Json<AddValueRequest>,
) -> Result<StatusCode, ApiError> {
    session.require_admin()?;
    let lookup = lookups::find(&table).ok_or(ApiError::NotFound)?;

    let value = payload.value.trim();
    if value.is_empty() {
        return Err(ApiError::BadRequest("value is required".to_string()));
    }

    sqlx::query(&format!(
        "INSERT INTO {table} ({column}) VALUES ($1)",
        table = lookup.table,
        column = lookup.column,
    ))
    .bind(value)
    .execute(&state.db)
    .await?;

    Ok(StatusCode::CREATED)
}

/// Removes every row holding the value. Lookup values are the only
/// hard-deletable entity.
pub async fn delete_value(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path((table, value)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    session.require_admin()?;
    let lookup = lookups::find(&table).ok_or(ApiError::NotFound)?;

    let result = sqlx::query(&format!(
        "DELETE FROM {table} WHERE {column} = $1",
        table = lookup.table,
        column = lookup.column,
    ))
    .bind(&value)
    .execute(&state.db)
    .await?;
    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound);
    }

    Ok(StatusCode::NO_CONTENT)
}
