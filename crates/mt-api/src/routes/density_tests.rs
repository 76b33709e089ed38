//! Nuclear density test routes.
//!
//! A test carries a child set of density readings; the detail view returns
//! both, and a full-record update replaces the reading set wholesale. The
//! pass/fail pairs are stored exactly as submitted.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use mt_core::Role;
use sqlx::QueryBuilder;
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::Session;
use crate::db::schema::{DensityReadingRow, NuclearDensityRow};
use crate::error::ApiError;
use crate::models::{DensityReadingInput, ListParams, ListResponse, NuclearDensityDetail, NuclearDensityInput};
use crate::scope::{push_filter, Scope};
use crate::AppState;

const WRITE_ROLES: &[Role] = &[Role::Admin, Role::FieldInspector];

pub async fn list_scoped(
    state: &AppState,
    scope: Scope,
    params: &ListParams,
) -> Result<ListResponse<NuclearDensityRow>, ApiError> {
    let filter = params.filter();

    let mut qb = QueryBuilder::new("SELECT * FROM nuclear_density_tests WHERE 1=1");
    scope.push(&mut qb);
    push_filter(&mut qb, &filter, "inspection_date");
    qb.push(" ORDER BY id DESC LIMIT ")
        .push_bind(params.limit())
        .push(" OFFSET ")
        .push_bind(params.offset());
    let items = qb
        .build_query_as::<NuclearDensityRow>()
        .fetch_all(&state.db)
        .await?;

    let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM nuclear_density_tests WHERE 1=1");
    scope.push(&mut qb);
    push_filter(&mut qb, &filter, "inspection_date");
    let total: i64 = qb.build_query_scalar().fetch_one(&state.db).await?;

    Ok(ListResponse { items, total })
}

pub async fn list(
    State(state): State<Arc<AppState>>,
    session: Session,
    Query(params): Query<ListParams>,
) -> Result<Json<ListResponse<NuclearDensityRow>>, ApiError> {
    session.require_member()?;
    Ok(Json(list_scoped(&state, Scope::All, &params).await?))
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    session: Session,
    Json(input): Json<NuclearDensityInput>,
) -> Result<Json<NuclearDensityDetail>, ApiError> {
    session.require(WRITE_ROLES)?;

    let record = sqlx::query_as::<_, NuclearDensityRow>(
        r#"
        INSERT INTO nuclear_density_tests (
            project_name, location, inspection_date, time_on_site, weather_present,
            weather_previous, client_representative, recorder, trench, road,
            foundation, proctor, moisture, comp_pass, comp_fail,
            moisture_pass, moisture_fail, sketch, latitude, longitude,
            entry_date, created_by
        ) VALUES (
            $1, $2, $3, $4, $5, $6, $7, $8, $9, $10,
            $11, $12, $13, $14, $15, $16, $17, $18, $19, $20,
            NOW(), $21
        )
        RETURNING *
        "#,
    )
    .bind(&input.project_name)
    .bind(&input.location)
    .bind(input.inspection_date)
    .bind(&input.time_on_site)
    .bind(&input.weather_present)
    .bind(&input.weather_previous)
    .bind(&input.client_representative)
    .bind(&input.recorder)
    .bind(input.trench)
    .bind(input.road)
    .bind(input.foundation)
    .bind(&input.proctor)
    .bind(&input.moisture)
    .bind(input.comp_pass)
    .bind(input.comp_fail)
    .bind(input.moisture_pass)
    .bind(input.moisture_fail)
    .bind(&input.sketch)
    .bind(input.latitude)
    .bind(input.longitude)
    .bind(session.user_id)
    .fetch_one(&state.db)
    .await?;

    insert_readings(state.as_ref(), record.id, &input.readings).await?;
    let readings = fetch_readings(state.as_ref(), record.id).await?;

    Ok(Json(NuclearDensityDetail { record, readings }))
}

pub async fn get(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(id): Path<i64>,
) -> Result<Json<NuclearDensityDetail>, ApiError> {
    session.require_member()?;

    let record = sqlx::query_as::<_, NuclearDensityRow>("SELECT * FROM nuclear_density_tests WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.db)
        .await?
        .ok_or(ApiError::NotFound)?;
    let readings = fetch_readings(state.as_ref(), id).await?;

    Ok(Json(NuclearDensityDetail { record, readings }))
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(id): Path<i64>,
    Json(input): Json<NuclearDensityInput>,
) -> Result<Json<NuclearDensityDetail>, ApiError> {
    session.require(WRITE_ROLES)?;
    require_owner_unless_admin(&state, &session, id).await?;

    let record = sqlx::query_as::<_, NuclearDensityRow>(
        r#"
        UPDATE nuclear_density_tests SET
            project_name = $1, location = $2, inspection_date = $3, time_on_site = $4,
            weather_present = $5, weather_previous = $6, client_representative = $7,
            recorder = $8, trench = $9, road = $10, foundation = $11, proctor = $12,
            moisture = $13, comp_pass = $14, comp_fail = $15, moisture_pass = $16,
            moisture_fail = $17, sketch = $18
        WHERE id = $19
        RETURNING *
        "#,
    )
    .bind(&input.project_name)
    .bind(&input.location)
    .bind(input.inspection_date)
    .bind(&input.time_on_site)
    .bind(&input.weather_present)
    .bind(&input.weather_previous)
    .bind(&input.client_representative)
    .bind(&input.recorder)
    .bind(input.trench)
    .bind(input.road)
    .bind(input.foundation)
    .bind(&input.proctor)
    .bind(&input.moisture)
    .bind(input.comp_pass)
    .bind(input.comp_fail)
    .bind(input.moisture_pass)
    .bind(input.moisture_fail)
    .bind(&input.sketch)
    .bind(id)
    .fetch_optional(&state.db)
    .await?
    .ok_or(ApiError::NotFound)?;

    sqlx::query("DELETE FROM density_readings WHERE test_id = $1")
        .bind(id)
        .execute(&state.db)
        .await?;
    insert_readings(state.as_ref(), id, &input.readings).await?;
    let readings = fetch_readings(state.as_ref(), id).await?;

    Ok(Json(NuclearDensityDetail { record, readings }))
}

pub async fn delete(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    session.require_admin()?;

    let result = sqlx::query("DELETE FROM nuclear_density_tests WHERE id = $1")
        .bind(id)
        .execute(&state.db)
        .await?;
    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound);
    }
    sqlx::query("DELETE FROM density_readings WHERE test_id = $1")
        .bind(id)
        .execute(&state.db)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

async fn insert_readings(
    state: &AppState,
    test_id: i64,
    readings: &[DensityReadingInput],
) -> Result<(), ApiError> {
    for r in readings {
        sqlx::query(
            r#"
            INSERT INTO density_readings (
                test_id, test_no, wet_density, dry_density, moisture,
                moisture_pct, compaction_pct, depth
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(test_id)
        .bind(&r.test_no)
        .bind(&r.wet_density)
        .bind(&r.dry_density)
        .bind(&r.moisture)
        .bind(&r.moisture_pct)
        .bind(&r.compaction_pct)
        .bind(&r.depth)
        .execute(&state.db)
        .await?;
    }
    Ok(())
}

pub async fn fetch_readings(state: &AppState, test_id: i64) -> Result<Vec<DensityReadingRow>, ApiError> {
    Ok(sqlx::query_as::<_, DensityReadingRow>(
        "SELECT * FROM density_readings WHERE test_id = $1 ORDER BY id",
    )
    .bind(test_id)
    .fetch_all(&state.db)
    .await?)
}

async fn require_owner_unless_admin(
    state: &AppState,
    session: &Session,
    id: i64,
) -> Result<(), ApiError> {
    if session.is_admin() {
        return Ok(());
    }
    let owner: Option<Option<Uuid>> =
        sqlx::query_scalar("SELECT created_by FROM nuclear_density_tests WHERE id = $1")
            .bind(id)
            .fetch_optional(&state.db)
            .await?;
    match owner.ok_or(ApiError::NotFound)? {
        Some(creator) if creator == session.user_id => Ok(()),
        _ => Err(ApiError::Forbidden),
    }
}
