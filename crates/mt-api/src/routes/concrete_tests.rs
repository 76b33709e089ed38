//! Concrete cylinder test routes.

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
use crate::db::schema::ConcreteTestRow;
use crate::error::ApiError;
use crate::models::{ConcreteTestInput, ListParams, ListResponse};
use crate::scope::{push_filter, Scope};
use crate::AppState;

const WRITE_ROLES: &[Role] = &[Role::Admin, Role::LabTechnician];

/// Shared by the admin and staff list surfaces; only the scope differs.
pub async fn list_scoped(
    state: &AppState,
    scope: Scope,
    params: &ListParams,
) -> Result<ListResponse<ConcreteTestRow>, ApiError> {
    let filter = params.filter();

    let mut qb = QueryBuilder::new("SELECT * FROM concrete_tests WHERE 1=1");
    scope.push(&mut qb);
    push_filter(&mut qb, &filter, "cast_date");
    qb.push(" ORDER BY id DESC LIMIT ")
        .push_bind(params.limit())
        .push(" OFFSET ")
        .push_bind(params.offset());
    let items = qb
        .build_query_as::<ConcreteTestRow>()
        .fetch_all(&state.db)
        .await?;

    let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM concrete_tests WHERE 1=1");
    scope.push(&mut qb);
    push_filter(&mut qb, &filter, "cast_date");
    let total: i64 = qb.build_query_scalar().fetch_one(&state.db).await?;

    Ok(ListResponse { items, total })
}

pub async fn list(
    State(state): State<Arc<AppState>>,
    session: Session,
    Query(params): Query<ListParams>,
) -> Result<Json<ListResponse<ConcreteTestRow>>, ApiError> {
    session.require_member()?;
    Ok(Json(list_scoped(&state, Scope::All, &params).await?))
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    session: Session,
    Json(input): Json<ConcreteTestInput>,
) -> Result<Json<ConcreteTestRow>, ApiError> {
    session.require(WRITE_ROLES)?;

    let row = sqlx::query_as::<_, ConcreteTestRow>(
        r#"
        INSERT INTO concrete_tests (
            project_name, location, cast_date, test_date, age_days,
            slump_in, truck_no, cross_section_area, cylinder_size, cylinder_weight,
            cylinder_density, max_load_lbs, strength_psi, break_type, mix_design_psi,
            supplier, recorder, gridline_location, casted_by, area,
            cast_7day, cast_14day, cast_28day, cast_56day,
            latitude, longitude, entry_date, created_by
        ) VALUES (
            $1, $2, $3, $4, $5, $6, $7, $8, $9, $10,
            $11, $12, $13, $14, $15, $16, $17, $18, $19, $20,
            $21, $22, $23, $24, $25, $26, NOW(), $27
        )
        RETURNING *
        "#,
    )
    .bind(&input.project_name)
    .bind(&input.location)
    .bind(input.cast_date)
    .bind(input.test_date)
    .bind(input.age_days)
    .bind(&input.slump_in)
    .bind(&input.truck_no)
    .bind(&input.cross_section_area)
    .bind(&input.cylinder_size)
    .bind(&input.cylinder_weight)
    .bind(&input.cylinder_density)
    .bind(&input.max_load_lbs)
    .bind(&input.strength_psi)
    .bind(&input.break_type)
    .bind(&input.mix_design_psi)
    .bind(&input.supplier)
    .bind(&input.recorder)
    .bind(&input.gridline_location)
    .bind(&input.casted_by)
    .bind(&input.area)
    .bind(&input.cast_7day)
    .bind(&input.cast_14day)
    .bind(&input.cast_28day)
    .bind(&input.cast_56day)
    .bind(input.latitude)
    .bind(input.longitude)
    .bind(session.user_id)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(row))
}

pub async fn get(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(id): Path<i64>,
) -> Result<Json<ConcreteTestRow>, ApiError> {
    session.require_member()?;

    let row = sqlx::query_as::<_, ConcreteTestRow>("SELECT * FROM concrete_tests WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.db)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(row))
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(id): Path<i64>,
    Json(input): Json<ConcreteTestInput>,
) -> Result<Json<ConcreteTestRow>, ApiError> {
    session.require(WRITE_ROLES)?;
    require_owner_unless_admin(&state, &session, id).await?;

    // Full-record replace; creator, entry timestamp, and capture coordinates
    // are never rewritten.
    let row = sqlx::query_as::<_, ConcreteTestRow>(
        r#"
        UPDATE concrete_tests SET
            project_name = $1, location = $2, cast_date = $3, test_date = $4, age_days = $5,
            slump_in = $6, truck_no = $7, cross_section_area = $8, cylinder_size = $9,
            cylinder_weight = $10, cylinder_density = $11, max_load_lbs = $12,
            strength_psi = $13, break_type = $14, mix_design_psi = $15, supplier = $16,
            recorder = $17, gridline_location = $18, casted_by = $19, area = $20,
            cast_7day = $21, cast_14day = $22, cast_28day = $23, cast_56day = $24
        WHERE id = $25
        RETURNING *
        "#,
    )
    .bind(&input.project_name)
    .bind(&input.location)
    .bind(input.cast_date)
    .bind(input.test_date)
    .bind(input.age_days)
    .bind(&input.slump_in)
    .bind(&input.truck_no)
    .bind(&input.cross_section_area)
    .bind(&input.cylinder_size)
    .bind(&input.cylinder_weight)
    .bind(&input.cylinder_density)
    .bind(&input.max_load_lbs)
    .bind(&input.strength_psi)
    .bind(&input.break_type)
    .bind(&input.mix_design_psi)
    .bind(&input.supplier)
    .bind(&input.recorder)
    .bind(&input.gridline_location)
    .bind(&input.casted_by)
    .bind(&input.area)
    .bind(&input.cast_7day)
    .bind(&input.cast_14day)
    .bind(&input.cast_28day)
    .bind(&input.cast_56day)
    .bind(id)
    .fetch_optional(&state.db)
    .await?
    .ok_or(ApiError::NotFound)?;

    Ok(Json(row))
}

pub async fn delete(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    session.require_admin()?;

    let result = sqlx::query("DELETE FROM concrete_tests WHERE id = $1")
        .bind(id)
        .execute(&state.db)
        .await?;
    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound);
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Non-admin writers may only touch records they created.
async fn require_owner_unless_admin(
    state: &AppState,
    session: &Session,
    id: i64,
) -> Result<(), ApiError> {
    if session.is_admin() {
        return Ok(());
    }
    let owner: Option<Option<Uuid>> =
        sqlx::query_scalar("SELECT created_by FROM concrete_tests WHERE id = $1")
            .bind(id)
            .fetch_optional(&state.db)
            .await?;
    match owner.ok_or(ApiError::NotFound)? {
        Some(creator) if creator == session.user_id => Ok(()),
        _ => Err(ApiError::Forbidden),
    }
}
