//! Field inspection routes.
//!
//! An inspection carries a child set of truck deliveries; the detail view
//! returns both, and a full-record update replaces the delivery set wholesale.

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
use crate::db::schema::{FieldInspectionRow, TruckDeliveryRow};
use crate::error::ApiError;
use crate::models::{FieldInspectionDetail, FieldInspectionInput, ListParams, ListResponse, TruckDeliveryInput};
use crate::scope::{push_filter, Scope};
use crate::AppState;

const WRITE_ROLES: &[Role] = &[Role::Admin, Role::FieldInspector];

pub async fn list_scoped(
    state: &AppState,
    scope: Scope,
    params: &ListParams,
) -> Result<ListResponse<FieldInspectionRow>, ApiError> {
    let filter = params.filter();

    let mut qb = QueryBuilder::new("SELECT * FROM field_inspections WHERE 1=1");
    scope.push(&mut qb);
    push_filter(&mut qb, &filter, "inspection_date");
    qb.push(" ORDER BY id DESC LIMIT ")
        .push_bind(params.limit())
        .push(" OFFSET ")
        .push_bind(params.offset());
    let items = qb
        .build_query_as::<FieldInspectionRow>()
        .fetch_all(&state.db)
        .await?;

    let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM field_inspections WHERE 1=1");
    scope.push(&mut qb);
    push_filter(&mut qb, &filter, "inspection_date");
    let total: i64 = qb.build_query_scalar().fetch_one(&state.db).await?;

    Ok(ListResponse { items, total })
}

pub async fn list(
    State(state): State<Arc<AppState>>,
    session: Session,
    Query(params): Query<ListParams>,
) -> Result<Json<ListResponse<FieldInspectionRow>>, ApiError> {
    session.require_member()?;
    Ok(Json(list_scoped(&state, Scope::All, &params).await?))
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    session: Session,
    Json(input): Json<FieldInspectionInput>,
) -> Result<Json<FieldInspectionDetail>, ApiError> {
    session.require(WRITE_ROLES)?;

    let record = sqlx::query_as::<_, FieldInspectionRow>(
        r#"
        INSERT INTO field_inspections (
            project_name, inspection_date, location, gridline_a, gridline_1,
            datasheet_no, strength_slump_spec, psi, ins, remarks,
            supplier, spec_yards, actual_yards, recorder, time_on_site,
            time_pour_finished, air_temp_f, unit_weight, location_other,
            latitude, longitude, entry_date, created_by
        ) VALUES (
            $1, $2, $3, $4, $5, $6, $7, $8, $9, $10,
            $11, $12, $13, $14, $15, $16, $17, $18, $19,
            $20, $21, NOW(), $22
        )
        RETURNING *
        "#,
    )
    .bind(&input.project_name)
    .bind(input.inspection_date)
    .bind(&input.location)
    .bind(&input.gridline_a)
    .bind(&input.gridline_1)
    .bind(&input.datasheet_no)
    .bind(&input.strength_slump_spec)
    .bind(&input.psi)
    .bind(&input.ins)
    .bind(&input.remarks)
    .bind(&input.supplier)
    .bind(input.spec_yards)
    .bind(input.actual_yards)
    .bind(&input.recorder)
    .bind(&input.time_on_site)
    .bind(&input.time_pour_finished)
    .bind(&input.air_temp_f)
    .bind(&input.unit_weight)
    .bind(&input.location_other)
    .bind(input.latitude)
    .bind(input.longitude)
    .bind(session.user_id)
    .fetch_one(&state.db)
    .await?;

    insert_deliveries(state.as_ref(), record.id, &input.deliveries).await?;
    let deliveries = fetch_deliveries(state.as_ref(), record.id).await?;

    Ok(Json(FieldInspectionDetail { record, deliveries }))
}

pub async fn get(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(id): Path<i64>,
) -> Result<Json<FieldInspectionDetail>, ApiError> {
    session.require_member()?;

    let record = sqlx::query_as::<_, FieldInspectionRow>("SELECT * FROM field_inspections WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.db)
        .await?
        .ok_or(ApiError::NotFound)?;
    let deliveries = fetch_deliveries(state.as_ref(), id).await?;

    Ok(Json(FieldInspectionDetail { record, deliveries }))
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(id): Path<i64>,
    Json(input): Json<FieldInspectionInput>,
) -> Result<Json<FieldInspectionDetail>, ApiError> {
    session.require(WRITE_ROLES)?;
    require_owner_unless_admin(&state, &session, id).await?;

    let record = sqlx::query_as::<_, FieldInspectionRow>(
        r#"
        UPDATE field_inspections SET
            project_name = $1, inspection_date = $2, location = $3, gridline_a = $4,
            gridline_1 = $5, datasheet_no = $6, strength_slump_spec = $7, psi = $8,
            ins = $9, remarks = $10, supplier = $11, spec_yards = $12,
            actual_yards = $13, recorder = $14, time_on_site = $15,
            time_pour_finished = $16, air_temp_f = $17, unit_weight = $18,
            location_other = $19
        WHERE id = $20
        RETURNING *
        "#,
    )
    .bind(&input.project_name)
    .bind(input.inspection_date)
    .bind(&input.location)
    .bind(&input.gridline_a)
    .bind(&input.gridline_1)
    .bind(&input.datasheet_no)
    .bind(&input.strength_slump_spec)
    .bind(&input.psi)
    .bind(&input.ins)
    .bind(&input.remarks)
    .bind(&input.supplier)
    .bind(input.spec_yards)
    .bind(input.actual_yards)
    .bind(&input.recorder)
    .bind(&input.time_on_site)
    .bind(&input.time_pour_finished)
    .bind(&input.air_temp_f)
    .bind(&input.unit_weight)
    .bind(&input.location_other)
    .bind(id)
    .fetch_optional(&state.db)
    .await?
    .ok_or(ApiError::NotFound)?;

    // Replace the delivery set.
    sqlx::query("DELETE FROM truck_deliveries WHERE inspection_id = $1")
        .bind(id)
        .execute(&state.db)
        .await?;
    insert_deliveries(state.as_ref(), id, &input.deliveries).await?;
    let deliveries = fetch_deliveries(state.as_ref(), id).await?;

    Ok(Json(FieldInspectionDetail { record, deliveries }))
}

pub async fn delete(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    session.require_admin()?;

    let result = sqlx::query("DELETE FROM field_inspections WHERE id = $1")
        .bind(id)
        .execute(&state.db)
        .await?;
    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound);
    }
    sqlx::query("DELETE FROM truck_deliveries WHERE inspection_id = $1")
        .bind(id)
        .execute(&state.db)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

async fn insert_deliveries(
    state: &AppState,
    inspection_id: i64,
    deliveries: &[TruckDeliveryInput],
) -> Result<(), ApiError> {
    for d in deliveries {
        sqlx::query(
            r#"
            INSERT INTO truck_deliveries (
                inspection_id, delivery_time, truck_no, ticket_no, yards_per_truck,
                truck_sequence, w_c_ratio, slump_in, concrete_temp_f, cylinder_no, cylinder_size
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(inspection_id)
        .bind(&d.delivery_time)
        .bind(&d.truck_no)
        .bind(&d.ticket_no)
        .bind(&d.yards_per_truck)
        .bind(&d.truck_sequence)
        .bind(&d.w_c_ratio)
        .bind(&d.slump_in)
        .bind(&d.concrete_temp_f)
        .bind(d.cylinder_no)
        .bind(&d.cylinder_size)
        .execute(&state.db)
        .await?;
    }
    Ok(())
}

pub async fn fetch_deliveries(state: &AppState, inspection_id: i64) -> Result<Vec<TruckDeliveryRow>, ApiError> {
    Ok(sqlx::query_as::<_, TruckDeliveryRow>(
        "SELECT * FROM truck_deliveries WHERE inspection_id = $1 ORDER BY id",
    )
    .bind(inspection_id)
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
        sqlx::query_scalar("SELECT created_by FROM field_inspections WHERE id = $1")
            .bind(id)
            .fetch_optional(&state.db)
            .await?;
    match owner.ok_or(ApiError::NotFound)? {
        Some(creator) if creator == session.user_id => Ok(()),
        _ => Err(ApiError::Forbidden),
    }
}
