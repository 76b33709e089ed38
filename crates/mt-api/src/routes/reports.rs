//! Datasheet download routes.

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::Response,
};
use chrono::Utc;
use mt_core::report::{
    self, ConcreteTestSheet, DensityReadingLine, FieldInspectionSheet, NuclearDensitySheet,
    ReportKind, ReportMeta, TruckDeliveryLine,
};
use std::sync::Arc;

use crate::auth::Session;
use crate::db::schema::{ConcreteTestRow, FieldInspectionRow, NuclearDensityRow};
use crate::error::ApiError;
use crate::routes::{density_tests, inspections};
use crate::AppState;

pub async fn download(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path((kind, id)): Path<(String, i64)>,
) -> Result<Response, ApiError> {
    session.require_member()?;
    let kind = ReportKind::parse(&kind).ok_or(ApiError::NotFound)?;

    let meta = ReportMeta {
        company: state.config.company_name.clone(),
        generated_on: Utc::now().date_naive(),
    };

    let bytes = match kind {
        ReportKind::ConcreteTest => {
            let row = sqlx::query_as::<_, ConcreteTestRow>("SELECT * FROM concrete_tests WHERE id = $1")
                .bind(id)
                .fetch_optional(&state.db)
                .await?
                .ok_or(ApiError::NotFound)?;
            report::render_concrete_test(&concrete_sheet(row), &meta)?
        }
        ReportKind::FieldInspection => {
            let row = sqlx::query_as::<_, FieldInspectionRow>("SELECT * FROM field_inspections WHERE id = $1")
                .bind(id)
                .fetch_optional(&state.db)
                .await?
                .ok_or(ApiError::NotFound)?;
            let deliveries = inspections::fetch_deliveries(state.as_ref(), id).await?;
            report::render_field_inspection(&inspection_sheet(row, deliveries), &meta)?
        }
        ReportKind::NuclearDensity => {
            let row = sqlx::query_as::<_, NuclearDensityRow>("SELECT * FROM nuclear_density_tests WHERE id = $1")
                .bind(id)
                .fetch_optional(&state.db)
                .await?
                .ok_or(ApiError::NotFound)?;
            let readings = density_tests::fetch_readings(state.as_ref(), id).await?;
            report::render_nuclear_density(&density_sheet(row, readings), &meta)?
        }
    };

    let filename = kind.file_name(id);
    Ok(Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/pdf")
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{filename}\""),
        )
        .body(Body::from(bytes))
        .unwrap())
}

fn concrete_sheet(row: ConcreteTestRow) -> ConcreteTestSheet {
    ConcreteTestSheet {
        id: row.id,
        project: row.project_name,
        location: row.location,
        cast_date: row.cast_date,
        test_date: row.test_date,
        age_days: row.age_days,
        slump_in: row.slump_in,
        truck_no: row.truck_no,
        cross_section_area: row.cross_section_area,
        cylinder_size: row.cylinder_size,
        cylinder_weight: row.cylinder_weight,
        cylinder_density: row.cylinder_density,
        max_load_lbs: row.max_load_lbs,
        strength_psi: row.strength_psi,
        break_type: row.break_type,
        mix_design_psi: row.mix_design_psi,
        supplier: row.supplier,
        recorder: row.recorder,
        gridline_location: row.gridline_location,
        casted_by: row.casted_by,
        area: row.area,
        cast_7day: row.cast_7day,
        cast_14day: row.cast_14day,
        cast_28day: row.cast_28day,
        cast_56day: row.cast_56day,
    }
}

fn inspection_sheet(
    row: FieldInspectionRow,
    deliveries: Vec<crate::db::schema::TruckDeliveryRow>,
) -> FieldInspectionSheet {
    FieldInspectionSheet {
        id: row.id,
        project: row.project_name,
        inspection_date: row.inspection_date,
        location: row.location,
        datasheet_no: row.datasheet_no,
        strength_slump_spec: row.strength_slump_spec,
        psi: row.psi,
        ins: row.ins,
        supplier: row.supplier,
        spec_yards: row.spec_yards,
        actual_yards: row.actual_yards,
        recorder: row.recorder,
        time_on_site: row.time_on_site,
        time_pour_finished: row.time_pour_finished,
        air_temp_f: row.air_temp_f,
        unit_weight: row.unit_weight,
        remarks: row.remarks,
        deliveries: deliveries
            .into_iter()
            .map(|d| TruckDeliveryLine {
                delivery_time: d.delivery_time,
                truck_no: d.truck_no,
                ticket_no: d.ticket_no,
                yards_per_truck: d.yards_per_truck,
                truck_sequence: d.truck_sequence,
                w_c_ratio: d.w_c_ratio,
                slump_in: d.slump_in,
                concrete_temp_f: d.concrete_temp_f,
                cylinder_no: d.cylinder_no,
                cylinder_size: d.cylinder_size,
            })
            .collect(),
    }
}

fn density_sheet(
    row: NuclearDensityRow,
    readings: Vec<crate::db::schema::DensityReadingRow>,
) -> NuclearDensitySheet {
    NuclearDensitySheet {
        id: row.id,
        project: row.project_name,
        inspection_date: row.inspection_date,
        location: row.location,
        time_on_site: row.time_on_site,
        weather_present: row.weather_present,
        weather_previous: row.weather_previous,
        client_representative: row.client_representative,
        recorder: row.recorder,
        trench: row.trench,
        road: row.road,
        foundation: row.foundation,
        proctor: row.proctor,
        moisture: row.moisture,
        comp_pass: row.comp_pass,
        comp_fail: row.comp_fail,
        moisture_pass: row.moisture_pass,
        moisture_fail: row.moisture_fail,
        readings: readings
            .into_iter()
            .map(|r| DensityReadingLine {
                test_no: r.test_no,
                wet_density: r.wet_density,
                dry_density: r.dry_density,
                moisture: r.moisture,
                moisture_pct: r.moisture_pct,
                compaction_pct: r.compaction_pct,
                depth: r.depth,
            })
            .collect(),
    }
}
