//! Database schema types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, FromRow, Serialize, Deserialize)]
pub struct ProjectRow {
    pub name: String,
}

#[derive(Debug, FromRow, Serialize, Deserialize)]
pub struct FieldInspectionRow {
    pub id: i64,
    pub project_name: Option<String>,
    pub inspection_date: Option<NaiveDate>,
    pub location: Option<String>,
    pub gridline_a: Option<String>,
    pub gridline_1: Option<String>,
    pub datasheet_no: Option<String>,
    pub strength_slump_spec: Option<String>,
    pub psi: Option<String>,
    pub ins: Option<String>,
    pub remarks: Option<String>,
    pub supplier: Option<String>,
    pub spec_yards: Option<f64>,
    pub actual_yards: Option<f64>,
    pub recorder: Option<String>,
    pub time_on_site: Option<String>,
    pub time_pour_finished: Option<String>,
    pub air_temp_f: Option<String>,
    pub unit_weight: Option<String>,
    pub location_other: Option<String>,
    pub entry_date: Option<DateTime<Utc>>,
    pub created_by: Option<Uuid>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Debug, FromRow, Serialize, Deserialize)]
pub struct TruckDeliveryRow {
    pub id: i64,
    pub inspection_id: i64,
    pub delivery_time: Option<String>,
    pub truck_no: Option<String>,
    pub ticket_no: Option<String>,
    pub yards_per_truck: Option<String>,
    pub truck_sequence: Option<String>,
    pub w_c_ratio: Option<String>,
    pub slump_in: Option<String>,
    pub concrete_temp_f: Option<String>,
    pub cylinder_no: Option<i32>,
    pub cylinder_size: Option<String>,
}

#[derive(Debug, FromRow, Serialize, Deserialize)]
pub struct ConcreteTestRow {
    pub id: i64,
    pub project_name: Option<String>,
    pub location: Option<String>,
    pub cast_date: Option<NaiveDate>,
    pub test_date: Option<NaiveDate>,
    pub age_days: Option<i32>,
    pub slump_in: Option<String>,
    pub truck_no: Option<String>,
    pub cross_section_area: Option<String>,
    pub cylinder_size: Option<String>,
    pub cylinder_weight: Option<String>,
    pub cylinder_density: Option<String>,
    pub max_load_lbs: Option<String>,
    pub strength_psi: Option<String>,
    pub break_type: Option<String>,
    pub mix_design_psi: Option<String>,
    pub supplier: Option<String>,
    pub recorder: Option<String>,
    pub gridline_location: Option<String>,
    pub casted_by: Option<String>,
    pub area: Option<String>,
    pub cast_7day: Option<String>,
    pub cast_14day: Option<String>,
    pub cast_28day: Option<String>,
    pub cast_56day: Option<String>,
    pub entry_date: Option<DateTime<Utc>>,
    pub created_by: Option<Uuid>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Debug, FromRow, Serialize, Deserialize)]
pub struct NuclearDensityRow {
    pub id: i64,
    pub project_name: Option<String>,
    pub location: Option<String>,
    pub inspection_date: Option<NaiveDate>,
    pub time_on_site: Option<String>,
    pub weather_present: Option<String>,
    pub weather_previous: Option<String>,
    pub client_representative: Option<String>,
    pub recorder: Option<String>,
    pub trench: Option<bool>,
    pub road: Option<bool>,
    pub foundation: Option<bool>,
    pub proctor: Option<String>,
    pub moisture: Option<String>,
    pub comp_pass: Option<bool>,
    pub comp_fail: Option<bool>,
    pub moisture_pass: Option<bool>,
    pub moisture_fail: Option<bool>,
    pub sketch: Option<String>,
    pub entry_date: Option<DateTime<Utc>>,
    pub created_by: Option<Uuid>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Debug, FromRow, Serialize, Deserialize)]
pub struct DensityReadingRow {
    pub id: i64,
    pub test_id: i64,
    pub test_no: Option<String>,
    pub wet_density: Option<String>,
    pub dry_density: Option<String>,
    pub moisture: Option<String>,
    pub moisture_pct: Option<String>,
    pub compaction_pct: Option<String>,
    pub depth: Option<String>,
}

/// The scheduling projection of `concrete_tests`.
#[derive(Debug, FromRow)]
pub struct ScheduleRow {
    pub id: i64,
    pub project_name: Option<String>,
    pub cast_date: Option<NaiveDate>,
    pub age_days: Option<i32>,
    pub strength_psi: Option<String>,
}

impl From<ScheduleRow> for mt_core::ScheduleInput {
    fn from(row: ScheduleRow) -> Self {
        mt_core::ScheduleInput {
            id: row.id,
            project: row.project_name,
            cast_date: row.cast_date,
            age_days: row.age_days,
            strength_psi: row.strength_psi,
        }
    }
}
