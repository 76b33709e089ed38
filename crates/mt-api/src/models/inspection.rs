//! Field inspection models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::db::schema::{FieldInspectionRow, TruckDeliveryRow};

/// Full-record payload for creating or replacing a field inspection. The
/// delivery set is replaced wholesale on update.
#[derive(Debug, Default, Deserialize)]
pub struct FieldInspectionInput {
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
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[serde(default)]
    pub deliveries: Vec<TruckDeliveryInput>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TruckDeliveryInput {
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

#[derive(Debug, Serialize)]
pub struct FieldInspectionDetail {
    #[serde(flatten)]
    pub record: FieldInspectionRow,
    pub deliveries: Vec<TruckDeliveryRow>,
}
