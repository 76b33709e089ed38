//! Nuclear density test models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::db::schema::{DensityReadingRow, NuclearDensityRow};

/// Full-record payload for creating or replacing a nuclear density test. The
/// reading set is replaced wholesale on update.
#[derive(Debug, Default, Deserialize)]
pub struct NuclearDensityInput {
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
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[serde(default)]
    pub readings: Vec<DensityReadingInput>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DensityReadingInput {
    pub test_no: Option<String>,
    pub wet_density: Option<String>,
    pub dry_density: Option<String>,
    pub moisture: Option<String>,
    pub moisture_pct: Option<String>,
    pub compaction_pct: Option<String>,
    pub depth: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct NuclearDensityDetail {
    #[serde(flatten)]
    pub record: NuclearDensityRow,
    pub readings: Vec<DensityReadingRow>,
}
