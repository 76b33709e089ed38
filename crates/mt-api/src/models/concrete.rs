//! Concrete test models.

use chrono::NaiveDate;
use serde::Deserialize;

/// Full-record payload for creating or replacing a concrete cylinder test.
#[derive(Debug, Default, Deserialize)]
pub struct ConcreteTestInput {
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
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}
