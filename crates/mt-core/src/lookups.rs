//! Registry of admin-managed lookup tables.
//!
//! Each lookup is a single-column table of allowed values for one data-entry
//! field. The registry is the whitelist consumed by the generic lookup CRUD
//! routes: a table name that does not resolve here never reaches SQL.

use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct LookupTable {
    pub table: &'static str,
    pub column: &'static str,
    pub label: &'static str,
}

pub const LOOKUP_TABLES: &[LookupTable] = &[
    LookupTable { table: "break_type", column: "break_type", label: "Type of Break" },
    LookupTable { table: "concrete_strength_slump", column: "concrete_strength_slump", label: "Concrete Strength/Slump" },
    LookupTable { table: "cross_sectional_area", column: "cross_sectional_area", label: "Cross Sectional Area" },
    LookupTable { table: "cylinder_age", column: "cylinder_age", label: "Cylinder Age" },
    LookupTable { table: "cylinder_no", column: "cylinder_no", label: "Cylinder Number" },
    LookupTable { table: "cylinder_size", column: "cylinder_size", label: "Cylinder Size" },
    LookupTable { table: "cylinder_type", column: "cylinder_type", label: "Cylinder Type" },
    LookupTable { table: "cylinder_weight", column: "cylinder_weight", label: "Cylinder Weight" },
    LookupTable { table: "cylinders_casted_by", column: "cylinders_casted_by", label: "Cylinders Casted By" },
    LookupTable { table: "datasheet", column: "datasheet", label: "Datasheet" },
    LookupTable { table: "datasheet_recorder", column: "datasheet_recorder", label: "Datasheet Recorder" },
    LookupTable { table: "gridline_1", column: "gridline_1", label: "Gridline 1" },
    LookupTable { table: "gridline_a", column: "gridline_a", label: "Gridline A" },
    LookupTable { table: "ins", column: "ins", label: "INS" },
    LookupTable { table: "mix_design_28_days", column: "mix_design_28_days", label: "Mix Design 28 Days" },
    LookupTable { table: "psi", column: "psi", label: "PSI" },
    LookupTable { table: "ready_mix_company", column: "ready_mix_company", label: "Ready Mix Company" },
    LookupTable { table: "slump", column: "slump", label: "Slump" },
    LookupTable { table: "structure_pour_location", column: "structure_pour_location", label: "Structure/Pour Location" },
    LookupTable { table: "test_no", column: "test_no", label: "Test Number" },
    LookupTable { table: "truck_sequence", column: "truck_sequence", label: "Truck Sequence" },
    LookupTable { table: "weather", column: "weather", label: "Weather" },
    LookupTable { table: "yards_per_truck", column: "yards_per_truck", label: "Yards per Truck" },
];

/// Resolves a table name against the registry.
pub fn find(table: &str) -> Option<&'static LookupTable> {
    LOOKUP_TABLES.iter().find(|t| t.table == table)
}
