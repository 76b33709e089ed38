//! Datasheet (PDF) rendering.
//!
//! Each record type has a one-page datasheet: a header block identifying the
//! project and record, a label/value field grid, a record-specific section
//! (strength results, truck deliveries, density readings), and a generated-on
//! footer. Output is a raw byte stream offered to the caller as a download.

mod layout;

use chrono::NaiveDate;

use crate::CoreResult;
use layout::SheetWriter;

/// Which datasheet to produce. Doubles as the download file-name prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    ConcreteTest,
    FieldInspection,
    NuclearDensity,
}

impl ReportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportKind::ConcreteTest => "concrete-test",
            ReportKind::FieldInspection => "field-inspection",
            ReportKind::NuclearDensity => "nuclear-density",
        }
    }

    pub fn parse(s: &str) -> Option<ReportKind> {
        match s {
            "concrete-test" => Some(ReportKind::ConcreteTest),
            "field-inspection" => Some(ReportKind::FieldInspection),
            "nuclear-density" => Some(ReportKind::NuclearDensity),
            _ => None,
        }
    }

    pub fn file_name(&self, id: i64) -> String {
        format!("{}-{}.pdf", self.as_str(), id)
    }
}

/// Rendering context shared by all datasheets.
#[derive(Debug, Clone)]
pub struct ReportMeta {
    pub company: String,
    pub generated_on: NaiveDate,
}

#[derive(Debug, Clone, Default)]
pub struct ConcreteTestSheet {
    pub id: i64,
    pub project: Option<String>,
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
}

impl ConcreteTestSheet {
    /// PASS/FAIL of the recorded strength against the 28-day mix design
    /// target, or N/A when no target is set.
    pub fn strength_verdict(&self) -> &'static str {
        let strength: f64 = parse_num(self.strength_psi.as_deref());
        let design: f64 = parse_num(self.mix_design_psi.as_deref());
        if design > 0.0 {
            if strength >= design {
                "PASS"
            } else {
                "FAIL"
            }
        } else {
            "N/A"
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TruckDeliveryLine {
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

#[derive(Debug, Clone, Default)]
pub struct FieldInspectionSheet {
    pub id: i64,
    pub project: Option<String>,
    pub inspection_date: Option<NaiveDate>,
    pub location: Option<String>,
    pub datasheet_no: Option<String>,
    pub strength_slump_spec: Option<String>,
    pub psi: Option<String>,
    pub ins: Option<String>,
    pub supplier: Option<String>,
    pub spec_yards: Option<f64>,
    pub actual_yards: Option<f64>,
    pub recorder: Option<String>,
    pub time_on_site: Option<String>,
    pub time_pour_finished: Option<String>,
    pub air_temp_f: Option<String>,
    pub unit_weight: Option<String>,
    pub remarks: Option<String>,
    pub deliveries: Vec<TruckDeliveryLine>,
}

#[derive(Debug, Clone, Default)]
pub struct DensityReadingLine {
    pub test_no: Option<String>,
    pub wet_density: Option<String>,
    pub dry_density: Option<String>,
    pub moisture: Option<String>,
    pub moisture_pct: Option<String>,
    pub compaction_pct: Option<String>,
    pub depth: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct NuclearDensitySheet {
    pub id: i64,
    pub project: Option<String>,
    pub inspection_date: Option<NaiveDate>,
    pub location: Option<String>,
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
    pub readings: Vec<DensityReadingLine>,
}

pub fn render_concrete_test(sheet: &ConcreteTestSheet, meta: &ReportMeta) -> CoreResult<Vec<u8>> {
    let mut w = SheetWriter::new("Test Break Report")?;
    w.header(
        &meta.company,
        "Test Break Report",
        &[
            ("Project", opt(&sheet.project)),
            ("Date", fmt_date(sheet.test_date)),
            ("Record #", sheet.id.to_string()),
        ],
    );
    w.field_grid(&[
        ("Location", opt(&sheet.location)),
        ("Cast Date", fmt_date(sheet.cast_date)),
        ("Test Date", fmt_date(sheet.test_date)),
        ("Age (days)", fmt_opt(sheet.age_days)),
        ("Slump (in)", opt(&sheet.slump_in)),
        ("Truck No", opt(&sheet.truck_no)),
        ("Cross Section Area", opt(&sheet.cross_section_area)),
        ("Cylinder Size", opt(&sheet.cylinder_size)),
        ("Weight", opt(&sheet.cylinder_weight)),
        ("Density", opt(&sheet.cylinder_density)),
        ("Max Load (lbs)", opt(&sheet.max_load_lbs)),
        ("Strength (PSI)", opt(&sheet.strength_psi)),
        ("Type of Break", opt(&sheet.break_type)),
        ("Mix Design 28 Days", opt(&sheet.mix_design_psi)),
        ("Supplier", opt(&sheet.supplier)),
        ("Recorder", opt(&sheet.recorder)),
        ("Gridline Location", opt(&sheet.gridline_location)),
        ("Casted By", opt(&sheet.casted_by)),
        ("Area", opt(&sheet.area)),
    ]);
    w.section("Strength Results");
    w.field_grid(&[
        ("Cast 7 Day", opt(&sheet.cast_7day)),
        ("Cast 14 Day", opt(&sheet.cast_14day)),
        ("Cast 28 Day", opt(&sheet.cast_28day)),
        ("Cast 56 Day", opt(&sheet.cast_56day)),
        ("Result", sheet.strength_verdict().to_string()),
    ]);
    w.footer(&format!("Generated on {}", meta.generated_on));
    w.finish()
}

pub fn render_field_inspection(sheet: &FieldInspectionSheet, meta: &ReportMeta) -> CoreResult<Vec<u8>> {
    let mut w = SheetWriter::new("Field Inspection Report")?;
    w.header(
        &meta.company,
        "Field Inspection Report",
        &[
            ("Project", opt(&sheet.project)),
            ("Date", fmt_date(sheet.inspection_date)),
            ("Record #", sheet.id.to_string()),
        ],
    );
    w.field_grid(&[
        ("Location", opt(&sheet.location)),
        ("Datasheet No", opt(&sheet.datasheet_no)),
        ("Strength/Slump Spec", opt(&sheet.strength_slump_spec)),
        ("PSI", opt(&sheet.psi)),
        ("INS", opt(&sheet.ins)),
        ("Supplier", opt(&sheet.supplier)),
        ("Spec Yards", fmt_opt(sheet.spec_yards)),
        ("Actual Yards", fmt_opt(sheet.actual_yards)),
        ("Recorder", opt(&sheet.recorder)),
        ("Time On Site", opt(&sheet.time_on_site)),
        ("Time Pour Finished", opt(&sheet.time_pour_finished)),
        ("Air Temp (F)", opt(&sheet.air_temp_f)),
        ("Unit Weight", opt(&sheet.unit_weight)),
        ("Remarks", opt(&sheet.remarks)),
    ]);
    w.section("Truck Deliveries");
    let rows: Vec<Vec<String>> = sheet
        .deliveries
        .iter()
        .map(|d| {
            vec![
                opt(&d.delivery_time),
                opt(&d.truck_no),
                opt(&d.ticket_no),
                opt(&d.yards_per_truck),
                opt(&d.truck_sequence),
                opt(&d.w_c_ratio),
                opt(&d.slump_in),
                opt(&d.concrete_temp_f),
                fmt_opt(d.cylinder_no),
                opt(&d.cylinder_size),
            ]
        })
        .collect();
    w.table(
        &["Time", "Truck", "Ticket", "Yards", "Seq", "W/C", "Slump", "Temp", "Cyl #", "Size"],
        &rows,
    );
    w.footer(&format!("Generated on {}", meta.generated_on));
    w.finish()
}

pub fn render_nuclear_density(sheet: &NuclearDensitySheet, meta: &ReportMeta) -> CoreResult<Vec<u8>> {
    let mut w = SheetWriter::new("Nuclear Density Report")?;
    w.header(
        &meta.company,
        "Nuclear Density Report",
        &[
            ("Project", opt(&sheet.project)),
            ("Date", fmt_date(sheet.inspection_date)),
            ("Record #", sheet.id.to_string()),
        ],
    );
    w.field_grid(&[
        ("Location", opt(&sheet.location)),
        ("Time On Site", opt(&sheet.time_on_site)),
        ("Weather (Present)", opt(&sheet.weather_present)),
        ("Weather (Previous)", opt(&sheet.weather_previous)),
        ("Client Rep", opt(&sheet.client_representative)),
        ("Recorder", opt(&sheet.recorder)),
        ("Trench", fmt_flag(sheet.trench)),
        ("Road", fmt_flag(sheet.road)),
        ("Foundation", fmt_flag(sheet.foundation)),
        ("Proctor", opt(&sheet.proctor)),
        ("Moisture", opt(&sheet.moisture)),
        ("Compaction Result", outcome(sheet.comp_pass, sheet.comp_fail).to_string()),
        ("Moisture Result", outcome(sheet.moisture_pass, sheet.moisture_fail).to_string()),
    ]);
    w.section("Density Readings");
    let rows: Vec<Vec<String>> = sheet
        .readings
        .iter()
        .map(|r| {
            vec![
                opt(&r.test_no),
                opt(&r.wet_density),
                opt(&r.dry_density),
                opt(&r.moisture),
                opt(&r.moisture_pct),
                opt(&r.compaction_pct),
                opt(&r.depth),
            ]
        })
        .collect();
    w.table(&["Test #", "Wet", "Dry", "M", "M %", "Comp %", "Depth"], &rows);
    w.footer(&format!("Generated on {}", meta.generated_on));
    w.finish()
}

/// Pass/fail pairs are stored exactly as submitted; both-false means no result
/// yet and both-true is rendered as submitted.
pub fn outcome(pass: Option<bool>, fail: Option<bool>) -> &'static str {
    match (pass.unwrap_or(false), fail.unwrap_or(false)) {
        (true, false) => "Pass",
        (false, true) => "Fail",
        (true, true) => "Pass/Fail",
        (false, false) => "—",
    }
}

fn parse_num(s: Option<&str>) -> f64 {
    s.and_then(|s| s.trim().parse().ok()).unwrap_or(0.0)
}

fn opt(v: &Option<String>) -> String {
    v.clone().unwrap_or_else(|| "—".to_string())
}

fn fmt_opt<T: ToString>(v: Option<T>) -> String {
    v.map(|v| v.to_string()).unwrap_or_else(|| "—".to_string())
}

fn fmt_date(d: Option<NaiveDate>) -> String {
    d.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "—".to_string())
}

fn fmt_flag(v: Option<bool>) -> String {
    match v {
        Some(true) => "Yes".to_string(),
        Some(false) => "No".to_string(),
        None => "—".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn meta() -> ReportMeta {
        ReportMeta {
            company: "CTLI".to_string(),
            generated_on: date(2024, 3, 1),
        }
    }

    #[test]
    fn file_name_follows_kind_and_id() {
        assert_eq!(ReportKind::ConcreteTest.file_name(42), "concrete-test-42.pdf");
        assert_eq!(ReportKind::NuclearDensity.file_name(7), "nuclear-density-7.pdf");
        assert_eq!(ReportKind::parse("field-inspection"), Some(ReportKind::FieldInspection));
        assert_eq!(ReportKind::parse("bogus"), None);
    }

    #[test]
    fn strength_verdict_compares_against_mix_design() {
        let mut sheet = ConcreteTestSheet {
            strength_psi: Some("4500".to_string()),
            mix_design_psi: Some("4000".to_string()),
            ..Default::default()
        };
        assert_eq!(sheet.strength_verdict(), "PASS");

        sheet.strength_psi = Some("3200".to_string());
        assert_eq!(sheet.strength_verdict(), "FAIL");

        sheet.mix_design_psi = None;
        assert_eq!(sheet.strength_verdict(), "N/A");
    }

    #[test]
    fn outcome_covers_all_pair_states() {
        assert_eq!(outcome(Some(true), Some(false)), "Pass");
        assert_eq!(outcome(Some(false), Some(true)), "Fail");
        assert_eq!(outcome(Some(true), Some(true)), "Pass/Fail");
        assert_eq!(outcome(None, None), "—");
    }

    #[test]
    fn concrete_test_sheet_renders_to_pdf_bytes() {
        let sheet = ConcreteTestSheet {
            id: 12,
            project: Some("Bridge 12".to_string()),
            cast_date: Some(date(2024, 1, 1)),
            test_date: Some(date(2024, 1, 29)),
            age_days: Some(28),
            strength_psi: Some("4500".to_string()),
            mix_design_psi: Some("4000".to_string()),
            ..Default::default()
        };
        let bytes = render_concrete_test(&sheet, &meta()).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn field_inspection_sheet_renders_with_many_deliveries() {
        let sheet = FieldInspectionSheet {
            id: 3,
            project: Some("Plant 4 Expansion".to_string()),
            inspection_date: Some(date(2024, 2, 10)),
            deliveries: (0..60)
                .map(|i| TruckDeliveryLine {
                    truck_no: Some(format!("T-{i}")),
                    cylinder_no: Some(i),
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        };
        let bytes = render_field_inspection(&sheet, &meta()).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn nuclear_density_sheet_renders_empty_readings() {
        let sheet = NuclearDensitySheet {
            id: 9,
            project: Some("Landfill Cell 2".to_string()),
            comp_pass: Some(true),
            comp_fail: Some(false),
            ..Default::default()
        };
        let bytes = render_nuclear_density(&sheet, &meta()).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
