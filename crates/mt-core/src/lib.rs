//! Materials Testing Core
//!
//! This crate provides the domain logic for the materials-testing record
//! service: test-due scheduling, the role model, record filters, the
//! lookup-table registry, and datasheet (PDF) rendering.

pub mod filter;
pub mod lookups;
pub mod report;
pub mod roles;
pub mod schedule;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("render error: {0}")]
    Render(String),
}

pub type CoreResult<T> = Result<T, CoreError>;

pub use filter::RecordFilter;
pub use report::ReportKind;
pub use roles::{Role, RoleSet};
pub use schedule::{build_schedule, upcoming_within, ScheduleEntry, ScheduleInput, TestStatus};
