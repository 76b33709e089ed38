//! API routes.

pub mod admin;
pub mod auth;
pub mod calendar;
pub mod concrete_tests;
pub mod density_tests;
pub mod inspections;
pub mod lookups;
pub mod projects;
pub mod reports;
pub mod staff;

use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
