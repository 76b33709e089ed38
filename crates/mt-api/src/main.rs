//! Materials Testing Records API Server

mod auth;
mod db;
mod error;
mod models;
mod routes;
mod scope;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Application state shared across handlers
pub struct AppState {
    pub db: sqlx::PgPool,
    pub config: AppConfig,
}

/// Application configuration
#[derive(Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt_secret: String,
    pub bind_addr: String,
    pub company_name: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "postgres://localhost/materials_testing".to_string()),
            jwt_secret: std::env::var("JWT_SECRET")
                .unwrap_or_else(|_| "development-secret-change-in-production".to_string()),
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
            company_name: std::env::var("REPORT_COMPANY_NAME")
                .unwrap_or_else(|_| "Materials Testing Lab".to_string()),
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "mt_api=debug,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Materials Testing Records API Server");

    let config = AppConfig::default();

    // Connect to database
    let db = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await
        .expect("Failed to connect to database");

    info!("Connected to database");

    // Run migrations
    sqlx::migrate!("./migrations")
        .run(&db)
        .await
        .expect("Failed to run migrations");

    info!("Database migrations complete");

    // Create shared state
    let bind_addr = config.bind_addr.clone();
    let state = Arc::new(AppState { db, config });

    // Build router
    let app = Router::new()
        // Health check
        .route("/health", get(routes::health_check))

        // Authentication
        .route("/api/auth/me", get(routes::auth::me))

        // Projects
        .route("/api/projects", get(routes::projects::list))
        .route("/api/projects", post(routes::projects::create))
        .route("/api/projects/:name", get(routes::projects::get))

        // Field inspections
        .route("/api/field-inspections", get(routes::inspections::list))
        .route("/api/field-inspections", post(routes::inspections::create))
        .route("/api/field-inspections/:id", get(routes::inspections::get))
        .route("/api/field-inspections/:id", put(routes::inspections::update))
        .route("/api/field-inspections/:id", delete(routes::inspections::delete))

        // Concrete tests
        .route("/api/concrete-tests", get(routes::concrete_tests::list))
        .route("/api/concrete-tests", post(routes::concrete_tests::create))
        .route("/api/concrete-tests/:id", get(routes::concrete_tests::get))
        .route("/api/concrete-tests/:id", put(routes::concrete_tests::update))
        .route("/api/concrete-tests/:id", delete(routes::concrete_tests::delete))

        // Nuclear density tests
        .route("/api/nuclear-density", get(routes::density_tests::list))
        .route("/api/nuclear-density", post(routes::density_tests::create))
        .route("/api/nuclear-density/:id", get(routes::density_tests::get))
        .route("/api/nuclear-density/:id", put(routes::density_tests::update))
        .route("/api/nuclear-density/:id", delete(routes::density_tests::delete))

        // Staff surface (ownership-scoped views of the same tables)
        .route("/api/staff/field-inspections", get(routes::staff::list_field_inspections))
        .route("/api/staff/concrete-tests", get(routes::staff::list_concrete_tests))
        .route("/api/staff/nuclear-density", get(routes::staff::list_nuclear_density))
        .route("/api/staff/summary", get(routes::staff::summary))

        // Test-due calendar
        .route("/api/calendar/events", get(routes::calendar::events))
        .route("/api/calendar/due", get(routes::calendar::due))

        // Lookup tables
        .route("/api/lookups", get(routes::lookups::registry))
        .route("/api/lookups/:table", get(routes::lookups::values))
        .route("/api/lookups/:table", post(routes::lookups::add_value))
        .route("/api/lookups/:table/:value", delete(routes::lookups::delete_value))

        // Datasheet downloads
        .route("/api/reports/:kind/:id", get(routes::reports::download))

        // Admin
        .route("/api/admin/stats", get(routes::admin::get_stats))
        .route("/api/admin/config", get(routes::admin::get_config))

        // CORS
        .layer(CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any))

        // Tracing
        .layer(TraceLayer::new_for_http())

        // State
        .with_state(state);

    // Start server
    info!("Listening on {}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
