//! # Kakeibo Backend
//!
//! Household budget calendar server. Expenses and fixed monthly charges are
//! stored in SQLite and exposed over a JSON REST API; the calendar endpoints
//! turn full record snapshots into month grids with per-day totals.
//!
//! ## Architecture
//!
//! ```text
//! IO Layer (REST handlers)
//!     ↓
//! Domain Layer (grid builder, aggregation, services)
//!     ↓
//! Storage Layer (SQLite repositories, preference store)
//! ```

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use axum::{
    http::{HeaderValue, Method},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tracing::info;

use crate::config::Config;
use crate::domain::{CalendarService, CategoryService, DisplayZone, ExpenseService, FixedExpenseService};
use crate::io::rest;
use crate::storage::{DbConnection, ExpenseRepository, FixedExpenseRepository, PreferenceRepository};

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub expense_service: ExpenseService,
    pub fixed_expense_service: FixedExpenseService,
    pub calendar_service: CalendarService,
    pub category_service: CategoryService,
}

impl AppState {
    /// Wire every service to one database connection
    pub fn from_connection(db: DbConnection, zone: DisplayZone) -> Self {
        Self {
            expense_service: ExpenseService::new(ExpenseRepository::new(db.clone())),
            fixed_expense_service: FixedExpenseService::new(FixedExpenseRepository::new(db.clone())),
            calendar_service: CalendarService::new(zone),
            category_service: CategoryService::new(Arc::new(PreferenceRepository::new(db))),
        }
    }
}

/// Initialize the backend with all required services
pub async fn initialize_backend(config: &Config) -> Result<AppState> {
    info!("Setting up database at {}", config.database_url);
    let db_conn = DbConnection::new(&config.database_url).await?;

    info!("Setting up domain model (display zone: {:?})", config.display_zone());
    Ok(AppState::from_connection(db_conn, config.display_zone()))
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, cors_origin: HeaderValue, static_dir: Option<&Path>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(cors_origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    let api_routes = Router::new()
        .nest("/expenses", rest::expense_apis::router())
        .nest("/fixed_expenses", rest::fixed_expense_apis::router())
        .nest("/calendar", rest::calendar_apis::router())
        .nest("/categories", rest::category_apis::router());

    let mut router = Router::new().nest("/api", api_routes);
    if let Some(dir) = static_dir {
        info!("Serving static files from {}", dir.display());
        router = router.fallback_service(ServeDir::new(dir));
    }

    router.layer(cors).with_state(app_state)
}
