//! # REST API for Expenses
//!
//! CRUD over ad-hoc expenses at `/api/expenses`.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, put},
    Router,
};
use shared::{DeleteResponse, ExpenseRequest};
use tracing::info;

use crate::io::rest::{ledger_error_response, rejection_response};
use crate::AppState;

/// Create a router for expense related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_expenses).post(create_expense))
        .route("/:id", put(update_expense).delete(delete_expense))
}

/// List every expense, oldest first
pub async fn list_expenses(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/expenses");

    match state.expense_service.list_expenses().await {
        Ok(expenses) => (StatusCode::OK, Json(expenses)).into_response(),
        Err(e) => ledger_error_response("Failed to list expenses", e),
    }
}

pub async fn create_expense(
    State(state): State<AppState>,
    payload: Result<Json<ExpenseRequest>, JsonRejection>,
) -> impl IntoResponse {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response("Rejected expense body", rejection),
    };
    info!("POST /api/expenses - request: {:?}", request);

    match state.expense_service.create_expense(request).await {
        Ok(expense) => (StatusCode::OK, Json(expense)).into_response(),
        Err(e) => ledger_error_response("Failed to create expense", e),
    }
}

pub async fn update_expense(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<ExpenseRequest>, JsonRejection>,
) -> impl IntoResponse {
    let (id, request) = match (id, payload) {
        (Ok(Path(id)), Ok(Json(request))) => (id, request),
        (Err(rejection), _) => return rejection_response("Rejected expense id", rejection),
        (_, Err(rejection)) => return rejection_response("Rejected expense body", rejection),
    };
    info!("PUT /api/expenses/{} - request: {:?}", id, request);

    match state.expense_service.update_expense(id, request).await {
        Ok(expense) => (StatusCode::OK, Json(expense)).into_response(),
        Err(e) => ledger_error_response("Failed to update expense", e),
    }
}

pub async fn delete_expense(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> impl IntoResponse {
    let id = match id {
        Ok(Path(id)) => id,
        Err(rejection) => return rejection_response("Rejected expense id", rejection),
    };
    info!("DELETE /api/expenses/{}", id);

    match state.expense_service.delete_expense(id).await {
        Ok(()) => (StatusCode::OK, Json(DeleteResponse { success: true })).into_response(),
        Err(e) => ledger_error_response("Failed to delete expense", e),
    }
}
