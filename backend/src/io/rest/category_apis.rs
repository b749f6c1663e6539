//! # REST API for Categories

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use shared::{AddCategoryRequest, CategoryListResponse};
use tracing::info;

use crate::io::rest::{ledger_error_response, rejection_response};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_categories).post(add_category))
}

pub async fn list_categories(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/categories");

    match state.category_service.list_categories().await {
        Ok(categories) => (StatusCode::OK, Json(CategoryListResponse { categories })).into_response(),
        Err(e) => ledger_error_response("Failed to list categories", e),
    }
}

pub async fn add_category(
    State(state): State<AppState>,
    payload: Result<Json<AddCategoryRequest>, JsonRejection>,
) -> impl IntoResponse {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response("Rejected category body", rejection),
    };
    info!("POST /api/categories - request: {:?}", request);

    match state.category_service.add_category(&request.name).await {
        Ok(categories) => (StatusCode::OK, Json(CategoryListResponse { categories })).into_response(),
        Err(e) => ledger_error_response("Failed to add category", e),
    }
}
