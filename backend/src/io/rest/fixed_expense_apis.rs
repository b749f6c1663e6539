//! # REST API for Fixed Expenses
//!
//! CRUD over day-of-month charges at `/api/fixed_expenses`.

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
use shared::{DeleteResponse, FixedExpenseRequest};
use tracing::info;

use crate::io::rest::{ledger_error_response, rejection_response};
use crate::AppState;

/// Create a router for fixed expense related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_fixed_expenses).post(create_fixed_expense))
        .route("/:id", put(update_fixed_expense).delete(delete_fixed_expense))
}

pub async fn list_fixed_expenses(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/fixed_expenses");

    match state.fixed_expense_service.list_fixed_expenses().await {
        Ok(fixed) => (StatusCode::OK, Json(fixed)).into_response(),
        Err(e) => ledger_error_response("Failed to list fixed expenses", e),
    }
}

pub async fn create_fixed_expense(
    State(state): State<AppState>,
    payload: Result<Json<FixedExpenseRequest>, JsonRejection>,
) -> impl IntoResponse {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response("Rejected fixed expense body", rejection),
    };
    info!("POST /api/fixed_expenses - request: {:?}", request);

    match state.fixed_expense_service.create_fixed_expense(request).await {
        Ok(fixed) => (StatusCode::OK, Json(fixed)).into_response(),
        Err(e) => ledger_error_response("Failed to create fixed expense", e),
    }
}

pub async fn update_fixed_expense(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<FixedExpenseRequest>, JsonRejection>,
) -> impl IntoResponse {
    let (id, request) = match (id, payload) {
        (Ok(Path(id)), Ok(Json(request))) => (id, request),
        (Err(rejection), _) => return rejection_response("Rejected fixed expense id", rejection),
        (_, Err(rejection)) => return rejection_response("Rejected fixed expense body", rejection),
    };
    info!("PUT /api/fixed_expenses/{} - request: {:?}", id, request);

    match state.fixed_expense_service.update_fixed_expense(id, request).await {
        Ok(fixed) => (StatusCode::OK, Json(fixed)).into_response(),
        Err(e) => ledger_error_response("Failed to update fixed expense", e),
    }
}

pub async fn delete_fixed_expense(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> impl IntoResponse {
    let id = match id {
        Ok(Path(id)) => id,
        Err(rejection) => return rejection_response("Rejected fixed expense id", rejection),
    };
    info!("DELETE /api/fixed_expenses/{}", id);

    match state.fixed_expense_service.delete_fixed_expense(id).await {
        Ok(()) => (StatusCode::OK, Json(DeleteResponse { success: true })).into_response(),
        Err(e) => ledger_error_response("Failed to delete fixed expense", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::rest::test_support::{json_body, send, test_app};
    use axum::http::Method;
    use serde_json::json;
    use shared::FixedExpense;

    #[tokio::test]
    async fn test_create_uses_camel_case_and_defaults_recurring() {
        let app = test_app().await;

        let response = send(
            &app,
            Method::POST,
            "/api/fixed_expenses",
            Some(json!({"amount": 80000, "category": "家賃", "paymentDay": 27})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let body: serde_json::Value = json_body(response).await;
        assert_eq!(body["paymentDay"], 27);
        assert_eq!(body["isRecurring"], true);
        assert!(body["id"].is_i64());
    }

    #[tokio::test]
    async fn test_list_ordered_by_payment_day() {
        let app = test_app().await;

        for day in [25, 3, 14] {
            send(
                &app,
                Method::POST,
                "/api/fixed_expenses",
                Some(json!({"amount": 1000, "category": "光熱費", "paymentDay": day, "isRecurring": false})),
            )
            .await;
        }

        let fixed: Vec<FixedExpense> = json_body(send(&app, Method::GET, "/api/fixed_expenses", None).await).await;
        let days: Vec<i32> = fixed.iter().map(|f| f.payment_day).collect();
        assert_eq!(days, vec![3, 14, 25]);
        assert!(fixed.iter().all(|f| !f.is_recurring));
    }

    #[tokio::test]
    async fn test_invalid_payment_day_is_bad_request() {
        let app = test_app().await;

        let response = send(
            &app,
            Method::POST,
            "/api/fixed_expenses",
            Some(json!({"amount": 1000, "category": "光熱費", "paymentDay": 32})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let app = test_app().await;

        let created: FixedExpense = json_body(
            send(
                &app,
                Method::POST,
                "/api/fixed_expenses",
                Some(json!({"amount": 8000, "category": "光熱費", "paymentDay": 10})),
            )
            .await,
        )
        .await;
        let uri = format!("/api/fixed_expenses/{}", created.id.unwrap());

        let response = send(
            &app,
            Method::PUT,
            &uri,
            Some(json!({"amount": 9000, "category": "光熱費", "paymentDay": 12, "isRecurring": false})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let updated: FixedExpense = json_body(response).await;
        assert_eq!(updated.payment_day, 12);
        assert!(!updated.is_recurring);

        assert_eq!(send(&app, Method::DELETE, &uri, None).await.status(), StatusCode::OK);
        assert_eq!(send(&app, Method::DELETE, &uri, None).await.status(), StatusCode::NOT_FOUND);
    }
}
