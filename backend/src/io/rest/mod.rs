//! # REST API Interface Layer
//!
//! JSON endpoints mounted under `/api`. Success is always `200 OK`; failures
//! carry a `{"error": "..."}` body with 400 for invalid input, 404 for an
//! unknown id and 500 when storage fails. A body, path or query axum cannot
//! parse keeps axum's 4xx status with the same body shape.

pub mod calendar_apis;
pub mod category_apis;
pub mod expense_apis;
pub mod fixed_expense_apis;

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use tracing::{error, warn};

use crate::domain::LedgerError;

/// JSON error body with the given status
pub(crate) fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({ "error": message.into() }))).into_response()
}

/// Extractor failures that are reported with the JSON error body
pub(crate) trait ExtractorRejection {
    fn status(&self) -> StatusCode;
    fn body_text(&self) -> String;
}

macro_rules! impl_extractor_rejection {
    ($($rejection:ty),+) => {
        $(
            impl ExtractorRejection for $rejection {
                fn status(&self) -> StatusCode {
                    <$rejection>::status(self)
                }

                fn body_text(&self) -> String {
                    <$rejection>::body_text(self)
                }
            }
        )+
    };
}

impl_extractor_rejection!(JsonRejection, PathRejection, QueryRejection);

/// Malformed body, path or query, keeping axum's status but our body shape
pub(crate) fn rejection_response(context: &str, rejection: impl ExtractorRejection) -> Response {
    let detail = rejection.body_text();
    warn!("{}: {}", context, detail);
    error_response(rejection.status(), detail)
}

/// Map a service failure to its HTTP response, logging it on the way
pub(crate) fn ledger_error_response(context: &str, e: LedgerError) -> Response {
    match e {
        LedgerError::NotFound(id) => {
            warn!("{}: record {} not found", context, id);
            error_response(StatusCode::NOT_FOUND, e.to_string())
        }
        LedgerError::Storage(ref inner) => {
            error!("{}: {:#}", context, inner);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
        }
        _ => {
            warn!("{}: {}", context, e);
            error_response(StatusCode::BAD_REQUEST, e.to_string())
        }
    }
}
