//! # REST API for the Calendar View
//!
//! Month grids, day details and the server's notion of "today". Each request
//! loads full snapshots of both record collections and hands them to the
//! calendar service.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use shared::{Expense, FixedExpense, YearMonth};
use tracing::{info, warn};

use crate::domain::LedgerError;
use crate::io::rest::{error_response, ledger_error_response, rejection_response};
use crate::AppState;

/// Query parameters for the month grid. Both or neither must be given.
#[derive(Debug, Deserialize)]
pub struct CalendarMonthQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct CalendarDayQuery {
    pub date: String,
}

/// Create a router for calendar related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/month", get(get_calendar_month))
        .route("/day", get(get_calendar_day))
        .route("/current-date", get(get_current_date))
}

async fn load_snapshots(state: &AppState) -> Result<(Vec<Expense>, Vec<FixedExpense>), LedgerError> {
    tokio::try_join!(
        state.expense_service.list_expenses(),
        state.fixed_expense_service.list_fixed_expenses()
    )
}

fn requested_month(query: &CalendarMonthQuery, today: NaiveDate) -> Result<YearMonth, Response> {
    match (query.year, query.month) {
        (None, None) => Ok(YearMonth::containing(today)),
        (Some(year), Some(month)) => YearMonth::new(year, month).ok_or_else(|| {
            warn!("Rejected calendar month {}-{}", year, month);
            error_response(StatusCode::BAD_REQUEST, "Invalid month/year")
        }),
        _ => Err(error_response(
            StatusCode::BAD_REQUEST,
            "year and month must be given together",
        )),
    }
}

/// Get the month grid with per-day totals and the month summary
pub async fn get_calendar_month(
    State(state): State<AppState>,
    query: Result<Query<CalendarMonthQuery>, QueryRejection>,
) -> impl IntoResponse {
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => return rejection_response("Rejected calendar month query", rejection),
    };
    info!("GET /api/calendar/month - query: {:?}", query);

    let today = state.calendar_service.today();
    let month = match requested_month(&query, today) {
        Ok(month) => month,
        Err(response) => return response,
    };

    let (expenses, fixed) = match load_snapshots(&state).await {
        Ok(snapshots) => snapshots,
        Err(e) => return ledger_error_response("Failed to load records for calendar", e),
    };

    let calendar_month = state
        .calendar_service
        .generate_calendar_month(month, today, &expenses, &fixed);
    (StatusCode::OK, Json(calendar_month)).into_response()
}

/// Get the itemized records for one day
pub async fn get_calendar_day(
    State(state): State<AppState>,
    query: Result<Query<CalendarDayQuery>, QueryRejection>,
) -> impl IntoResponse {
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => return rejection_response("Rejected calendar day query", rejection),
    };
    info!("GET /api/calendar/day - query: {:?}", query);

    let Ok(date) = NaiveDate::parse_from_str(query.date.trim(), "%Y-%m-%d") else {
        warn!("Rejected calendar day '{}'", query.date);
        return error_response(StatusCode::BAD_REQUEST, format!("Invalid date: {}", query.date));
    };

    let (expenses, fixed) = match load_snapshots(&state).await {
        Ok(snapshots) => snapshots,
        Err(e) => return ledger_error_response("Failed to load records for day", e),
    };

    let detail = state.calendar_service.day_detail(date, &expenses, &fixed);
    (StatusCode::OK, Json(detail)).into_response()
}

/// Get current date information from the backend
pub async fn get_current_date(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/calendar/current-date");

    let current_date = state.calendar_service.get_current_date();
    (StatusCode::OK, Json(current_date)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::rest::test_support::{json_body, send, test_app};
    use axum::{http::Method, Router};
    use serde_json::json;
    use shared::{CalendarMonth, CurrentDateResponse, DayDetail, DayRecord, IntensityTier, MonthRelation};

    async fn seed_november(app: &Router) {
        let expenses = [
            json!({"amount": 3000, "category": "食費", "date": "2025-11-05"}),
            // 00:30 on the 5th in UTC+9
            json!({"amount": 1200, "category": "交通費", "date": "2025-11-04T15:30:00.000Z"}),
            json!({"amount": 700, "category": "食費", "date": "2025-10-31"}),
        ];
        for body in expenses {
            send(app, Method::POST, "/api/expenses", Some(body)).await;
        }

        let fixed = [
            json!({"amount": 8000, "category": "家賃", "paymentDay": 5, "isRecurring": true}),
            json!({"amount": 2000, "category": "光熱費", "paymentDay": 10, "isRecurring": false}),
            json!({"amount": 500, "category": "日用品", "paymentDay": 31, "isRecurring": true}),
        ];
        for body in fixed {
            send(app, Method::POST, "/api/fixed_expenses", Some(body)).await;
        }
    }

    #[tokio::test]
    async fn test_get_calendar_month() {
        let app = test_app().await;
        seed_november(&app).await;

        let response = send(&app, Method::GET, "/api/calendar/month?year=2025&month=11", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let calendar: CalendarMonth = json_body(response).await;

        assert_eq!(calendar.title, "2025年11月");
        assert_eq!(calendar.first_weekday, 6);
        assert_eq!(calendar.cells.len(), 42);
        assert_eq!(calendar.cells[0].month_relation, MonthRelation::Previous);
        assert_eq!(calendar.cells[0].day_number, 26);

        let fifth = &calendar.cells[10];
        assert_eq!(fifth.date, NaiveDate::from_ymd_opt(2025, 11, 5));
        assert_eq!(fifth.total_amount, 12200);
        assert_eq!(fifth.tier, IntensityTier::High);
        assert_eq!(fifth.label.as_deref(), Some("12,200円"));

        // Non-recurring fixed charge is left out of the cell
        let tenth = &calendar.cells[15];
        assert_eq!(tenth.day_number, 10);
        assert_eq!(tenth.total_amount, 0);

        // but the month summary includes it; day 31 never occurs in November
        assert_eq!(calendar.month_total, 3000 + 1200 + 8000 + 2000);
        assert_eq!(calendar.formatted_month_total, "14,200円");
    }

    #[tokio::test]
    async fn test_get_calendar_month_defaults_to_today() {
        let app = test_app().await;

        let current: CurrentDateResponse =
            json_body(send(&app, Method::GET, "/api/calendar/current-date", None).await).await;
        let calendar: CalendarMonth = json_body(send(&app, Method::GET, "/api/calendar/month", None).await).await;

        assert_eq!(calendar.month.year(), current.year);
        assert_eq!(calendar.month.month(), current.month);
        assert_eq!(calendar.cells.iter().filter(|c| c.is_today).count(), 1);
    }

    #[tokio::test]
    async fn test_get_calendar_month_invalid_query() {
        let app = test_app().await;

        for uri in [
            "/api/calendar/month?year=2025&month=13",
            "/api/calendar/month?year=2025&month=0",
            "/api/calendar/month?year=2025",
            "/api/calendar/month?month=4",
        ] {
            let response = send(&app, Method::GET, uri, None).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", uri);
        }
    }

    #[tokio::test]
    async fn test_get_calendar_day() {
        let app = test_app().await;
        seed_november(&app).await;

        let response = send(&app, Method::GET, "/api/calendar/day?date=2025-11-05", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let detail: DayDetail = json_body(response).await;

        assert_eq!(detail.total_amount, 12200);
        assert_eq!(detail.formatted_total, "12,200円");
        assert_eq!(detail.records.len(), 3);
        assert!(matches!(detail.records[0], DayRecord::Expense(_)));
        assert!(matches!(detail.records[2], DayRecord::Fixed(_)));
    }

    #[tokio::test]
    async fn test_get_calendar_day_lists_one_off_fixed_charge() {
        let app = test_app().await;
        seed_november(&app).await;

        let detail: DayDetail =
            json_body(send(&app, Method::GET, "/api/calendar/day?date=2025-11-10", None).await).await;
        assert_eq!(detail.total_amount, 0);
        assert_eq!(detail.records.len(), 1);
        assert_eq!(detail.records[0].amount(), 2000);
    }

    #[tokio::test]
    async fn test_get_calendar_day_invalid_date() {
        let app = test_app().await;

        let response = send(&app, Method::GET, "/api/calendar/day?date=2025-02-30", None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_get_current_date() {
        let app = test_app().await;

        let response = send(&app, Method::GET, "/api/calendar/current-date", None).await;
        assert_eq!(response.status(), StatusCode::OK);

        let current: CurrentDateResponse = json_body(response).await;
        assert!((1..=12).contains(&current.month));
        assert_eq!(
            current.formatted_date,
            format!("{}年{}月{}日", current.year, current.month, current.day)
        );
    }
}
