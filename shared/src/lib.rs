use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A one-time dated spending record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Absent until the record has been persisted
    #[serde(default)]
    pub id: Option<i64>,
    /// Whole currency units, never negative
    pub amount: i64,
    pub category: String,
    /// Either a bare `YYYY-MM-DD` value or a full timestamp (RFC 3339 or naive)
    pub date: String,
    #[serde(default)]
    pub memo: Option<String>,
}

/// A charge tied to a day of the month, either every month or just once
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixedExpense {
    #[serde(default)]
    pub id: Option<i64>,
    pub amount: i64,
    pub category: String,
    /// Day of month in 1..=31; anything else never matches a calendar day
    pub payment_day: i32,
    #[serde(default = "default_recurring")]
    pub is_recurring: bool,
    #[serde(default)]
    pub memo: Option<String>,
}

fn default_recurring() -> bool {
    true
}

/// Body for POST /api/expenses and PUT /api/expenses/:id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRequest {
    pub amount: i64,
    pub category: String,
    pub date: String,
    #[serde(default)]
    pub memo: Option<String>,
}

impl ExpenseRequest {
    pub fn into_expense(self, id: Option<i64>) -> Expense {
        Expense {
            id,
            amount: self.amount,
            category: self.category,
            date: self.date,
            memo: self.memo,
        }
    }
}

/// Body for POST /api/fixed_expenses and PUT /api/fixed_expenses/:id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixedExpenseRequest {
    pub amount: i64,
    pub category: String,
    pub payment_day: i32,
    #[serde(default = "default_recurring")]
    pub is_recurring: bool,
    #[serde(default)]
    pub memo: Option<String>,
}

impl FixedExpenseRequest {
    pub fn into_fixed_expense(self, id: Option<i64>) -> FixedExpense {
        FixedExpense {
            id,
            amount: self.amount,
            category: self.category,
            payment_day: self.payment_day,
            is_recurring: self.is_recurring,
            memo: self.memo,
        }
    }
}

/// Response for DELETE endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub success: bool,
}

/// A record shown in the per-day list, tagged by its kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DayRecord {
    Expense(Expense),
    Fixed(FixedExpense),
}

impl DayRecord {
    pub fn amount(&self) -> i64 {
        match self {
            DayRecord::Expense(e) => e.amount,
            DayRecord::Fixed(f) => f.amount,
        }
    }

    pub fn category(&self) -> &str {
        match self {
            DayRecord::Expense(e) => &e.category,
            DayRecord::Fixed(f) => &f.category,
        }
    }
}

/// Check if a year is a leap year
pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Number of days in a month (month is 1-based)
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// A calendar month, always anchored on its first day.
///
/// Serialized as `{"year": 2025, "month": 11}` with a 1-based month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "MonthParts", into = "MonthParts")]
pub struct YearMonth {
    first_day: NaiveDate,
}

#[derive(Serialize, Deserialize)]
struct MonthParts {
    year: i32,
    month: u32,
}

impl TryFrom<MonthParts> for YearMonth {
    type Error = String;

    fn try_from(parts: MonthParts) -> Result<Self, Self::Error> {
        YearMonth::new(parts.year, parts.month)
            .ok_or_else(|| format!("Invalid month: {}-{}", parts.year, parts.month))
    }
}

impl From<YearMonth> for MonthParts {
    fn from(ym: YearMonth) -> Self {
        MonthParts {
            year: ym.year(),
            month: ym.month(),
        }
    }
}

impl YearMonth {
    /// Returns `None` for a month outside 1..=12 or an unrepresentable year
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|first_day| Self { first_day })
    }

    /// The month a date falls in
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            first_day: date.with_day(1).unwrap_or(date),
        }
    }

    pub fn year(&self) -> i32 {
        self.first_day.year()
    }

    pub fn month(&self) -> u32 {
        self.first_day.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first_day
    }

    pub fn last_day(&self) -> NaiveDate {
        self.first_day
            .with_day(self.days_in_month())
            .unwrap_or(self.first_day)
    }

    pub fn days_in_month(&self) -> u32 {
        days_in_month(self.year(), self.month())
    }

    /// The date for a day number, if the month has that day
    pub fn day(&self, day: u32) -> Option<NaiveDate> {
        self.first_day.with_day(day)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.first_day && date <= self.last_day()
    }

    pub fn previous(&self) -> Self {
        self.first_day
            .checked_sub_months(Months::new(1))
            .map(|first_day| Self { first_day })
            .unwrap_or(*self)
    }

    pub fn next(&self) -> Self {
        self.first_day
            .checked_add_months(Months::new(1))
            .map(|first_day| Self { first_day })
            .unwrap_or(*self)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

/// Which month a calendar cell belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MonthRelation {
    /// Trailing days of the previous month that pad the first week
    Previous,
    /// A day of the displayed month
    Current,
    /// Leading days of the next month that pad the last week
    Next,
}

/// Background intensity bucket for a day's total
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntensityTier {
    None,
    Low,
    Medium,
    High,
}

/// One square of the calendar grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarCell {
    pub day_number: u32,
    pub month_relation: MonthRelation,
    pub is_today: bool,
    /// Column index, 0 = Sunday
    pub weekday: u32,
    /// Only meaningful for current-month cells; zero for filler cells
    pub total_amount: i64,
    pub tier: IntensityTier,
    /// Formatted total, present only when the total is non-zero
    pub label: Option<String>,
    /// Only set for current-month cells, which are the selectable ones
    pub date: Option<NaiveDate>,
}

impl CalendarCell {
    pub fn is_selectable(&self) -> bool {
        self.date.is_some()
    }
}

/// A full calendar month ready for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarMonth {
    pub month: YearMonth,
    pub title: String,
    pub first_weekday: u32,
    pub row_count: u32,
    pub weekday_labels: Vec<String>,
    pub cells: Vec<CalendarCell>,
    pub month_total: i64,
    pub formatted_month_total: String,
    pub previous: YearMonth,
    pub next: YearMonth,
}

/// Itemized records for a selected day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayDetail {
    pub date: NaiveDate,
    pub total_amount: i64,
    pub formatted_total: String,
    pub tier: IntensityTier,
    pub records: Vec<DayRecord>,
}

/// Current date as seen by the display timezone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentDateResponse {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub formatted_date: String,
    pub iso_date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryListResponse {
    pub categories: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddCategoryRequest {
    pub name: String,
}
