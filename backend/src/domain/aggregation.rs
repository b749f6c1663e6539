//! Per-day and per-month spending totals.
//!
//! Raw expense dates arrive either as bare `YYYY-MM-DD` values or as full
//! timestamps. Every comparison goes through [`normalize_date`], which
//! resolves a timestamp to the calendar day in the display timezone. Taking
//! the UTC date instead shifts late-evening entries by a day for anyone not
//! at UTC+0.
//!
//! None of these functions fail: records that cannot be placed on a day
//! simply never match, and totals saturate at `i64::MAX`.

use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, Utc};
use shared::{DayRecord, Expense, FixedExpense, YearMonth};

const NAIVE_TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Timezone the calendar is displayed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayZone {
    /// The host's local timezone, DST included
    #[default]
    Local,
    /// A fixed offset from UTC
    Fixed(FixedOffset),
}

impl DisplayZone {
    /// Calendar day an instant falls on in this zone
    pub fn calendar_date(&self, instant: &DateTime<FixedOffset>) -> NaiveDate {
        match self {
            DisplayZone::Local => instant.with_timezone(&Local).date_naive(),
            DisplayZone::Fixed(offset) => instant.with_timezone(offset).date_naive(),
        }
    }

    pub fn today(&self) -> NaiveDate {
        match self {
            DisplayZone::Local => Local::now().date_naive(),
            DisplayZone::Fixed(offset) => Utc::now().with_timezone(offset).date_naive(),
        }
    }
}

/// A raw date value after parsing, before it is pinned to a display zone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawDate {
    /// Bare `YYYY-MM-DD`; already a calendar day
    Calendar(NaiveDate),
    /// Timestamp carrying an explicit offset
    Instant(DateTime<FixedOffset>),
    /// Timestamp without an offset, read as display-local wall clock
    WallClock(NaiveDateTime),
}

impl RawDate {
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();

        if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return Some(RawDate::Calendar(date));
        }
        if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
            return Some(RawDate::Instant(instant));
        }
        NAIVE_TIMESTAMP_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
            .map(RawDate::WallClock)
    }

    pub fn calendar_day(&self, zone: &DisplayZone) -> NaiveDate {
        match self {
            RawDate::Calendar(date) => *date,
            RawDate::Instant(instant) => zone.calendar_date(instant),
            RawDate::WallClock(wall) => wall.date(),
        }
    }
}

/// Calendar day of a raw date value in the display zone, `None` if unparseable
pub fn normalize_date(raw: &str, zone: &DisplayZone) -> Option<NaiveDate> {
    RawDate::parse(raw).map(|parsed| parsed.calendar_day(zone))
}

fn pays_on(fixed: &FixedExpense, day_number: u32) -> bool {
    u32::try_from(fixed.payment_day).map_or(false, |day| day == day_number)
}

/// Total spent on `day`: expenses dated that day plus recurring fixed
/// expenses whose payment day is `day_number`.
pub fn day_total(
    day: NaiveDate,
    day_number: u32,
    expenses: &[Expense],
    fixed: &[FixedExpense],
    zone: &DisplayZone,
) -> i64 {
    let expense_total = expenses
        .iter()
        .filter(|e| normalize_date(&e.date, zone) == Some(day))
        .fold(0i64, |acc, e| acc.saturating_add(e.amount));

    let fixed_total = fixed
        .iter()
        .filter(|f| f.is_recurring && pays_on(f, day_number))
        .fold(0i64, |acc, f| acc.saturating_add(f.amount));

    expense_total.saturating_add(fixed_total)
}

/// Header total for a month.
///
/// Unlike [`day_total`], fixed expenses count whether or not they recur, as
/// long as their payment day exists in the month.
pub fn month_total(
    month: YearMonth,
    expenses: &[Expense],
    fixed: &[FixedExpense],
    zone: &DisplayZone,
) -> i64 {
    let expense_total = expenses
        .iter()
        .filter(|e| normalize_date(&e.date, zone).map_or(false, |d| month.contains(d)))
        .fold(0i64, |acc, e| acc.saturating_add(e.amount));

    let days_in_month = month.days_in_month();
    let fixed_total = fixed
        .iter()
        .filter(|f| u32::try_from(f.payment_day).map_or(false, |d| (1..=days_in_month).contains(&d)))
        .fold(0i64, |acc, f| acc.saturating_add(f.amount));

    expense_total.saturating_add(fixed_total)
}

/// Itemized records for a selected day: expenses dated that day, then every
/// fixed expense paid on that day of the month.
pub fn records_for_day(
    day: NaiveDate,
    day_number: u32,
    expenses: &[Expense],
    fixed: &[FixedExpense],
    zone: &DisplayZone,
) -> Vec<DayRecord> {
    let dated = expenses
        .iter()
        .filter(|e| normalize_date(&e.date, zone) == Some(day))
        .cloned()
        .map(DayRecord::Expense);

    let scheduled = fixed
        .iter()
        .filter(|f| pays_on(f, day_number))
        .cloned()
        .map(DayRecord::Fixed);

    dated.chain(scheduled).collect()
}
