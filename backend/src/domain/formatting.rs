//! Display helpers for the single supported locale (Japanese labels, whole yen).

use shared::{IntensityTier, YearMonth};

/// Totals at or above this are shown with medium intensity
pub const MEDIUM_TIER_THRESHOLD: i64 = 5_000;
/// Totals at or above this are shown with high intensity
pub const HIGH_TIER_THRESHOLD: i64 = 10_000;

pub const CURRENCY_SUFFIX: &str = "円";

/// Column headers, Sunday first
pub const WEEKDAY_LABELS: [&str; 7] = ["日", "月", "火", "水", "木", "金", "土"];

/// Map a day's total to its background intensity
pub fn tier(amount: i64) -> IntensityTier {
    if amount >= HIGH_TIER_THRESHOLD {
        IntensityTier::High
    } else if amount >= MEDIUM_TIER_THRESHOLD {
        IntensityTier::Medium
    } else if amount > 0 {
        IntensityTier::Low
    } else {
        IntensityTier::None
    }
}

/// Format an amount with thousands separators, e.g. `11,000円`
pub fn format_amount(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0 { "-" } else { "" };
    format!("{}{}{}", sign, grouped, CURRENCY_SUFFIX)
}

/// Header title for a month, e.g. `2025年11月`
pub fn month_title(month: YearMonth) -> String {
    format!("{}年{}月", month.year(), month.month())
}

/// Long form of a date, e.g. `2025年11月5日`
pub fn format_date(year: i32, month: u32, day: u32) -> String {
    format!("{}年{}月{}日", year, month, day)
}
