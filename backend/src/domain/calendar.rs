//! Calendar domain logic.
//!
//! Builds the month grid shown by the client: full Sunday-first weeks, padded
//! with the tail of the previous month and the head of the next one. Every
//! input (month, today, record snapshots) is passed in explicitly, so the same
//! inputs always give the same grid.

use chrono::{Datelike, NaiveDate};
use shared::{
    CalendarCell, CalendarMonth, CurrentDateResponse, DayDetail, Expense, FixedExpense,
    IntensityTier, MonthRelation, YearMonth,
};
use tracing::debug;

use crate::domain::aggregation::{self, DisplayZone};
use crate::domain::formatting::{self, WEEKDAY_LABELS};

/// Weekday of the first day of the month (0 = Sunday, 6 = Saturday)
pub fn first_weekday(month: YearMonth) -> u32 {
    month.first_day().weekday().num_days_from_sunday()
}

/// Number of week rows needed to show the whole month
pub fn row_count(first_weekday: u32, last_day: u32) -> u32 {
    (first_weekday + last_day).div_ceil(7)
}

fn filler_cell(day_number: u32, month_relation: MonthRelation, weekday: u32) -> CalendarCell {
    CalendarCell {
        day_number,
        month_relation,
        is_today: false,
        weekday,
        total_amount: 0,
        tier: IntensityTier::None,
        label: None,
        date: None,
    }
}

fn month_cell(date: NaiveDate, is_today: bool, weekday: u32, total_amount: i64) -> CalendarCell {
    CalendarCell {
        day_number: date.day(),
        month_relation: MonthRelation::Current,
        is_today,
        weekday,
        total_amount,
        tier: formatting::tier(total_amount),
        label: (total_amount > 0).then(|| formatting::format_amount(total_amount)),
        date: Some(date),
    }
}

/// Lay out the grid for `month`.
///
/// `day_total` is called once per current-month day with the day's date and
/// day number; filler cells never consult it.
pub fn build_grid<F>(month: YearMonth, today: NaiveDate, mut day_total: F) -> Vec<CalendarCell>
where
    F: FnMut(NaiveDate, u32) -> i64,
{
    let first_weekday = first_weekday(month);
    let last_day = month.days_in_month();
    let prev_month_last_day = month.previous().days_in_month();
    let cell_count = row_count(first_weekday, last_day) * 7;

    let mut cells = Vec::with_capacity(cell_count as usize);
    let mut day_counter = 1;

    for index in 0..cell_count {
        let weekday = index % 7;

        if index < first_weekday {
            let day_number = prev_month_last_day - first_weekday + index + 1;
            cells.push(filler_cell(day_number, MonthRelation::Previous, weekday));
            continue;
        }

        let day_number = day_counter;
        day_counter += 1;

        match month.day(day_number).filter(|_| day_number <= last_day) {
            Some(date) => {
                let total = day_total(date, day_number);
                cells.push(month_cell(date, date == today, weekday, total));
            }
            None => cells.push(filler_cell(day_number - last_day, MonthRelation::Next, weekday)),
        }
    }

    cells
}

/// Calendar service that turns record snapshots into display-ready months
#[derive(Clone, Debug, Default)]
pub struct CalendarService {
    zone: DisplayZone,
}

impl CalendarService {
    pub fn new(zone: DisplayZone) -> Self {
        Self { zone }
    }

    /// Today's date in the display timezone
    pub fn today(&self) -> NaiveDate {
        self.zone.today()
    }

    /// Generate a calendar month with per-day totals and the month summary
    pub fn generate_calendar_month(
        &self,
        month: YearMonth,
        today: NaiveDate,
        expenses: &[Expense],
        fixed: &[FixedExpense],
    ) -> CalendarMonth {
        let first_weekday = first_weekday(month);
        let row_count = row_count(first_weekday, month.days_in_month());

        debug!(
            "Generating calendar for {} ({} rows, first weekday {}) from {} expenses and {} fixed expenses",
            month,
            row_count,
            first_weekday,
            expenses.len(),
            fixed.len()
        );

        let cells = build_grid(month, today, |date, day_number| {
            aggregation::day_total(date, day_number, expenses, fixed, &self.zone)
        });
        let month_total = aggregation::month_total(month, expenses, fixed, &self.zone);

        CalendarMonth {
            month,
            title: formatting::month_title(month),
            first_weekday,
            row_count,
            weekday_labels: WEEKDAY_LABELS.iter().map(|label| label.to_string()).collect(),
            cells,
            month_total,
            formatted_month_total: formatting::format_amount(month_total),
            previous: month.previous(),
            next: month.next(),
        }
    }

    /// Itemized records and total for a selected day
    pub fn day_detail(&self, date: NaiveDate, expenses: &[Expense], fixed: &[FixedExpense]) -> DayDetail {
        let day_number = date.day();
        let total_amount = aggregation::day_total(date, day_number, expenses, fixed, &self.zone);

        DayDetail {
            date,
            total_amount,
            formatted_total: formatting::format_amount(total_amount),
            tier: formatting::tier(total_amount),
            records: aggregation::records_for_day(date, day_number, expenses, fixed, &self.zone),
        }
    }

    /// Get current date information
    pub fn get_current_date(&self) -> CurrentDateResponse {
        let today = self.today();

        CurrentDateResponse {
            year: today.year(),
            month: today.month(),
            day: today.day(),
            formatted_date: formatting::format_date(today.year(), today.month(), today.day()),
            iso_date: today.format("%Y-%m-%d").to_string(),
        }
    }
}
