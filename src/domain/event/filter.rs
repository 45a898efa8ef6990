//! Event catalog filtering.
//!
//! Turns the optional listing query parameters into a sea-orm `Condition`.
//! Parameter kinds combine with AND; only the free-text search is an OR
//! across title and description.

use chrono::{Datelike, Days, NaiveDate, NaiveTime};
use sea_orm::sea_query::{Expr, Func, SimpleExpr};
use sea_orm::{ColumnTrait, Condition, Order};

use super::dto::EventQueryParams;
use super::entity::event;

/// Resolved `date` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFilter {
    /// Events on a single calendar day.
    On(NaiveDate),
    /// Events on the Saturday or Sunday of the current week.
    Weekend { saturday: NaiveDate },
}

/// Parse the `date` parameter against a reference date.
///
/// Accepts `today`, `tomorrow`, `this_weekend` or an ISO `YYYY-MM-DD` value.
/// Anything else returns `None`: an unparseable date deliberately drops the
/// filter instead of failing the request, because existing clients rely on
/// that pass-through.
pub fn parse_date_filter(value: &str, today: NaiveDate) -> Option<DateFilter> {
    match value.to_lowercase().as_str() {
        "today" => return Some(DateFilter::On(today)),
        "tomorrow" => {
            return today
                .checked_add_days(Days::new(1))
                .map(DateFilter::On)
        }
        "this_weekend" => {
            let days_from_monday = today.weekday().num_days_from_monday() as u64;
            let saturday = if days_from_monday >= 5 {
                // Already Saturday or Sunday; anchor on this week's Saturday
                today.checked_sub_days(Days::new(days_from_monday - 5))
            } else {
                today.checked_add_days(Days::new(5 - days_from_monday))
            };
            return saturday.map(|saturday| DateFilter::Weekend { saturday });
        }
        _ => {}
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .map(DateFilter::On)
}

impl DateFilter {
    /// Half-open `[start, end)` datetime range covered by this filter.
    pub fn range(&self) -> Option<(chrono::NaiveDateTime, chrono::NaiveDateTime)> {
        let (start_day, days) = match self {
            DateFilter::On(day) => (*day, 1),
            DateFilter::Weekend { saturday } => (*saturday, 2),
        };
        let start = start_day.and_time(NaiveTime::MIN);
        let end = start_day
            .checked_add_days(Days::new(days))?
            .and_time(NaiveTime::MIN);
        Some((start, end))
    }
}

/// Build the combined filter condition for a listing request.
pub fn build_condition(params: &EventQueryParams, today: NaiveDate) -> Condition {
    let mut condition = Condition::all();

    if let Some(city) = non_empty(&params.city) {
        condition = condition.add(iexact(event::Column::City, city));
    }

    if let Some(category) = non_empty(&params.event_category) {
        condition = condition.add(iexact(event::Column::EventCategory, category));
    }

    if let Some(mode) = non_empty(&params.event_mode) {
        condition = condition.add(iexact(event::Column::EventMode, mode));
    }

    if let Some(search) = non_empty(&params.search) {
        condition = condition.add(
            Condition::any()
                .add(icontains(event::Column::Title, search))
                .add(icontains(event::Column::Description, search)),
        );
    }

    if let Some(value) = non_empty(&params.date) {
        // Unparseable values fall through without narrowing the result set
        if let Some((start, end)) = parse_date_filter(value, today).and_then(|f| f.range()) {
            condition = condition
                .add(event::Column::Date.gte(start))
                .add(event::Column::Date.lt(end));
        }
    }

    condition
}

/// Parse the `ordering` parameter. A `-` prefix sorts descending; column
/// names outside the whitelist are ignored.
pub fn parse_ordering(value: &str) -> Option<(event::Column, Order)> {
    let (name, order) = match value.strip_prefix('-') {
        Some(rest) => (rest, Order::Desc),
        None => (value, Order::Asc),
    };

    let column = match name {
        "date" => event::Column::Date,
        "price" => event::Column::Price,
        "number_of_bookings" => event::Column::NumberOfBookings,
        "title" => event::Column::Title,
        _ => return None,
    };

    Some((column, order))
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Case-insensitive exact match: LOWER(col) = lower(value).
fn iexact(column: event::Column, value: &str) -> SimpleExpr {
    Expr::expr(Func::lower(Expr::col((event::Entity, column)))).eq(value.to_lowercase())
}

/// Case-insensitive substring match: LOWER(col) LIKE %lower(value)%.
fn icontains(column: event::Column, value: &str) -> SimpleExpr {
    let escaped = escape_like(&value.to_lowercase());
    Expr::expr(Func::lower(Expr::col((event::Entity, column)))).like(format!("%{}%", escaped))
}

/// Escape LIKE wildcards so user input matches literally.
fn escape_like(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}
