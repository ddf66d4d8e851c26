//! Date normalization: printed movement dates, month tokens and the
//! cross-year rule.

use chrono::NaiveDate;
use std::collections::BTreeMap;

use super::patterns::PRINTED_DATE;
use crate::models::statement::{PrintedDate, StatementPeriod};

/// Spanish month abbreviations used by every supported bank.
pub fn spanish_months() -> BTreeMap<String, u32> {
    [
        "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sep", "oct", "nov", "dic",
    ]
    .iter()
    .zip(1..=12)
    .map(|(name, number)| (name.to_string(), number))
    .collect()
}

/// Look a month token up in `mapping`, ignoring case and a trailing dot.
/// Numeric tokens are taken as month numbers.
pub fn month_number(token: &str, mapping: &BTreeMap<String, u32>) -> Option<u32> {
    let token = token.trim().trim_end_matches('.');
    if let Ok(number) = token.parse::<u32>() {
        return (1..=12).contains(&number).then_some(number);
    }
    mapping.get(&token.to_lowercase()).copied()
}

/// Expand a two-digit year to 20YY.
pub fn expand_year(year: i32) -> i32 {
    if year < 100 { 2000 + year } else { year }
}

/// Parse a printed movement date such as `28.12.24`, `28/12/2024` or `28-dic`.
pub fn parse_printed_date(text: &str, mapping: &BTreeMap<String, u32>) -> Option<PrintedDate> {
    let caps = PRINTED_DATE.captures(text.trim())?;

    let day: u32 = caps[1].parse().ok()?;
    if !(1..=31).contains(&day) {
        return None;
    }
    let month = month_number(&caps[2], mapping)?;
    let year = match caps.get(3) {
        Some(y) => Some(expand_year(y.as_str().parse().ok()?)),
        None => None,
    };

    Some(PrintedDate { day, month, year })
}

/// Resolve a day/month to a calendar date within a statement period.
///
/// A movement whose month is later than the statement month belongs to the
/// previous year: a December purchase on a January statement is from last
/// December.
pub fn resolve_movement_date(
    day: u32,
    month: u32,
    statement_year: i32,
    statement_month: u32,
) -> Option<NaiveDate> {
    let year = if month > statement_month {
        statement_year - 1
    } else {
        statement_year
    };
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Resolve a printed date, using its own year when the line prints one.
pub fn resolve_printed_date(date: PrintedDate, period: StatementPeriod) -> Option<NaiveDate> {
    match date.year {
        Some(year) => NaiveDate::from_ymd_opt(year, date.month, date.day),
        None => resolve_movement_date(date.day, date.month, period.year, period.month),
    }
}
