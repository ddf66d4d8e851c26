//! Statement period from the file name.

use std::path::Path;
use tracing::trace;

use super::registry::BankConfig;
use super::rules::dates::expand_year;
use crate::error::ExtractionError;
use crate::models::statement::StatementPeriod;

/// Read the statement period from a file name using the bank's date pattern.
///
/// Only the base name is matched. The day group, when configured, is read but
/// does not affect the period. A textual month must be in the bank's month
/// mapping; there is no fallback.
pub fn extract_period(filename: &str, config: &BankConfig) -> Result<StatementPeriod, ExtractionError> {
    let name = Path::new(filename)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(filename);
    let format_error = || ExtractionError::FilenameFormat(name.to_string());

    let caps = config
        .filename_date_pattern
        .captures(name)
        .ok_or_else(format_error)?;
    let group = |index: usize| caps.get(index).map(|m| m.as_str()).ok_or_else(format_error);

    let groups = config.filename_date_groups;
    let month_token = group(groups.month)?.trim();
    let month = if month_token.chars().all(|c| c.is_ascii_digit()) {
        let number: u32 = month_token.parse().map_err(|_| format_error())?;
        if !(1..=12).contains(&number) {
            return Err(format_error());
        }
        number
    } else {
        let key = month_token.trim_end_matches('.').to_lowercase();
        *config
            .month_mapping
            .get(&key)
            .ok_or_else(|| ExtractionError::UnknownMonthName(month_token.to_string()))?
    };

    let year: i32 = group(groups.year)?
        .trim()
        .parse()
        .map_err(|_| format_error())?;

    if let Some(day) = groups.day {
        trace!("Statement day from {}: {:?}", name, caps.get(day).map(|m| m.as_str()));
    }

    Ok(StatementPeriod {
        year: expand_year(year),
        month,
    })
}
