//! Statement extraction: bank parsers, the generic pipeline and reconciliation.

pub mod banks;
mod parser;
mod period;
mod pipeline;
mod reconcile;
pub mod registry;
pub mod rules;

#[cfg(test)]
mod testing;

pub use parser::{DelimitedParser, FixedColumnParser, parser_for};
pub use period::extract_period;
pub use pipeline::{StatementExtractor, extract};
pub use reconcile::{DEFAULT_TOLERANCE, reconcile};
pub use registry::{BankConfig, BankRegistry, Layout};

use std::collections::BTreeMap;

use crate::error::ExtractionError;
use crate::models::statement::{Movement, MovementFields, StatementPeriod};

/// Bank-specific line recognition, one implementation per line layout.
pub trait StatementParser {
    /// Configuration the parser was built from.
    fn config(&self) -> &BankConfig;

    /// Whether the line is a movement: a parseable date in the date column
    /// and a monetary value in the amount column. A date alone is not enough.
    fn looks_like_movement(&self, line: &str) -> bool;

    /// Whether the line starts like a movement (parseable date column),
    /// whatever the rest holds.
    fn has_date_prefix(&self, line: &str) -> bool;

    /// Why a line with a date prefix is not a movement, when the layout can
    /// tell more than a missing amount.
    fn rejection(&self, _line: &str) -> Option<&'static str> {
        None
    }

    /// Split a movement line into its fields.
    fn parse_line(&self, line: &str) -> Result<MovementFields, ExtractionError>;

    /// Cardholder named by the line, if it is a holder line.
    fn detect_holder(&self, line: &str) -> Option<String> {
        self.config()
            .holder_patterns
            .iter()
            .filter_map(|pattern| pattern.captures(line))
            .filter_map(|caps| caps.get(1))
            .map(|m| rules::collapse_whitespace(m.as_str()))
            .find(|name| !name.is_empty())
    }
}

/// Observer of intermediate extraction output.
pub trait DebugSink {
    /// Text lines as extracted from the document.
    fn on_text(&mut self, _filename: &str, _lines: &[String]) {}

    /// Final movements grouped by calendar month.
    fn on_months(&mut self, _filename: &str, _months: &BTreeMap<StatementPeriod, Vec<&Movement>>) {}
}
