//! Line parsers for the supported statement layouts.

mod delimited;
mod fixed;

pub use delimited::DelimitedParser;
pub use fixed::FixedColumnParser;

use super::StatementParser;
use super::registry::{BankConfig, Layout};

/// Parser matching the bank's configured layout.
pub fn parser_for(config: &BankConfig) -> Box<dyn StatementParser + '_> {
    match config.layout() {
        Layout::FixedColumns(positions) => Box::new(FixedColumnParser::new(config, *positions)),
        Layout::Delimited { movement_pattern } => {
            Box::new(DelimitedParser::new(config, movement_pattern))
        }
    }
}
