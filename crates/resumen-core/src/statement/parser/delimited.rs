//! Whitespace-delimited movement lines, matched with a full-line regex.

use regex::{Captures, Regex};

use crate::error::ExtractionError;
use crate::models::statement::{MovementFields, PrintedDate};
use crate::statement::StatementParser;
use crate::statement::registry::BankConfig;
use crate::statement::rules::{collapse_whitespace, parse_amount, parse_printed_date};

/// Parser for statements whose movement lines match one regex with the named
/// groups `date`, `description` and `amount` (`voucher` and `installment`
/// optional).
pub struct DelimitedParser<'a> {
    config: &'a BankConfig,
    pattern: &'a Regex,
}

fn group<'l>(caps: &Captures<'l>, name: &str) -> Option<&'l str> {
    caps.name(name)
        .map(|m| m.as_str().trim())
        .filter(|s| !s.is_empty())
}

impl<'a> DelimitedParser<'a> {
    pub fn new(config: &'a BankConfig, pattern: &'a Regex) -> Self {
        Self { config, pattern }
    }

    fn date(&self, text: &str) -> Option<PrintedDate> {
        parse_printed_date(text, self.config.month_mapping())
    }
}

impl StatementParser for DelimitedParser<'_> {
    fn config(&self) -> &BankConfig {
        self.config
    }

    fn looks_like_movement(&self, line: &str) -> bool {
        self.pattern.captures(line).is_some_and(|caps| {
            group(&caps, "date").and_then(|d| self.date(d)).is_some()
                && group(&caps, "amount").is_some_and(|a| parse_amount(a).is_ok())
        })
    }

    fn has_date_prefix(&self, line: &str) -> bool {
        line.split_whitespace()
            .next()
            .and_then(|token| self.date(token))
            .is_some()
    }

    fn parse_line(&self, line: &str) -> Result<MovementFields, ExtractionError> {
        let caps = self
            .pattern
            .captures(line)
            .ok_or_else(|| ExtractionError::Parse("line does not match the movement pattern".to_string()))?;

        let date_text = group(&caps, "date")
            .ok_or_else(|| ExtractionError::Parse("missing date".to_string()))?;
        let date = self
            .date(date_text)
            .ok_or_else(|| ExtractionError::Parse(format!("invalid date {}", date_text)))?;

        let amount_text = group(&caps, "amount")
            .ok_or_else(|| ExtractionError::Parse("missing amount".to_string()))?;
        let amount = parse_amount(amount_text)?;

        let description = collapse_whitespace(group(&caps, "description").unwrap_or_default());
        if description.is_empty() {
            return Err(ExtractionError::Parse("empty description".to_string()));
        }

        Ok(MovementFields {
            date,
            voucher_number: group(&caps, "voucher").map(str::to_string),
            description,
            amount,
            installment_info: group(&caps, "installment").map(str::to_string),
        })
    }
}
