//! Fixed-column movement lines, sliced by character offset.

use crate::error::ExtractionError;
use crate::models::config::FixedPositions;
use crate::models::statement::{MovementFields, PrintedDate};
use crate::statement::StatementParser;
use crate::statement::registry::BankConfig;
use crate::statement::rules::patterns::{
    TRAILING_AMOUNT, TRAILING_DOUBLE_AMOUNT, TRAILING_INSTALLMENT, VOUCHER,
};
use crate::statement::rules::text::char_offset;
use crate::statement::rules::{char_len, char_slice, collapse_whitespace, parse_amount, parse_printed_date};

const LENGTH_WINDOW: &str = "line length outside the movement line window";

/// Parser for statements printed in fixed columns.
///
/// Lines are read right to left: the amount column first, then an
/// installment marker, then description, voucher and date.
pub struct FixedColumnParser<'a> {
    config: &'a BankConfig,
    positions: FixedPositions,
}

impl<'a> FixedColumnParser<'a> {
    pub fn new(config: &'a BankConfig, positions: FixedPositions) -> Self {
        Self { config, positions }
    }

    fn date(&self, line: &str) -> Option<PrintedDate> {
        let p = &self.positions;
        let slice = char_slice(line, p.date_start, Some(p.date_end));
        parse_printed_date(slice, self.config.month_mapping())
    }

    /// Start offset and text of the amount column. With two trailing amount
    /// columns (pesos, dollars) the first one is the movement amount.
    fn amount_column<'l>(&self, line: &'l str) -> Option<(usize, &'l str)> {
        let start = self.positions.min_amount_pos;
        let region = char_slice(line, start, None);
        let caps = TRAILING_DOUBLE_AMOUNT
            .captures(region)
            .or_else(|| TRAILING_AMOUNT.captures(region))?;
        let amount = caps.get(1)?;
        Some((start + char_offset(region, amount.start()), amount.as_str()))
    }

    fn length_ok(&self, line: &str) -> bool {
        let p = &self.positions;
        let len = char_len(line);
        p.min_line_length.is_none_or(|min| len >= min)
            && p.max_line_length.is_none_or(|max| len <= max)
    }
}

impl StatementParser for FixedColumnParser<'_> {
    fn config(&self) -> &BankConfig {
        self.config
    }

    fn looks_like_movement(&self, line: &str) -> bool {
        self.length_ok(line)
            && self.date(line).is_some()
            && self
                .amount_column(line)
                .is_some_and(|(_, amount)| parse_amount(amount).is_ok())
    }

    fn has_date_prefix(&self, line: &str) -> bool {
        self.date(line).is_some()
    }

    fn rejection(&self, line: &str) -> Option<&'static str> {
        (!self.length_ok(line)).then_some(LENGTH_WINDOW)
    }

    fn parse_line(&self, line: &str) -> Result<MovementFields, ExtractionError> {
        let p = &self.positions;

        let (amount_start, amount_text) = self.amount_column(line).ok_or_else(|| {
            ExtractionError::Parse(format!("no amount at or after column {}", p.min_amount_pos))
        })?;
        let amount = parse_amount(amount_text)?;

        let mut rest = char_slice(line, 0, Some(amount_start)).trim_end();
        let mut installment_info = None;
        if let Some(caps) = TRAILING_INSTALLMENT.captures(rest) {
            installment_info = caps.get(1).map(|m| m.as_str().to_string());
            rest = caps.get(0).map_or(rest, |m| &rest[..m.start()]);
        }

        let description = collapse_whitespace(char_slice(rest, p.description_start, None));
        if description.is_empty() {
            return Err(ExtractionError::Parse("empty description".to_string()));
        }

        let head = char_slice(rest, 0, Some(p.description_start));
        let voucher_number = VOUCHER
            .captures(char_slice(head, p.voucher_start, None).trim())
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string());

        let date = self.date(line).ok_or_else(|| {
            ExtractionError::Parse(format!(
                "no date in columns {}..{}",
                p.date_start, p.date_end
            ))
        })?;

        Ok(MovementFields {
            date,
            voucher_number,
            description,
            amount,
            installment_info,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statement::banks;
    use crate::statement::testing::patagonia_line;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn config() -> BankConfig {
        BankConfig::compile(&banks::patagonia()).unwrap()
    }

    fn parser(config: &BankConfig) -> FixedColumnParser<'_> {
        match config.layout() {
            crate::statement::Layout::FixedColumns(p) => FixedColumnParser::new(config, *p),
            _ => unreachable!(),
        }
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_parse_purchase_with_voucher() {
        let config = config();
        let parser = parser(&config);
        let line = patagonia_line("02.12.24", "003456*", "SUPERMERCADO DIA", "", "12.345,67");

        assert!(parser.looks_like_movement(&line));
        let fields = parser.parse_line(&line).unwrap();
        assert_eq!(fields.date, PrintedDate { day: 2, month: 12, year: Some(2024) });
        assert_eq!(fields.voucher_number.as_deref(), Some("003456*"));
        assert_eq!(fields.description, "SUPERMERCADO DIA");
        assert_eq!(fields.amount, dec("12345.67"));
        assert_eq!(fields.installment_info, None);
    }

    #[test]
    fn test_parse_installment_and_credit() {
        let config = config();
        let parser = parser(&config);

        let line = patagonia_line("15.11.24", "000789*", "FRAVEGA", "03/12", "20.000,00");
        let fields = parser.parse_line(&line).unwrap();
        assert_eq!(fields.installment_info.as_deref(), Some("03/12"));
        assert_eq!(fields.description, "FRAVEGA");

        let line = patagonia_line("11.12.24", "", "BONIF. CONSUMO", "", "500,00-");
        let fields = parser.parse_line(&line).unwrap();
        assert_eq!(fields.amount, dec("-500"));
        assert_eq!(fields.voucher_number, None);
    }

    #[test]
    fn test_dollar_column_is_ignored() {
        let config = config();
        let parser = parser(&config);
        let line = format!(
            "{:7}{:<13}{:<11}{:<40}{:>9}{:>16}{:>14}",
            "", "06.12.24", "551122K", "SPOTIFY", "", "3.100,00", "2,99"
        );

        let fields = parser.parse_line(&line).unwrap();
        assert_eq!(fields.amount, dec("3100"));
        assert_eq!(fields.voucher_number.as_deref(), Some("551122K"));
    }

    #[test]
    fn test_date_prefix_alone_is_not_a_movement() {
        let config = config();
        let parser = parser(&config);
        let line = patagonia_line("12.12.24", "", "PENDIENTE DE PROCESO", "", "");

        assert!(parser.has_date_prefix(&line));
        assert!(!parser.looks_like_movement(&line));
        assert!(parser.parse_line(&line).is_err());
    }

    #[test]
    fn test_line_length_window() {
        let config = config();
        let parser = parser(&config);
        let line = patagonia_line("02.12.24", "003456*", "SUPERMERCADO DIA", "", "12.345,67");

        let short = line.trim_end_matches(['_', ' ']);
        let long = format!("{}{}", line, " ".repeat(20));
        assert!(!parser.looks_like_movement(short));
        assert!(!parser.looks_like_movement(&long));

        assert_eq!(parser.rejection(short), Some(LENGTH_WINDOW));
        assert_eq!(parser.rejection(&long), Some(LENGTH_WINDOW));
        assert_eq!(parser.rejection(&line), None);
    }

    #[test]
    fn test_empty_description_fails() {
        let config = config();
        let parser = parser(&config);
        let line = patagonia_line("13.12.24", "", "", "", "1.000,00");

        assert!(parser.looks_like_movement(&line));
        assert_eq!(
            parser.parse_line(&line),
            Err(ExtractionError::Parse("empty description".to_string()))
        );
    }

    #[test]
    fn test_header_line_is_ignored() {
        let config = config();
        let parser = parser(&config);
        let line = "       FECHA        COMPROBANTE DETALLE DE TRANSACCION                                 PESOS       DOLARES";

        assert!(!parser.has_date_prefix(line));
        assert!(!parser.looks_like_movement(line));
    }
}
