//! Amount normalization for Argentine statements (`.` thousands, `,` decimals).

use rust_decimal::Decimal;
use std::str::FromStr;

use super::patterns::{AMOUNT_STRICT, AMOUNT_TOKEN};
use crate::error::ExtractionError;

fn strip_currency(s: &str) -> &str {
    s.trim_matches(|c: char| c.is_whitespace() || c == '$' || c.is_ascii_alphabetic())
}

/// Parse a locale-formatted amount (e.g. `"1.234,56"`, `"$ 45,00-"`).
///
/// A leading or trailing `-` makes the amount negative. Anything that is not a
/// well-formed locale number is rejected rather than guessed.
pub fn parse_amount(text: &str) -> Result<Decimal, ExtractionError> {
    let err = || ExtractionError::AmountFormat(text.to_string());

    let mut body = strip_currency(text);
    let mut negative = false;

    if let Some(rest) = body.strip_prefix('-') {
        negative = true;
        body = strip_currency(rest);
    }
    if let Some(rest) = body.strip_suffix('-') {
        if negative {
            return Err(err());
        }
        negative = true;
        body = strip_currency(rest);
    }

    let caps = AMOUNT_STRICT.captures(body).ok_or_else(err)?;
    let integer = caps[1].replace('.', "");
    let normalized = match caps.get(2) {
        Some(fraction) => format!("{}.{}", integer, fraction.as_str()),
        None => integer,
    };

    let amount = Decimal::from_str(&normalized).map_err(|_| err())?;
    Ok(if negative { -amount } else { amount })
}

/// First well-formed amount in free text.
pub fn first_amount(text: &str) -> Option<Decimal> {
    AMOUNT_TOKEN
        .find_iter(text)
        .find_map(|m| parse_amount(m.as_str()).ok())
}

/// Format an amount in locale style (`-1.234,56`).
pub fn format_amount(amount: Decimal) -> String {
    let s = format!("{:.2}", amount.abs());
    let (integer_part, decimal_part) = s.split_once('.').unwrap_or((s.as_str(), "00"));

    let chars: Vec<char> = integer_part.chars().collect();
    let mut formatted = String::new();
    if amount.is_sign_negative() && !amount.is_zero() {
        formatted.push('-');
    }
    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            formatted.push('.');
        }
        formatted.push(*c);
    }

    format!("{},{}", formatted, decimal_part)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("1.234,56").unwrap(), dec("1234.56"));
        assert_eq!(parse_amount("-45,00").unwrap(), dec("-45.00"));
        assert_eq!(parse_amount("45,00-").unwrap(), dec("-45.00"));
        assert_eq!(parse_amount("12.345.678,9").unwrap(), dec("12345678.9"));
        assert_eq!(parse_amount("$ 1.500,00").unwrap(), dec("1500"));
        assert_eq!(parse_amount("U$S 25,10").unwrap(), dec("25.10"));
        assert_eq!(parse_amount("  700 ").unwrap(), dec("700"));
    }

    #[test]
    fn test_parse_amount_rejects_malformed() {
        for input in ["12,34,56", "", "abc", "1.23,45", "1234.56", "-12,00-", "1,234"] {
            assert_eq!(
                parse_amount(input),
                Err(ExtractionError::AmountFormat(input.to_string())),
                "input {:?}",
                input
            );
        }
    }

    #[test]
    fn test_first_amount() {
        assert_eq!(
            first_amount(" IVA $ 21,00%   1.234,56"),
            Some(dec("21.00"))
        );
        assert_eq!(first_amount("SU PAGO EN PESOS   50.000,00-"), Some(dec("-50000")));
        assert_eq!(first_amount("12.10.24 sin importe"), None);
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(dec("1234.56")), "1.234,56");
        assert_eq!(format_amount(dec("-12345678.9")), "-12.345.678,90");
        assert_eq!(format_amount(dec("0")), "0,00");
    }
}
