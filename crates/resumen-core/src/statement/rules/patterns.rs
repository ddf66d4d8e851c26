//! Common regex patterns for statement line parsing.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Locale amount, whole string: 1.234,56 or 1234,56 or 1234
    pub static ref AMOUNT_STRICT: Regex = Regex::new(
        r"^(\d{1,3}(?:\.\d{3})+|\d+)(?:,(\d{1,2}))?$"
    ).unwrap();

    // Locale amount inside free text, sign on either side
    pub static ref AMOUNT_TOKEN: Regex = Regex::new(
        r"-?\d+(?:\.\d{3})*,\d{2}-?"
    ).unwrap();

    // Two right-aligned amount columns (pesos, dollars); `_` marks an empty column
    pub static ref TRAILING_DOUBLE_AMOUNT: Regex = Regex::new(
        r"(\d[\d.]*,\d{2}-?)\s+(\d[\d.]*,\d{2}-?|_)\s*_?\s*$"
    ).unwrap();

    pub static ref TRAILING_AMOUNT: Regex = Regex::new(
        r"(\d[\d.]*,\d{2}-?)\s*_?\s*$"
    ).unwrap();

    // Installment at the end of a line: "03/12" or "Cuota 03/12"
    pub static ref TRAILING_INSTALLMENT: Regex = Regex::new(
        r"\s+(?:Cuota\s+)?(\d{2}/\d{2})\s*$"
    ).unwrap();

    // Voucher token, may carry a trailing `*`, `K` or `X` marker
    pub static ref VOUCHER: Regex = Regex::new(
        r"^(\w+\*?[KX]?)"
    ).unwrap();

    // Printed movement date: 28.12.24, 28/12/2024, 28-dic, 28 dic.
    pub static ref PRINTED_DATE: Regex = Regex::new(
        r"^(\d{1,2})[./\- ](\d{1,2}|[[:alpha:]]{3,}\.?)(?:[./\- ](\d{4}|\d{2}))?$"
    ).unwrap();
}
