//! Normalizers shared by every bank parser.

pub mod amounts;
pub mod dates;
pub mod patterns;
pub mod text;

pub use amounts::{first_amount, format_amount, parse_amount};
pub use dates::{
    month_number, parse_printed_date, resolve_movement_date, resolve_printed_date, spanish_months,
};
pub use text::{char_len, char_slice, collapse_whitespace};
