//! Statement data models: movements, balances and the extraction result.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A single transaction line of a statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movement {
    /// Transaction date.
    pub date: NaiveDate,

    /// Voucher (comprobante) number, when printed.
    pub voucher_number: Option<String>,

    /// Merchant or concept, whitespace-collapsed.
    pub description: String,

    /// Signed amount. Charges are positive, payments and credits negative.
    pub amount: Decimal,

    /// Currency code from the bank configuration.
    pub currency: String,

    /// Cardholder the movement belongs to.
    pub holder: Option<String>,

    /// Installment, e.g. `03/12`.
    pub installment_info: Option<String>,
}

/// Date as printed on a movement line, before the year is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrintedDate {
    pub day: u32,
    pub month: u32,
    /// Present when the line prints a year.
    pub year: Option<i32>,
}

/// Fields split out of one movement line by a bank parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovementFields {
    pub date: PrintedDate,
    pub voucher_number: Option<String>,
    pub description: String,
    pub amount: Decimal,
    pub installment_info: Option<String>,
}

/// Billing period of a statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StatementPeriod {
    pub year: i32,
    pub month: u32,
}

impl fmt::Display for StatementPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Balances printed in the statement summary lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementBalances {
    /// Sum of previous balance lines, including payments.
    pub previous_balance: Decimal,

    /// Sum of charges, taxes and interest lines.
    pub charges_total: Decimal,

    pub closing_balance: Option<Decimal>,

    pub minimum_payment: Option<Decimal>,

    /// Whether any previous balance line was found.
    pub previous_balance_found: bool,
}

/// Outcome of comparing computed totals with printed balances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// Totals agree within tolerance.
    Matched,
    /// Totals disagree.
    Mismatch,
    /// The statement does not print enough balances to decide.
    Indeterminate,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Verdict::Matched => "matched",
            Verdict::Mismatch => "mismatch",
            Verdict::Indeterminate => "indeterminate",
        };
        f.write_str(s)
    }
}

/// Reconciliation report of one statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reconciliation {
    pub verdict: Verdict,

    /// Value derived from the printed balances.
    pub expected: Option<Decimal>,

    /// Value derived from the parsed movements.
    pub computed: Decimal,

    /// `computed - expected`.
    pub difference: Option<Decimal>,

    pub tolerance: Decimal,

    pub balances: StatementBalances,

    /// Sum of positive movements.
    pub total_purchases: Decimal,

    /// Sum of negative movements.
    pub total_credits: Decimal,
}

impl Reconciliation {
    /// `Some(true)` if matched, `Some(false)` on mismatch, `None` if undecidable.
    pub fn ok(&self) -> Option<bool> {
        match self.verdict {
            Verdict::Matched => Some(true),
            Verdict::Mismatch => Some(false),
            Verdict::Indeterminate => None,
        }
    }
}

/// A line inside the movement section that was dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedLine {
    /// 1-based line number in the extracted text.
    pub line_number: usize,
    pub text: String,
    pub reason: String,
}

/// Everything extracted from one statement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub bank: String,
    pub filename: String,
    pub period: StatementPeriod,

    /// Movements in document order.
    pub movements: Vec<Movement>,

    pub reconciliation: Reconciliation,

    pub skipped: Vec<SkippedLine>,

    /// Lines examined inside the movement section.
    pub section_lines: usize,
}

impl ExtractionResult {
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    /// Movements grouped by calendar month, document order kept inside each group.
    pub fn movements_by_month(&self) -> BTreeMap<StatementPeriod, Vec<&Movement>> {
        group_by_month(&self.movements)
    }
}

pub(crate) fn group_by_month(movements: &[Movement]) -> BTreeMap<StatementPeriod, Vec<&Movement>> {
    use chrono::Datelike;

    let mut groups: BTreeMap<StatementPeriod, Vec<&Movement>> = BTreeMap::new();
    for movement in movements {
        let key = StatementPeriod {
            year: movement.date.year(),
            month: movement.date.month(),
        };
        groups.entry(key).or_default().push(movement);
    }
    groups
}
