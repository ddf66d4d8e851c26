//! Configuration structures for the extraction pipeline.
//!
//! Everything here is plain serde data. Bank definitions are compiled and
//! validated into [`crate::statement::BankConfig`] by the registry.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::statement::banks;
use crate::statement::DEFAULT_TOLERANCE;

/// Main configuration for the resumen pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Root directory holding one subdirectory per bank.
    pub input_dir: PathBuf,

    /// Directory for CSV and JSON output.
    pub output_dir: PathBuf,

    /// Debug dump configuration.
    pub debug: DebugConfig,

    /// Bank definitions, keyed by name.
    pub banks: Vec<BankDefinition>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("input"),
            output_dir: PathBuf::from("output"),
            debug: DebugConfig::default(),
            banks: banks::builtin_definitions(),
        }
    }
}

/// Debug dump configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Write extracted lines and per-month movements for inspection.
    pub enabled: bool,

    /// Directory for the debug files.
    pub dir: PathBuf,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            dir: PathBuf::from("debug"),
        }
    }
}

/// Declarative description of one bank's statement layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankDefinition {
    /// Registry key.
    pub name: String,

    /// Subdirectory of the input directory holding this bank's statements.
    pub folder: PathBuf,

    /// Glob matched against file names, e.g. `resumenTarjetaCredito.*.pdf`.
    pub file_pattern: String,

    /// ISO currency code attached to every movement.
    pub currency: String,

    /// Regex matched against the file name to find the statement period.
    pub filename_date_pattern: String,

    /// Which capture group holds which date part.
    pub filename_date_groups: FilenameDateGroups,

    /// Lower-case month token to month number.
    #[serde(default)]
    pub month_mapping: BTreeMap<String, u32>,

    /// How movement lines are laid out.
    pub layout: LayoutDefinition,

    pub movement_section_start: Vec<String>,
    pub movement_section_end: Vec<String>,

    /// Previous balance lines (payments fold into it).
    #[serde(default)]
    pub saldo_patterns: Vec<String>,

    /// Bank charges, taxes and interest lines.
    #[serde(default)]
    pub cargos_patterns: Vec<String>,

    #[serde(default)]
    pub closing_balance_patterns: Vec<String>,

    #[serde(default)]
    pub minimum_payment_patterns: Vec<String>,

    /// Regexes whose first capture group is a cardholder name.
    #[serde(default)]
    pub holder_patterns: Vec<String>,

    #[serde(default)]
    pub reconciliation: ReconciliationDefinition,
}

/// Capture group indices for the filename date pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilenameDateGroups {
    /// Day group; read but not used for the period.
    #[serde(default)]
    pub day: Option<usize>,
    pub month: usize,
    pub year: usize,
}

/// Movement line layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LayoutDefinition {
    /// Fields at fixed character offsets.
    FixedColumns(FixedPositions),

    /// One regex per line with named groups `date`, `description`, `amount`
    /// and optionally `voucher` and `installment`.
    Delimited { movement_pattern: String },
}

/// Character offsets of the fixed-column layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedPositions {
    pub date_start: usize,
    pub date_end: usize,
    pub voucher_start: usize,
    pub description_start: usize,

    /// Amount columns never start before this offset.
    pub min_amount_pos: usize,

    #[serde(default)]
    pub min_line_length: Option<usize>,

    #[serde(default)]
    pub max_line_length: Option<usize>,
}

/// How a bank's printed balances relate to its movements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReconciliationFormula {
    /// previous + movements + charges == closing balance.
    ClosingBalance,
    /// movements + charges == closing balance - previous.
    BalanceDelta,
}

/// Reconciliation settings for a bank.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconciliationDefinition {
    pub formula: ReconciliationFormula,

    /// Largest accepted absolute difference.
    pub tolerance: Decimal,
}

impl Default for ReconciliationDefinition {
    fn default() -> Self {
        Self {
            formula: ReconciliationFormula::ClosingBalance,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl AppConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }

    /// Directory holding the statements of a bank.
    pub fn bank_dir(&self, bank: &BankDefinition) -> PathBuf {
        self.input_dir.join(&bank.folder)
    }
}
