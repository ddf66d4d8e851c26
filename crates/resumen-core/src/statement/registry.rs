//! Compiled bank configurations and the registry that owns them.
//!
//! A [`BankConfig`] can only be built from a [`BankDefinition`] through
//! validation: every pattern compiles, every offset is consistent, every
//! pattern the pipeline reads is present. Configuration problems surface here,
//! before any statement is opened.

use regex::Regex;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::banks;
use crate::error::ConfigError;
use crate::models::config::{
    BankDefinition, FilenameDateGroups, FixedPositions, LayoutDefinition, ReconciliationFormula,
};

/// Compiled movement line layout.
#[derive(Debug, Clone)]
pub enum Layout {
    FixedColumns(FixedPositions),
    Delimited { movement_pattern: Regex },
}

/// Validated, immutable configuration of one bank.
#[derive(Debug, Clone)]
pub struct BankConfig {
    pub(crate) name: String,
    pub(crate) folder: PathBuf,
    pub(crate) file_pattern: glob::Pattern,
    pub(crate) currency: String,
    pub(crate) filename_date_pattern: Regex,
    pub(crate) filename_date_groups: FilenameDateGroups,
    pub(crate) month_mapping: BTreeMap<String, u32>,
    pub(crate) layout: Layout,
    pub(crate) section_start: Vec<Regex>,
    pub(crate) section_end: Vec<Regex>,
    pub(crate) saldo_patterns: Vec<Regex>,
    pub(crate) cargos_patterns: Vec<Regex>,
    pub(crate) closing_balance_patterns: Vec<Regex>,
    pub(crate) minimum_payment_patterns: Vec<Regex>,
    pub(crate) holder_patterns: Vec<Regex>,
    pub(crate) formula: ReconciliationFormula,
    pub(crate) tolerance: Decimal,
}

fn compile(bank: &str, field: &'static str, pattern: &str) -> Result<Regex, ConfigError> {
    Regex::new(pattern).map_err(|source| ConfigError::InvalidPattern {
        bank: bank.to_string(),
        field,
        source,
    })
}

fn compile_all(bank: &str, field: &'static str, patterns: &[String]) -> Result<Vec<Regex>, ConfigError> {
    patterns.iter().map(|p| compile(bank, field, p)).collect()
}

fn require_non_empty<T>(bank: &str, field: &'static str, values: &[T]) -> Result<(), ConfigError> {
    if values.is_empty() {
        return Err(ConfigError::MissingField { bank: bank.to_string(), field });
    }
    Ok(())
}

fn invalid(bank: &str, field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        bank: bank.to_string(),
        field,
        reason: reason.into(),
    }
}

fn check_positions(bank: &str, p: &FixedPositions) -> Result<(), ConfigError> {
    let field = "fixed_positions";
    if p.date_end <= p.date_start {
        return Err(invalid(bank, field, "date_end must be after date_start"));
    }
    if p.voucher_start < p.date_end {
        return Err(invalid(bank, field, "voucher_start overlaps the date column"));
    }
    if p.description_start <= p.voucher_start {
        return Err(invalid(bank, field, "description_start must be after voucher_start"));
    }
    if p.min_amount_pos <= p.description_start {
        return Err(invalid(bank, field, "min_amount_pos must be after description_start"));
    }
    if let (Some(min), Some(max)) = (p.min_line_length, p.max_line_length) {
        if min > max {
            return Err(invalid(bank, field, "min_line_length exceeds max_line_length"));
        }
    }
    Ok(())
}

impl BankConfig {
    /// Validate and compile a bank definition.
    pub fn compile(def: &BankDefinition) -> Result<Self, ConfigError> {
        let bank = def.name.trim();
        if bank.is_empty() {
            return Err(ConfigError::MissingField { bank: "<unnamed>".to_string(), field: "name" });
        }
        if def.currency.trim().is_empty() {
            return Err(ConfigError::MissingField { bank: bank.to_string(), field: "currency" });
        }
        require_non_empty(bank, "movement_section_start", &def.movement_section_start)?;
        require_non_empty(bank, "movement_section_end", &def.movement_section_end)?;

        let file_pattern = glob::Pattern::new(&def.file_pattern).map_err(|source| {
            ConfigError::InvalidGlob { bank: bank.to_string(), source }
        })?;

        let filename_date_pattern =
            compile(bank, "filename_date_pattern", &def.filename_date_pattern)?;
        let groups = def.filename_date_groups;
        let group_count = filename_date_pattern.captures_len();
        for index in [Some(groups.month), Some(groups.year), groups.day].into_iter().flatten() {
            if index == 0 || index >= group_count {
                return Err(invalid(
                    bank,
                    "filename_date_groups",
                    format!("group {} not in pattern ({} groups)", index, group_count - 1),
                ));
            }
        }

        let mut month_mapping = BTreeMap::new();
        for (name, number) in &def.month_mapping {
            if !(1..=12).contains(number) {
                return Err(invalid(bank, "month_mapping", format!("{} -> {}", name, number)));
            }
            month_mapping.insert(name.trim().trim_end_matches('.').to_lowercase(), *number);
        }

        let layout = match &def.layout {
            LayoutDefinition::FixedColumns(positions) => {
                check_positions(bank, positions)?;
                Layout::FixedColumns(*positions)
            }
            LayoutDefinition::Delimited { movement_pattern } => {
                let regex = compile(bank, "movement_pattern", movement_pattern)?;
                for group in ["date", "description", "amount"] {
                    if !regex.capture_names().flatten().any(|name| name == group) {
                        return Err(invalid(
                            bank,
                            "movement_pattern",
                            format!("missing named group `{}`", group),
                        ));
                    }
                }
                Layout::Delimited { movement_pattern: regex }
            }
        };

        let holder_patterns = compile_all(bank, "holder_patterns", &def.holder_patterns)?;
        if holder_patterns.iter().any(|r| r.captures_len() < 2) {
            return Err(invalid(bank, "holder_patterns", "pattern needs a capture group"));
        }

        let tolerance = def.reconciliation.tolerance;
        if tolerance.is_sign_negative() {
            return Err(invalid(bank, "reconciliation.tolerance", "must not be negative"));
        }

        Ok(Self {
            name: bank.to_string(),
            folder: def.folder.clone(),
            file_pattern,
            currency: def.currency.trim().to_string(),
            filename_date_pattern,
            filename_date_groups: groups,
            month_mapping,
            layout,
            section_start: compile_all(bank, "movement_section_start", &def.movement_section_start)?,
            section_end: compile_all(bank, "movement_section_end", &def.movement_section_end)?,
            saldo_patterns: compile_all(bank, "saldo_patterns", &def.saldo_patterns)?,
            cargos_patterns: compile_all(bank, "cargos_patterns", &def.cargos_patterns)?,
            closing_balance_patterns: compile_all(
                bank,
                "closing_balance_patterns",
                &def.closing_balance_patterns,
            )?,
            minimum_payment_patterns: compile_all(
                bank,
                "minimum_payment_patterns",
                &def.minimum_payment_patterns,
            )?,
            holder_patterns,
            formula: def.reconciliation.formula,
            tolerance,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// Input subdirectory of this bank.
    pub fn folder(&self) -> &Path {
        &self.folder
    }

    pub fn file_pattern(&self) -> &str {
        self.file_pattern.as_str()
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn formula(&self) -> ReconciliationFormula {
        self.formula
    }

    pub fn tolerance(&self) -> Decimal {
        self.tolerance
    }

    pub fn month_mapping(&self) -> &BTreeMap<String, u32> {
        &self.month_mapping
    }

    /// Whether a file is a statement of this bank, judged by its name.
    pub fn accepts(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|name| self.file_pattern.matches(name))
    }

    /// Whether the configuration prints the balances reconciliation needs.
    pub fn has_balance_patterns(&self) -> bool {
        !self.closing_balance_patterns.is_empty() && !self.saldo_patterns.is_empty()
    }
}

/// Registry of bank configurations, built once at startup.
#[derive(Debug, Clone)]
pub struct BankRegistry {
    banks: Vec<BankConfig>,
}

impl BankRegistry {
    /// Compile every definition. Fails on the first invalid bank.
    pub fn from_definitions(definitions: &[BankDefinition]) -> Result<Self, ConfigError> {
        let mut banks: Vec<BankConfig> = Vec::with_capacity(definitions.len());
        for def in definitions {
            let config = BankConfig::compile(def)?;
            if banks.iter().any(|b| b.name.eq_ignore_ascii_case(&config.name)) {
                return Err(ConfigError::DuplicateBank(config.name));
            }
            debug!("Registered bank {} ({})", config.name, config.file_pattern());
            banks.push(config);
        }
        Ok(Self { banks })
    }

    /// Registry of the built-in banks.
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::from_definitions(&banks::builtin_definitions())
    }

    /// Look a bank up by name, ignoring case.
    pub fn get(&self, name: &str) -> Result<&BankConfig, ConfigError> {
        self.banks
            .iter()
            .find(|b| b.name.eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| ConfigError::UnknownBank(name.to_string()))
    }

    /// First bank whose file pattern accepts the file.
    pub fn for_file(&self, path: &Path) -> Option<&BankConfig> {
        self.banks.iter().find(|b| b.accepts(path))
    }

    pub fn iter(&self) -> impl Iterator<Item = &BankConfig> {
        self.banks.iter()
    }

    pub fn len(&self) -> usize {
        self.banks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.banks.is_empty()
    }
}
