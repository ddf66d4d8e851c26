//! Core library for credit-card statement extraction.
//!
//! This crate provides:
//! - PDF text extraction (empty-password decryption, text layer detection)
//! - Per-bank statement configuration, validated and compiled once
//! - Fixed-column and delimited movement line parsers
//! - Movement extraction and balance reconciliation

pub mod error;
pub mod models;
pub mod pdf;
pub mod statement;

pub use error::{ConfigError, ExtractionError, PdfError, ResumenError, Result};
pub use models::config::{AppConfig, BankDefinition};
pub use models::statement::{
    ExtractionResult, Movement, Reconciliation, SkippedLine, StatementBalances, StatementPeriod,
    Verdict,
};
pub use pdf::{PdfExtractor, PdfProcessor, PdfType};
pub use statement::{
    BankConfig, BankRegistry, DebugSink, StatementExtractor, StatementParser, extract,
    extract_period,
};
