//! Error types for the resumen-core library.

use thiserror::Error;

/// Main error type for the resumen library.
#[derive(Error, Debug)]
pub enum ResumenError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Bank configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Statement extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// The PDF only holds scanned images.
    #[error("PDF has no text layer (scanned statements are not supported)")]
    NoTextLayer,
}

/// Errors in a bank configuration. Raised while building the registry,
/// before any statement is read.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A field required by the pipeline is missing or empty.
    #[error("bank {bank}: missing required field `{field}`")]
    MissingField { bank: String, field: &'static str },

    /// A regex did not compile.
    #[error("bank {bank}: invalid pattern in `{field}`: {source}")]
    InvalidPattern {
        bank: String,
        field: &'static str,
        #[source]
        source: regex::Error,
    },

    /// The file glob did not compile.
    #[error("bank {bank}: invalid file pattern: {source}")]
    InvalidGlob {
        bank: String,
        #[source]
        source: glob::PatternError,
    },

    /// A field has a value the pipeline cannot use.
    #[error("bank {bank}: invalid value for `{field}`: {reason}")]
    InvalidValue {
        bank: String,
        field: &'static str,
        reason: String,
    },

    /// Two banks share the same name.
    #[error("duplicate bank: {0}")]
    DuplicateBank(String),

    /// No bank registered under this name.
    #[error("unknown bank: {0}")]
    UnknownBank(String),
}

/// Errors raised while extracting a single statement.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// No movement section start marker matched.
    #[error("movement section not found in {0}")]
    SectionNotFound(String),

    /// The filename does not match the bank's date pattern.
    #[error("cannot read statement period from filename: {0}")]
    FilenameFormat(String),

    /// A textual month is not in the bank's month mapping.
    #[error("unknown month name: {0}")]
    UnknownMonthName(String),

    /// Malformed monetary text.
    #[error("malformed amount: {0:?}")]
    AmountFormat(String),

    /// A movement-shaped line could not be split into fields.
    #[error("cannot parse line: {0}")]
    Parse(String),
}

/// Result type for the resumen library.
pub type Result<T> = std::result::Result<T, ResumenError>;
