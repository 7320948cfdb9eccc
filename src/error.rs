//! Error types for budget_fx
//!
//! Parsing and conversion are total and never produce these. Errors only come
//! from the edges: building rate tables, loading files, and currency policy.

use thiserror::Error;

/// Main error type for budget_fx
#[derive(Error, Debug)]
pub enum FxError {
    #[error("Invalid rate for {code}: {rate} (rates must be finite and positive)")]
    InvalidRate { code: String, rate: f64 },

    #[error("Invalid currency code: {0:?}")]
    InvalidCurrencyCode(String),

    #[error("Unexpected currency {code} for country {country} (expected one of: {expected})")]
    UnexpectedCurrency {
        country: String,
        code: String,
        expected: String,
    },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),
}

/// Result type alias for budget_fx operations
pub type Result<T> = std::result::Result<T, FxError>;
