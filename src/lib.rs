//! # budget_fx
//!
//! Currency normalization for government budget indicators.
//!
//! Budget documents state figures in local currency at varying scales
//! ("billion KES", "million ZAR"). This crate turns each figure into
//! million USD using the annual average exchange rate for its fiscal year,
//! falling back to a multi-year average when no year-specific rate exists.
//!
//! ## Example
//!
//! ```rust
//! use budget_fx::prelude::*;
//!
//! let converter = Converter::historical();
//!
//! let kes = converter.convert(Some(2850.5), "billion KES", Some(2022));
//! assert_eq!(kes.unit, Some("million USD"));
//!
//! // Missing values stay missing
//! assert!(converter.convert(None, "billion KES", Some(2022)).is_null());
//! ```

pub mod config;
pub mod convert;
pub mod currency;
pub mod dataset;
pub mod error;
pub mod fx;
pub mod report;
pub mod units;
pub mod validation;

pub mod prelude {
    //! Commonly used types and traits
    pub use crate::config::NormalizerConfig;
    pub use crate::convert::{convert_to_usd, ConvertedValue, Converter};
    pub use crate::currency::CurrencyCode;
    pub use crate::dataset::{normalize, NormalizedObservation, Observation};
    pub use crate::error::{FxError, Result};
    pub use crate::fx::{RateBook, RateLookup, RateTable, TableSource};
    pub use crate::units::{parse_unit, Magnitude, ParsedUnit};
    pub use crate::validation::{CurrencyPolicy, PolicyMode};
}
