//! Exchange rate tables
//!
//! Rates are expressed as local currency units per one USD, so converting
//! to USD divides by the rate.
//!
//! # Components
//!
//! - **base**: the `RateLookup` trait shared by every rate source
//! - **table**: immutable, validated code-to-rate tables
//! - **historical**: the built-in year-specific tables plus the default average
//!
//! # Example
//!
//! ```rust
//! use budget_fx::fx::{RateBook, RateLookup};
//! use budget_fx::currency::CurrencyCode;
//!
//! let book = RateBook::historical();
//!
//! // 2023 has its own table
//! assert_eq!(book.table_for(Some(2023)).rate(CurrencyCode::ZAR), Some(18.45));
//!
//! // Unsupported years fall back to the default average
//! assert_eq!(book.table_for(Some(1999)).rate(CurrencyCode::ZAR), Some(16.9));
//! ```

pub mod base;
pub mod historical;
pub mod table;

pub use base::RateLookup;
pub use historical::{RateBook, TableSource, DEFAULT_RATES, RATES_BY_YEAR, SUPPORTED_YEARS};
pub use table::RateTable;
