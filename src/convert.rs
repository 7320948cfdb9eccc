//! Currency conversion to million USD
//!
//! Every budget figure is normalized as
//! `value * magnitude / rate / 1e6`, where the rate comes from, in order:
//!
//! 1. the custom override table, when one is supplied and non-empty
//! 2. the year-specific table, when the fiscal year has one
//! 3. the default average table
//!
//! A code missing from the chosen table converts at 1.0 (treated as USD).
//! Conversion never fails; a missing or NaN value gives a null result.

use crate::fx::{RateBook, RateLookup, RateTable, TableSource};
use crate::units::{parse_unit, ParsedUnit};
use serde::Serialize;
use std::sync::Arc;

/// Label attached to every non-null converted amount
pub const USD_MILLIONS_LABEL: &str = "million USD";

const MILLION: f64 = 1e6;

/// Normalized amount and its unit label, both null for a null input
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConvertedValue {
    pub amount: Option<f64>,
    pub unit: Option<&'static str>,
}

impl ConvertedValue {
    /// Null result (no amount, no label)
    pub const NULL: ConvertedValue = ConvertedValue {
        amount: None,
        unit: None,
    };

    fn usd_millions(amount: f64) -> Self {
        Self {
            amount: Some(amount),
            unit: Some(USD_MILLIONS_LABEL),
        }
    }

    /// Check if this is the null result
    pub fn is_null(&self) -> bool {
        self.amount.is_none()
    }
}

/// Full account of one conversion, for callers that need to surface which
/// fallback applied
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Conversion {
    pub parsed: ParsedUnit,
    pub source: TableSource,
    /// Rate actually divided by
    pub rate: f64,
    /// True when the code had no entry and the identity rate was used
    pub identity_fallback: bool,
    pub value: ConvertedValue,
}

/// Converts local-currency figures to million USD.
///
/// Holds shared, read-only rate data and is cheap to clone; one converter
/// can serve any number of threads.
///
/// # Example
/// ```
/// use budget_fx::convert::Converter;
///
/// let converter = Converter::historical();
/// let result = converter.convert(Some(20.35), "billion ZAR", Some(2023));
/// assert!((result.amount.unwrap() - 1102.98).abs() < 0.01);
/// assert_eq!(result.unit, Some("million USD"));
/// ```
#[derive(Debug, Clone)]
pub struct Converter {
    book: Arc<RateBook>,
    custom: Option<Arc<RateTable>>,
}

impl Converter {
    /// Create a converter over a rate book
    pub fn new(book: Arc<RateBook>) -> Self {
        Self { book, custom: None }
    }

    /// Converter over the built-in historical rates
    pub fn historical() -> Self {
        Self::new(RateBook::shared())
    }

    /// Override every lookup with `rates`.
    ///
    /// An empty table is ignored and lookups keep using the book.
    pub fn with_custom_rates(mut self, rates: RateTable) -> Self {
        if rates.is_empty() {
            log::debug!("Ignoring empty custom rate table");
            self.custom = None;
        } else {
            self.custom = Some(Arc::new(rates));
        }
        self
    }

    /// Rate book in use
    pub fn book(&self) -> &RateBook {
        &self.book
    }

    /// Custom override table, if any
    pub fn custom_rates(&self) -> Option<&RateTable> {
        self.custom.as_deref()
    }

    /// Convert one figure using this converter's rates
    pub fn convert(&self, value: Option<f64>, unit: &str, year: Option<i32>) -> ConvertedValue {
        self.explain(value, unit, year).value
    }

    /// Convert one figure with a per-call override table that takes
    /// precedence over this converter's own rates
    pub fn convert_with_rates(
        &self,
        value: Option<f64>,
        unit: &str,
        year: Option<i32>,
        custom: Option<&RateTable>,
    ) -> ConvertedValue {
        let custom = custom.filter(|t| !t.is_empty()).or(self.custom_rates());
        self.explain_with(value, unit, year, custom).value
    }

    /// Convert one figure and report how the rate was chosen
    pub fn explain(&self, value: Option<f64>, unit: &str, year: Option<i32>) -> Conversion {
        self.explain_with(value, unit, year, self.custom_rates())
    }

    fn explain_with(
        &self,
        value: Option<f64>,
        unit: &str,
        year: Option<i32>,
        custom: Option<&RateTable>,
    ) -> Conversion {
        let parsed = parse_unit(unit);

        let (source, table) = match custom {
            Some(table) => (TableSource::Custom, table),
            None => self.book.resolve(year),
        };

        let (rate, identity_fallback) = match table.rate(parsed.currency) {
            Some(rate) => (rate, false),
            None => {
                log::debug!(
                    "No {} rate for {} in {} table, treating as USD",
                    parsed.currency,
                    unit.trim(),
                    source
                );
                (table.rate_or_identity(parsed.currency), true)
            }
        };

        let value = match value.filter(|v| !v.is_nan()) {
            Some(v) => {
                let local_units = v * parsed.magnitude.multiplier();
                let usd = local_units / rate;
                ConvertedValue::usd_millions(usd / MILLION)
            }
            None => ConvertedValue::NULL,
        };

        Conversion {
            parsed,
            source,
            rate,
            identity_fallback,
            value,
        }
    }
}

impl Default for Converter {
    fn default() -> Self {
        Self::historical()
    }
}

/// Convert one figure with the built-in historical rates.
///
/// `custom_rates`, when given and non-empty, takes precedence over the
/// year-specific and default tables.
///
/// ```
/// use budget_fx::convert::convert_to_usd;
///
/// let result = convert_to_usd(Some(100.0), "100 USD", None, None);
/// assert_eq!(result.amount, Some(0.0001));
///
/// assert!(convert_to_usd(None, "billion ZAR", None, None).is_null());
/// ```
pub fn convert_to_usd(
    value: Option<f64>,
    unit: &str,
    year: Option<i32>,
    custom_rates: Option<&RateTable>,
) -> ConvertedValue {
    let converter = Converter::historical();
    converter.convert_with_rates(value, unit, year, custom_rates)
}
