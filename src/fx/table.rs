//! Immutable exchange rate table
//!
//! A `RateTable` maps currency codes to "local units per USD". Tables are
//! validated once on construction and never change afterwards, so they can
//! be shared freely across threads.

use super::base::{RateLookup, IDENTITY_RATE};
use crate::currency::CurrencyCode;
use crate::error::{FxError, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

/// Validated code-to-rate table.
///
/// USD always resolves to 1.0, whether or not it was listed explicitly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RateTable {
    rates: BTreeMap<CurrencyCode, f64>,
}

#[derive(Debug, Deserialize)]
struct RateRecord {
    currency: String,
    rate: f64,
}

impl RateTable {
    /// Build a table, rejecting non-positive or non-finite rates and any
    /// USD rate other than 1.0
    pub fn from_pairs<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (CurrencyCode, f64)>,
    {
        let mut rates = BTreeMap::new();
        for (code, rate) in pairs {
            validate_rate(code, rate)?;
            rates.insert(code, rate);
        }
        Ok(Self { rates })
    }

    /// Build a table from string-keyed rates, as found in configuration files
    pub fn from_map(map: &BTreeMap<String, f64>) -> Result<Self> {
        let pairs = map
            .iter()
            .map(|(code, rate)| code.parse::<CurrencyCode>().map(|code| (code, *rate)))
            .collect::<Result<Vec<_>>>()?;
        Self::from_pairs(pairs)
    }

    /// Built-in constant tables; their contents are checked by unit tests
    pub(crate) fn from_static(pairs: &[(CurrencyCode, f64)]) -> Self {
        Self {
            rates: pairs.iter().copied().collect(),
        }
    }

    /// Load rates from CSV data
    ///
    /// Expected format: `currency,rate` header, then one row per code.
    /// Lines starting with `#` are ignored.
    pub fn load_from_csv(csv_data: &str) -> Result<Self> {
        Self::from_csv_reader(csv_data.as_bytes())
    }

    /// Load rates from a CSV file (same format as [`RateTable::load_from_csv`])
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path.as_ref())?;
        let table = Self::from_csv_reader(file)?;
        log::debug!(
            "Loaded {} rates from {}",
            table.len(),
            path.as_ref().display()
        );
        Ok(table)
    }

    fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .comment(Some(b'#'))
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut pairs = Vec::new();
        for (line_num, record) in csv_reader.deserialize::<RateRecord>().enumerate() {
            let record = record?;
            let code = record.currency.parse::<CurrencyCode>().map_err(|_| {
                FxError::ParseError(format!(
                    "Invalid currency code at record {}: {:?}",
                    line_num + 1,
                    record.currency
                ))
            })?;
            pairs.push((code, record.rate));
        }

        Self::from_pairs(pairs)
    }

    /// Number of explicitly listed codes
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    /// True when no codes were listed
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// Iterate listed entries in code order
    pub fn iter(&self) -> impl Iterator<Item = (CurrencyCode, f64)> + '_ {
        self.rates.iter().map(|(code, rate)| (*code, *rate))
    }

    /// Listed codes in order
    pub fn codes(&self) -> Vec<CurrencyCode> {
        self.rates.keys().copied().collect()
    }
}

impl RateLookup for RateTable {
    fn rate(&self, code: CurrencyCode) -> Option<f64> {
        if code == CurrencyCode::USD {
            return Some(IDENTITY_RATE);
        }
        self.rates.get(&code).copied()
    }
}

fn validate_rate(code: CurrencyCode, rate: f64) -> Result<()> {
    let valid = rate.is_finite()
        && rate > 0.0
        && (code != CurrencyCode::USD || rate == IDENTITY_RATE);
    if valid {
        Ok(())
    } else {
        Err(FxError::InvalidRate {
            code: code.to_string(),
            rate,
        })
    }
}
