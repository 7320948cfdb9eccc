//! Normalizer configuration (TOML)
//!
//! ```toml
//! currency_policy = "flag"
//! parallel = true
//! custom_rates_csv = "rates/2023.csv"
//!
//! [custom_rates]
//! ZAR = 18.0
//!
//! [expected_currencies]
//! MDG = ["NGN"]
//! ```
//!
//! Inline `custom_rates` win over entries loaded from `custom_rates_csv`.
//! `expected_currencies` adds accepted codes on top of each country's
//! reporting currency.

use crate::convert::Converter;
use crate::currency::CurrencyCode;
use crate::error::{FxError, Result};
use crate::fx::RateTable;
use crate::validation::{CurrencyPolicy, PolicyMode};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NormalizerConfig {
    #[serde(default)]
    pub custom_rates: Option<BTreeMap<String, f64>>,
    #[serde(default)]
    pub custom_rates_csv: Option<PathBuf>,
    #[serde(default)]
    pub currency_policy: PolicyMode,
    #[serde(default = "default_parallel")]
    pub parallel: bool,
    #[serde(default)]
    pub expected_currencies: BTreeMap<String, Vec<CurrencyCode>>,
}

fn default_parallel() -> bool {
    true
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            custom_rates: None,
            custom_rates_csv: None,
            currency_policy: PolicyMode::default(),
            parallel: default_parallel(),
            expected_currencies: BTreeMap::new(),
        }
    }
}

impl NormalizerConfig {
    /// Parse configuration from TOML text
    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Load configuration from a TOML file.
    ///
    /// A relative `custom_rates_csv` is resolved against the file's directory.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            FxError::ConfigError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let mut config = Self::from_toml(&contents)?;

        if let (Some(csv_path), Some(dir)) = (config.custom_rates_csv.as_mut(), path.parent()) {
            if csv_path.is_relative() {
                *csv_path = dir.join(&*csv_path);
            }
        }

        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Build the override table, if any rates are configured
    pub fn custom_rate_table(&self) -> Result<Option<RateTable>> {
        let mut merged: Vec<_> = match &self.custom_rates_csv {
            Some(path) => RateTable::from_csv_path(path)?.iter().collect(),
            None => Vec::new(),
        };

        if let Some(inline) = &self.custom_rates {
            let inline = RateTable::from_map(inline)?;
            let overridden = inline.codes();
            merged.retain(|(code, _)| !overridden.contains(code));
            merged.extend(inline.iter());
        }

        if merged.is_empty() {
            return Ok(None);
        }
        RateTable::from_pairs(merged).map(Some)
    }

    /// Converter over the built-in historical rates with any configured override
    pub fn build_converter(&self) -> Result<Converter> {
        let converter = Converter::historical();
        Ok(match self.custom_rate_table()? {
            Some(table) => converter.with_custom_rates(table),
            None => converter,
        })
    }

    /// Currency policy for the configured mode and extra expected codes
    pub fn build_policy(&self) -> CurrencyPolicy {
        self.expected_currencies.iter().fold(
            CurrencyPolicy::new(self.currency_policy),
            |policy, (iso, codes)| {
                codes
                    .iter()
                    .fold(policy, |policy, code| policy.with_expected(iso, *code))
            },
        )
    }
}
