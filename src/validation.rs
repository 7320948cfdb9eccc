//! Per-country currency policy
//!
//! The rate tables carry codes (NGN, UGX) that only reach the data through
//! unit errors in Madagascar records. Conversion itself accepts any code; this
//! policy lets a caller decide whether a code that does not match the
//! country's reporting currency is allowed, flagged, or rejected.

use crate::currency::{CurrencyCode, COUNTRIES};
use crate::error::{FxError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// How to treat a currency the country does not report in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyMode {
    /// Convert without checking
    #[default]
    Allow,
    /// Convert, but mark the row
    Flag,
    /// Do not convert the row
    Reject,
}

/// Outcome of a policy check that did not reject the row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Accepted,
    Flagged,
}

/// Expected currencies per country plus the mode applied on mismatch
#[derive(Debug, Clone)]
pub struct CurrencyPolicy {
    mode: PolicyMode,
    expected: HashMap<String, Vec<CurrencyCode>>,
}

impl CurrencyPolicy {
    /// Policy seeded with each corpus country's reporting currency
    pub fn new(mode: PolicyMode) -> Self {
        let expected = COUNTRIES
            .iter()
            .map(|c| (c.iso.to_string(), vec![c.currency]))
            .collect();
        Self { mode, expected }
    }

    /// Policy that accepts everything
    pub fn allow_all() -> Self {
        Self::new(PolicyMode::Allow)
    }

    /// Add an accepted code for a country
    pub fn with_expected(mut self, country_iso: &str, code: CurrencyCode) -> Self {
        let codes = self
            .expected
            .entry(country_iso.trim().to_ascii_uppercase())
            .or_default();
        if !codes.contains(&code) {
            codes.push(code);
        }
        self
    }

    pub fn mode(&self) -> PolicyMode {
        self.mode
    }

    /// Check a parsed code against the country's expected currencies.
    ///
    /// USD is always accepted, as is any code for a country with no entry.
    pub fn check(&self, country_iso: Option<&str>, code: CurrencyCode) -> Result<Verdict> {
        if self.mode == PolicyMode::Allow || code == CurrencyCode::USD {
            return Ok(Verdict::Accepted);
        }

        let Some(country) = country_iso.map(|c| c.trim().to_ascii_uppercase()) else {
            return Ok(Verdict::Accepted);
        };
        let Some(expected) = self.expected.get(&country) else {
            return Ok(Verdict::Accepted);
        };
        if expected.contains(&code) {
            return Ok(Verdict::Accepted);
        }

        match self.mode {
            PolicyMode::Reject => Err(FxError::UnexpectedCurrency {
                country,
                code: code.to_string(),
                expected: join_codes(expected),
            }),
            _ => {
                log::warn!(
                    "Unexpected currency {} for {} (expected {}){}",
                    code,
                    country,
                    join_codes(expected),
                    if code.is_suspected_unit_error() {
                        ", likely a unit error"
                    } else {
                        ""
                    }
                );
                Ok(Verdict::Flagged)
            }
        }
    }
}

impl Default for CurrencyPolicy {
    fn default() -> Self {
        Self::allow_all()
    }
}

fn join_codes(codes: &[CurrencyCode]) -> String {
    codes
        .iter()
        .map(CurrencyCode::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
