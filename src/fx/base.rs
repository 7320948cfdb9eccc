//! RateLookup trait

use crate::currency::CurrencyCode;
use std::collections::{BTreeMap, HashMap};

/// Identity rate used when a code has no entry in the resolved table
pub const IDENTITY_RATE: f64 = 1.0;

/// Trait for reading "local units per USD" rates
pub trait RateLookup: Send + Sync {
    /// Rate for `code`, or `None` if the source has no entry for it
    fn rate(&self, code: CurrencyCode) -> Option<f64>;

    /// Rate for `code`, treating a missing entry as already-USD
    fn rate_or_identity(&self, code: CurrencyCode) -> f64 {
        self.rate(code).unwrap_or(IDENTITY_RATE)
    }
}

impl RateLookup for HashMap<CurrencyCode, f64> {
    fn rate(&self, code: CurrencyCode) -> Option<f64> {
        self.get(&code).copied()
    }
}

impl RateLookup for BTreeMap<CurrencyCode, f64> {
    fn rate(&self, code: CurrencyCode) -> Option<f64> {
        self.get(&code).copied()
    }
}
