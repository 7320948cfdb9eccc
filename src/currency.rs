//! Currency codes and country/currency metadata

use crate::error::{FxError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Three-letter currency code, always upper-case ASCII.
///
/// Unlike a closed enum, any syntactically valid code can be represented:
/// the unit parser produces whatever token it finds, and an unknown code
/// simply has no entry in the rate tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyCode([u8; 3]);

impl CurrencyCode {
    pub const USD: CurrencyCode = CurrencyCode(*b"USD");
    pub const ZAR: CurrencyCode = CurrencyCode(*b"ZAR");
    pub const KES: CurrencyCode = CurrencyCode(*b"KES");
    pub const GHS: CurrencyCode = CurrencyCode(*b"GHS");
    pub const XOF: CurrencyCode = CurrencyCode(*b"XOF");
    pub const XAF: CurrencyCode = CurrencyCode(*b"XAF");
    pub const MGA: CurrencyCode = CurrencyCode(*b"MGA");
    pub const NGN: CurrencyCode = CurrencyCode(*b"NGN");
    pub const UGX: CurrencyCode = CurrencyCode(*b"UGX");

    /// Build from a token of exactly three ASCII letters (any case).
    pub fn from_letters(token: &str) -> Option<Self> {
        let bytes = token.as_bytes();
        if bytes.len() != 3 || !bytes.iter().all(u8::is_ascii_alphabetic) {
            return None;
        }
        Some(Self([
            bytes[0].to_ascii_uppercase(),
            bytes[1].to_ascii_uppercase(),
            bytes[2].to_ascii_uppercase(),
        ]))
    }

    /// Get currency code as string
    pub fn as_str(&self) -> &str {
        // Constructors only admit ASCII letters.
        std::str::from_utf8(&self.0).unwrap_or_default()
    }

    /// Region description used in rate listings
    pub fn region(&self) -> &'static str {
        match &self.0 {
            b"KES" => "East Africa (Kenya)",
            b"GHS" => "West Africa (Ghana)",
            b"XOF" => "West Africa",
            b"XAF" => "Central Africa (CAF)",
            b"ZAR" => "Southern Africa (South Africa)",
            b"MGA" => "Indian Ocean (Madagascar)",
            b"NGN" => "West Africa (Nigeria)",
            b"UGX" => "East Africa (Uganda)",
            b"USD" => "United States",
            _ => "Unknown",
        }
    }

    /// Codes that appear in the source records but are believed to be
    /// data-entry unit errors (both found in Madagascar files).
    pub fn is_suspected_unit_error(&self) -> bool {
        matches!(*self, CurrencyCode::NGN | CurrencyCode::UGX)
    }
}

impl FromStr for CurrencyCode {
    type Err = FxError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_letters(s.trim()).ok_or_else(|| FxError::InvalidCurrencyCode(s.to_string()))
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = FxError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> Self {
        code.as_str().to_string()
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Country and the currency its budget documents report in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountryCurrency {
    pub iso: &'static str,
    pub name: &'static str,
    pub currency: CurrencyCode,
    pub currency_name: &'static str,
}

/// Countries covered by the budget corpus
pub const COUNTRIES: [CountryCurrency; 5] = [
    CountryCurrency {
        iso: "CAF",
        name: "Central African Republic",
        currency: CurrencyCode::XAF,
        currency_name: "CFA franc",
    },
    CountryCurrency {
        iso: "GHA",
        name: "Ghana",
        currency: CurrencyCode::GHS,
        currency_name: "Ghanaian cedi",
    },
    CountryCurrency {
        iso: "KEN",
        name: "Kenya",
        currency: CurrencyCode::KES,
        currency_name: "Kenyan shilling",
    },
    CountryCurrency {
        iso: "MDG",
        name: "Madagascar",
        currency: CurrencyCode::MGA,
        currency_name: "Malagasy ariary",
    },
    CountryCurrency {
        iso: "ZAF",
        name: "South Africa",
        currency: CurrencyCode::ZAR,
        currency_name: "South African rand",
    },
];

/// Look up a country's reporting currency by ISO alpha-3 code (case-insensitive)
pub fn country_currency(iso: &str) -> Option<&'static CountryCurrency> {
    let iso = iso.trim();
    COUNTRIES.iter().find(|c| c.iso.eq_ignore_ascii_case(iso))
}
