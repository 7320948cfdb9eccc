//! Unit text parsing
//!
//! Budget records carry free-text units such as `"billion ZAR"`,
//! `"million GHS"` or a bare `"KES"`. [`parse_unit`] splits them into a
//! [`Magnitude`] and a [`CurrencyCode`]. Parsing is total: any input,
//! however malformed, yields a `ParsedUnit`.

use crate::currency::CurrencyCode;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

// Boundaries are checked by hand in `currency_token`: regex's `\b` treats
// combining marks and joiners as word characters, which PDF-extracted unit
// text often carries after the code.
static CURRENCY_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-z]{3}").expect("invalid regex"));

/// Scale word attached to a figure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Magnitude {
    #[default]
    None,
    Thousand,
    Million,
    Billion,
    Trillion,
}

impl Magnitude {
    /// Search order: the first keyword found in this order wins,
    /// regardless of where it sits in the text.
    const PRIORITY: [Magnitude; 4] = [
        Magnitude::Trillion,
        Magnitude::Billion,
        Magnitude::Million,
        Magnitude::Thousand,
    ];

    /// Multiplier from the scaled figure to base currency units
    pub fn multiplier(&self) -> f64 {
        match self {
            Magnitude::None => 1.0,
            Magnitude::Thousand => 1e3,
            Magnitude::Million => 1e6,
            Magnitude::Billion => 1e9,
            Magnitude::Trillion => 1e12,
        }
    }

    /// Keyword as it appears in unit text (empty for `None`)
    pub fn as_str(&self) -> &'static str {
        match self {
            Magnitude::None => "",
            Magnitude::Thousand => "thousand",
            Magnitude::Million => "million",
            Magnitude::Billion => "billion",
            Magnitude::Trillion => "trillion",
        }
    }
}

impl fmt::Display for Magnitude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of parsing a unit string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParsedUnit {
    pub magnitude: Magnitude,
    pub currency: CurrencyCode,
}

impl Default for ParsedUnit {
    fn default() -> Self {
        Self {
            magnitude: Magnitude::None,
            currency: CurrencyCode::USD,
        }
    }
}

impl fmt::Display for ParsedUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.magnitude {
            Magnitude::None => write!(f, "{}", self.currency),
            m => write!(f, "{} {}", m, self.currency),
        }
    }
}

/// Parse a free-text unit into magnitude and currency.
///
/// - The currency is the first standalone three-letter word, upper-cased;
///   `USD` if there is none.
/// - The magnitude is the first of `trillion`, `billion`, `million`,
///   `thousand` (in that order) contained anywhere in the text; `None` if
///   none is.
///
/// ```
/// use budget_fx::units::{parse_unit, Magnitude};
///
/// let unit = parse_unit("billion ZAR");
/// assert_eq!(unit.magnitude, Magnitude::Billion);
/// assert_eq!(unit.currency.as_str(), "ZAR");
/// ```
pub fn parse_unit(unit: &str) -> ParsedUnit {
    let text = unit.trim().to_lowercase();

    let currency = currency_token(&text)
        .and_then(CurrencyCode::from_letters)
        .unwrap_or(CurrencyCode::USD);

    let magnitude = Magnitude::PRIORITY
        .into_iter()
        .find(|m| text.contains(m.as_str()))
        .unwrap_or(Magnitude::None);

    ParsedUnit {
        magnitude,
        currency,
    }
}

/// Letters, digits and underscore; nothing else joins a token
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// First run of exactly three ASCII letters with no word character on
/// either side.
///
/// Any valid token starts after a non-letter, so no earlier candidate
/// from `find_iter` can overlap it.
fn currency_token(text: &str) -> Option<&str> {
    CURRENCY_TOKEN
        .find_iter(text)
        .find(|m| {
            let before = text[..m.start()].chars().next_back();
            let after = text[m.end()..].chars().next();
            !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
        })
        .map(|m| m.as_str())
}
