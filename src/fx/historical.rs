//! Historical annual-average exchange rates
//!
//! Rates are local currency units per USD, annual averages drawn from IMF
//! International Financial Statistics, the World Bank and central bank
//! publications. 2020-2024 are observed averages; 2025 is an estimate.
//! The default table is the 2020-2024 average and is used whenever the
//! fiscal year is missing or outside the supported years.

use super::base::RateLookup;
use super::table::RateTable;
use crate::currency::CurrencyCode;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, LazyLock};

type StaticRates = &'static [(CurrencyCode, f64)];

/// Years with a dedicated table
pub const SUPPORTED_YEARS: [i32; 6] = [2020, 2021, 2022, 2023, 2024, 2025];

// NGN and UGX show up in some Madagascar files; they are most likely unit
// errors but are kept so those rows still convert.
pub const RATES_BY_YEAR: [(i32, StaticRates); 6] = [
    (
        2020,
        &[
            (CurrencyCode::ZAR, 16.46),
            (CurrencyCode::KES, 106.45),
            (CurrencyCode::GHS, 5.60),
            (CurrencyCode::XOF, 575.0),
            (CurrencyCode::XAF, 575.0),
            (CurrencyCode::MGA, 3787.0),
            (CurrencyCode::NGN, 358.81),
            (CurrencyCode::UGX, 3718.0),
            (CurrencyCode::USD, 1.0),
        ],
    ),
    (
        2021,
        &[
            (CurrencyCode::ZAR, 14.78),
            (CurrencyCode::KES, 109.64),
            (CurrencyCode::GHS, 5.81),
            (CurrencyCode::XOF, 554.0),
            (CurrencyCode::XAF, 554.0),
            (CurrencyCode::MGA, 3829.0),
            (CurrencyCode::NGN, 401.15),
            (CurrencyCode::UGX, 3587.0),
            (CurrencyCode::USD, 1.0),
        ],
    ),
    (
        2022,
        &[
            (CurrencyCode::ZAR, 16.36),
            (CurrencyCode::KES, 117.91),
            (CurrencyCode::GHS, 8.27),
            (CurrencyCode::XOF, 624.0),
            (CurrencyCode::XAF, 624.0),
            (CurrencyCode::MGA, 4112.0),
            (CurrencyCode::NGN, 416.38),
            (CurrencyCode::UGX, 3740.0),
            (CurrencyCode::USD, 1.0),
        ],
    ),
    (
        2023,
        &[
            (CurrencyCode::ZAR, 18.45),
            (CurrencyCode::KES, 138.05),
            (CurrencyCode::GHS, 11.02),
            (CurrencyCode::XOF, 606.0),
            (CurrencyCode::XAF, 606.0),
            (CurrencyCode::MGA, 4390.0),
            (CurrencyCode::NGN, 460.68),
            (CurrencyCode::UGX, 3728.0),
            (CurrencyCode::USD, 1.0),
        ],
    ),
    (
        2024,
        &[
            (CurrencyCode::ZAR, 18.27),
            (CurrencyCode::KES, 129.42),
            (CurrencyCode::GHS, 14.74),
            (CurrencyCode::XOF, 606.0),
            (CurrencyCode::XAF, 606.0),
            (CurrencyCode::MGA, 4508.0),
            (CurrencyCode::NGN, 1483.99), // devaluation
            (CurrencyCode::UGX, 3725.0),
            (CurrencyCode::USD, 1.0),
        ],
    ),
    (
        2025,
        &[
            (CurrencyCode::ZAR, 17.50),
            (CurrencyCode::KES, 129.00),
            (CurrencyCode::GHS, 15.50),
            (CurrencyCode::XOF, 610.0),
            (CurrencyCode::XAF, 610.0),
            (CurrencyCode::MGA, 4550.0),
            (CurrencyCode::NGN, 1590.00),
            (CurrencyCode::UGX, 3750.0),
            (CurrencyCode::USD, 1.0),
        ],
    ),
];

/// 2020-2024 average
pub const DEFAULT_RATES: StaticRates = &[
    (CurrencyCode::KES, 120.0),
    (CurrencyCode::GHS, 9.0),
    (CurrencyCode::XOF, 593.0),
    (CurrencyCode::XAF, 593.0),
    (CurrencyCode::ZAR, 16.9),
    (CurrencyCode::MGA, 4115.0),
    (CurrencyCode::NGN, 644.0),
    (CurrencyCode::UGX, 3700.0),
    (CurrencyCode::USD, 1.0),
];

static HISTORICAL: LazyLock<Arc<RateBook>> = LazyLock::new(|| Arc::new(RateBook::historical()));

/// Which table a lookup was served from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableSource {
    /// Caller-supplied override table
    Custom,
    /// Year-specific table
    Year(i32),
    /// Default average table
    Default,
}

impl fmt::Display for TableSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableSource::Custom => write!(f, "custom"),
            TableSource::Year(year) => write!(f, "{}", year),
            TableSource::Default => write!(f, "default"),
        }
    }
}

/// Year-specific rate tables plus a default table.
///
/// Built once and shared behind an `Arc`; never mutated afterwards.
#[derive(Debug, Clone)]
pub struct RateBook {
    by_year: BTreeMap<i32, RateTable>,
    default: RateTable,
}

impl RateBook {
    /// Create a book from explicit tables
    pub fn new(by_year: BTreeMap<i32, RateTable>, default: RateTable) -> Self {
        Self { by_year, default }
    }

    /// Book holding the built-in historical rates
    pub fn historical() -> Self {
        let by_year = RATES_BY_YEAR
            .iter()
            .map(|(year, rates)| (*year, RateTable::from_static(rates)))
            .collect();
        Self::new(by_year, RateTable::from_static(DEFAULT_RATES))
    }

    /// Process-wide shared handle to the built-in historical book
    pub fn shared() -> Arc<RateBook> {
        Arc::clone(&*HISTORICAL)
    }

    /// Pick the table for a fiscal year along with where it came from.
    ///
    /// Known years get their own table; anything else, including no year,
    /// gets the default. There is no interpolation between years.
    pub fn resolve(&self, year: Option<i32>) -> (TableSource, &RateTable) {
        match year.and_then(|y| self.by_year.get(&y).map(|table| (y, table))) {
            Some((y, table)) => (TableSource::Year(y), table),
            None => {
                if let Some(y) = year {
                    log::debug!("No rate table for fiscal year {}, using default rates", y);
                }
                (TableSource::Default, &self.default)
            }
        }
    }

    /// Table for a fiscal year (see [`RateBook::resolve`])
    pub fn table_for(&self, year: Option<i32>) -> &RateTable {
        self.resolve(year).1
    }

    /// Default average table
    pub fn default_table(&self) -> &RateTable {
        &self.default
    }

    /// Years with a dedicated table, ascending
    pub fn supported_years(&self) -> Vec<i32> {
        self.by_year.keys().copied().collect()
    }

    /// Check if a year has a dedicated table
    pub fn is_supported(&self, year: i32) -> bool {
        self.by_year.contains_key(&year)
    }

    /// Rate for a code in a given year's resolved table
    pub fn rate(&self, code: CurrencyCode, year: Option<i32>) -> Option<f64> {
        self.table_for(year).rate(code)
    }
}

impl Default for RateBook {
    fn default() -> Self {
        Self::historical()
    }
}
