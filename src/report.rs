//! Display helpers for rates and normalized values

use crate::currency::CurrencyCode;
use crate::fx::RateTable;
use serde::Serialize;

/// One row of an exchange rate listing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateInfo {
    pub currency: CurrencyCode,
    /// Rate formatted with thousands separators and two decimals
    pub rate_display: String,
    pub units_per_usd: f64,
    pub region: String,
}

/// List the rates in `table`, sorted by code, USD excluded
pub fn exchange_rate_info(table: &RateTable) -> Vec<RateInfo> {
    table
        .iter()
        .filter(|(code, _)| *code != CurrencyCode::USD)
        .map(|(code, rate)| {
            let region = if code.is_suspected_unit_error() {
                format!("{} (suspected unit error)", code.region())
            } else {
                code.region().to_string()
            };
            RateInfo {
                currency: code,
                rate_display: format_number(rate, 2),
                units_per_usd: rate,
                region,
            }
        })
        .collect()
}

/// Format a value with its unit, e.g. `"1,234.56 billion ZAR"`.
///
/// Missing and NaN values render as `"N/A"`.
pub fn format_value_with_unit(value: Option<f64>, unit: &str, decimals: usize) -> String {
    match value.filter(|v| !v.is_nan()) {
        Some(v) => format!("{} {}", format_number(v, decimals), unit),
        None => "N/A".to_string(),
    }
}

/// Fixed-point formatting with comma thousands separators
pub fn format_number(value: f64, decimals: usize) -> String {
    let raw = format!("{:.*}", decimals, value);
    let (sign, unsigned) = match raw.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", raw.as_str()),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(frac) => format!("{}{}.{}", sign, grouped, frac),
        None => format!("{}{}", sign, grouped),
    }
}
