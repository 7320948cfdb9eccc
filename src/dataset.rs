//! Row-wise normalization of budget observations
//!
//! Reads a flat observation table, converts every row to million USD with
//! its own fiscal year, and writes the table back out with the normalized
//! columns appended. Rows are independent, so large tables are processed
//! in parallel with rayon; output order always matches input order.

use crate::convert::{ConvertedValue, Converter};
use crate::error::Result;
use crate::validation::{CurrencyPolicy, Verdict};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};
use std::path::Path;

/// One raw budget figure as stated in a source document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    #[serde(rename = "CountryISO", default)]
    pub country_iso: Option<String>,
    #[serde(rename = "Indicator", default)]
    pub indicator: Option<String>,
    #[serde(rename = "FiscalYear", default)]
    pub fiscal_year: Option<i32>,
    #[serde(rename = "Value", default)]
    pub value: Option<f64>,
    #[serde(rename = "Unit", default)]
    pub unit: String,
}

impl Observation {
    pub fn new(value: Option<f64>, unit: impl Into<String>, fiscal_year: Option<i32>) -> Self {
        Self {
            country_iso: None,
            indicator: None,
            fiscal_year,
            value,
            unit: unit.into(),
        }
    }

    pub fn with_country(mut self, iso: impl Into<String>) -> Self {
        self.country_iso = Some(iso.into());
        self
    }

    pub fn with_indicator(mut self, indicator: impl Into<String>) -> Self {
        self.indicator = Some(indicator.into());
        self
    }
}

/// Observation with its normalized columns
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedObservation {
    #[serde(rename = "CountryISO")]
    pub country_iso: Option<String>,
    #[serde(rename = "Indicator")]
    pub indicator: Option<String>,
    #[serde(rename = "FiscalYear")]
    pub fiscal_year: Option<i32>,
    #[serde(rename = "Value")]
    pub value: Option<f64>,
    #[serde(rename = "Unit")]
    pub unit: String,
    #[serde(rename = "ValueUSD")]
    pub value_usd: Option<f64>,
    #[serde(rename = "UnitUSD")]
    pub unit_usd: Option<&'static str>,
    /// Set when the currency policy flagged or rejected the row
    #[serde(rename = "Flagged")]
    pub flagged: bool,
}

impl NormalizedObservation {
    fn from_parts(obs: &Observation, converted: ConvertedValue, flagged: bool) -> Self {
        Self {
            country_iso: obs.country_iso.clone(),
            indicator: obs.indicator.clone(),
            fiscal_year: obs.fiscal_year,
            value: obs.value,
            unit: obs.unit.clone(),
            value_usd: converted.amount,
            unit_usd: converted.unit,
            flagged,
        }
    }
}

/// Normalize a single row
pub fn normalize_one(
    converter: &Converter,
    policy: &CurrencyPolicy,
    obs: &Observation,
) -> NormalizedObservation {
    let conversion = converter.explain(obs.value, &obs.unit, obs.fiscal_year);

    match policy.check(obs.country_iso.as_deref(), conversion.parsed.currency) {
        Ok(Verdict::Accepted) => NormalizedObservation::from_parts(obs, conversion.value, false),
        Ok(Verdict::Flagged) => NormalizedObservation::from_parts(obs, conversion.value, true),
        Err(e) => {
            log::warn!("Rejected row {:?} {:?}: {}", obs.indicator, obs.fiscal_year, e);
            NormalizedObservation::from_parts(obs, ConvertedValue::NULL, true)
        }
    }
}

/// Normalize every row, in parallel when `parallel` is set
pub fn normalize(
    converter: &Converter,
    policy: &CurrencyPolicy,
    rows: &[Observation],
    parallel: bool,
) -> Vec<NormalizedObservation> {
    let normalized: Vec<NormalizedObservation> = if parallel {
        rows.par_iter()
            .map(|obs| normalize_one(converter, policy, obs))
            .collect()
    } else {
        rows.iter()
            .map(|obs| normalize_one(converter, policy, obs))
            .collect()
    };

    let nulls = normalized.iter().filter(|r| r.value_usd.is_none()).count();
    let flagged = normalized.iter().filter(|r| r.flagged).count();
    log::info!(
        "Normalized {} rows ({} without a USD value, {} flagged)",
        normalized.len(),
        nulls,
        flagged
    );

    normalized
}

/// Read observations from CSV with headers
/// `CountryISO,Indicator,FiscalYear,Value,Unit`
pub fn read_observations<R: Read>(reader: R) -> Result<Vec<Observation>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for record in csv_reader.deserialize::<Observation>() {
        rows.push(record?);
    }
    Ok(rows)
}

/// Read observations from a CSV file
pub fn read_observations_csv<P: AsRef<Path>>(path: P) -> Result<Vec<Observation>> {
    let file = std::fs::File::open(path.as_ref())?;
    let rows = read_observations(file)?;
    log::debug!("Read {} rows from {}", rows.len(), path.as_ref().display());
    Ok(rows)
}

/// Write normalized rows as CSV with headers
pub fn write_normalized<W: Write>(writer: W, rows: &[NormalizedObservation]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write normalized rows to a CSV file
pub fn write_normalized_csv<P: AsRef<Path>>(path: P, rows: &[NormalizedObservation]) -> Result<()> {
    let file = std::fs::File::create(path.as_ref())?;
    write_normalized(file, rows)
}
