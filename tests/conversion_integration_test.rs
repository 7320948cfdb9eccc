//! Integration tests for unit parsing and USD normalization
//!
//! Exercises the public API the way a dataset builder would use it

use approx::assert_relative_eq;
use budget_fx::prelude::*;
use std::sync::Arc;
use std::thread;

#[test]
fn test_cross_country_comparison() {
    let converter = Converter::historical();

    let figures = vec![
        (1459.7, "billion KES", 2022, 1459.7e9 / 117.91 / 1e6),
        (850.0, "million MGA", 2022, 850.0e6 / 4112.0 / 1e6),
        (250000.0, "million ZAR", 2022, 250000.0e6 / 16.36 / 1e6),
        (1500.0, "million GHS", 2022, 1500.0e6 / 8.27 / 1e6),
        (120.0, "billion XAF", 2022, 120.0e9 / 624.0 / 1e6),
    ];

    for (value, unit, year, expected) in figures {
        let result = converter.convert(Some(value), unit, Some(year));
        assert_relative_eq!(result.amount.unwrap(), expected, epsilon = 1e-6);
        assert_eq!(result.unit, Some("million USD"));
    }
}

#[test]
fn test_year_override_changes_result() {
    let y2023 = convert_to_usd(Some(20.35), "billion ZAR", Some(2023), None);
    let y2020 = convert_to_usd(Some(20.35), "billion ZAR", Some(2020), None);

    assert_relative_eq!(y2023.amount.unwrap(), 1102.98, epsilon = 0.01);
    assert_relative_eq!(y2020.amount.unwrap(), 1236.33, epsilon = 0.01);
    assert!(y2020.amount.unwrap() > y2023.amount.unwrap());
}

#[test]
fn test_custom_rates_beat_year_table() {
    let custom = RateTable::from_pairs([(CurrencyCode::ZAR, 10.0)]).unwrap();

    let result = convert_to_usd(Some(1.0), "billion ZAR", Some(2023), Some(&custom));
    assert_relative_eq!(result.amount.unwrap(), 100.0, epsilon = 1e-9);

    let converter = Converter::historical().with_custom_rates(custom);
    let c = converter.explain(Some(1.0), "billion ZAR", Some(2023));
    assert_eq!(c.source, TableSource::Custom);
    assert_eq!(c.rate, 10.0);
}

#[test]
fn test_custom_rates_from_csv() {
    let custom = RateTable::load_from_csv("currency,rate\nKES,100.0\n").unwrap();
    let result = convert_to_usd(Some(1.0), "billion KES", None, Some(&custom));
    assert_relative_eq!(result.amount.unwrap(), 10.0, epsilon = 1e-9);
}

#[test]
fn test_fallbacks_never_fail() {
    let converter = Converter::historical();
    let cases = [
        (Some(500.0), "million ZZZ", Some(2021)),
        (Some(1.0), "", None),
        (Some(1.0), "???", Some(3000)),
        (None, "billion ZAR", Some(2023)),
        (Some(f64::NAN), "million KES", None),
    ];
    for (value, unit, year) in cases {
        let _ = converter.convert(value, unit, year);
    }

    let unknown = converter.convert(Some(500.0), "million ZZZ", Some(2021));
    assert_relative_eq!(unknown.amount.unwrap(), 500.0, epsilon = 1e-12);
    assert!(converter.convert(None, "billion ZAR", Some(2023)).is_null());
}

#[test]
fn test_custom_book() {
    let mut by_year = std::collections::BTreeMap::new();
    by_year.insert(2030, RateTable::from_pairs([(CurrencyCode::KES, 200.0)]).unwrap());
    let default = RateTable::from_pairs([(CurrencyCode::KES, 150.0)]).unwrap();
    let converter = Converter::new(Arc::new(RateBook::new(by_year, default)));

    let in_year = converter.convert(Some(2.0), "million KES", Some(2030));
    let other = converter.convert(Some(3.0), "million KES", Some(2023));
    assert_relative_eq!(in_year.amount.unwrap(), 0.01, epsilon = 1e-12);
    assert_relative_eq!(other.amount.unwrap(), 0.02, epsilon = 1e-12);
}

#[test]
fn test_shared_converter_across_threads() {
    let converter = Converter::historical();
    let expected = converter.convert(Some(2850.5), "billion KES", Some(2024));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let converter = converter.clone();
            thread::spawn(move || converter.convert(Some(2850.5), "billion KES", Some(2024)))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}
