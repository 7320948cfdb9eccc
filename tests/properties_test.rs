//! Property tests for parsing and conversion invariants

use budget_fx::prelude::*;
use proptest::prelude::*;

proptest! {
    #[test]
    fn parse_is_total_and_deterministic(s in ".*") {
        let first = parse_unit(&s);
        let second = parse_unit(&s);
        prop_assert_eq!(first, second);
        prop_assert_eq!(first.currency.as_str().len(), 3);
        prop_assert!(first.currency.as_str().chars().all(|c| c.is_ascii_uppercase()));
    }

    #[test]
    fn parse_ignores_case_and_padding(s in "[a-zA-Z ]{0,30}") {
        let padded = format!("  {}\t", s.to_uppercase());
        prop_assert_eq!(parse_unit(&padded), parse_unit(&s));
    }

    #[test]
    fn usd_amounts_scale_linearly(value in -1e9f64..1e9, year in 2000i32..2040) {
        let result = convert_to_usd(Some(value), "million USD", Some(year), None);
        let amount = result.amount.unwrap();
        prop_assert!((amount - value).abs() <= value.abs() * 1e-12 + f64::MIN_POSITIVE);
    }

    #[test]
    fn conversion_never_panics(
        value in proptest::option::of(any::<f64>()),
        unit in ".{0,40}",
        year in proptest::option::of(any::<i32>()),
    ) {
        let result = convert_to_usd(value, &unit, year, None);
        prop_assert_eq!(result.amount.is_none(), result.unit.is_none());
        if value.map_or(true, f64::is_nan) {
            prop_assert!(result.is_null());
        }
    }

    #[test]
    fn unsupported_years_match_no_year(value in 0.0f64..1e6, year in 1900i32..2019) {
        let with_year = convert_to_usd(Some(value), "billion KES", Some(year), None);
        let without = convert_to_usd(Some(value), "billion KES", None, None);
        prop_assert_eq!(with_year, without);
    }
}
