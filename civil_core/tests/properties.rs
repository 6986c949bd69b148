//! Property checks for the converter and the quick-search ranker.

use civil_core::conversions::{convert, registry, CategoryKind, ConversionRequest};
use civil_core::search::{search, similarity, SearchEntry};
use proptest::prelude::*;

/// Every (category, from, to) triple with a declared edge in a measurement category.
fn measurement_edges() -> Vec<(&'static str, &'static str, &'static str)> {
    registry()
        .list_categories()
        .iter()
        .filter(|c| c.kind == CategoryKind::Measurement)
        .flat_map(|c| c.edges().into_iter().map(move |e| (c.key, e.from, e.to)))
        .collect()
}

/// Every (category, unit) pair.
fn all_units() -> Vec<(&'static str, &'static str)> {
    registry()
        .list_categories()
        .iter()
        .flat_map(|c| c.units().iter().map(move |u| (c.key, u.key)))
        .collect()
}

fn catalog_strategy() -> impl Strategy<Value = Vec<SearchEntry>> {
    prop::collection::vec(("[a-z ]{0,12}", "[a-z ]{0,20}"), 0..8).prop_map(|pairs| {
        pairs
            .into_iter()
            .enumerate()
            .map(|(i, (name, description))| SearchEntry::new(name, format!("/{}", i), description))
            .collect()
    })
}

proptest! {
    #[test]
    fn identity_for_every_unit(index in any::<prop::sample::Index>(), value in -1.0e9f64..1.0e9) {
        let units = all_units();
        let (category, unit) = units[index.index(units.len())];
        let result = convert(&ConversionRequest::new(category, unit, unit, value)).unwrap();
        prop_assert_eq!(result.value, value);
    }

    #[test]
    fn identity_rejects_undeclared_names(name in "[a-z]{1,10}", value in -1.0e6f64..1.0e6) {
        let reg = registry();
        if reg.category(&name).is_err() {
            let err = convert(&ConversionRequest::new(name.as_str(), "meter", "meter", value)).unwrap_err();
            prop_assert_eq!(err.error_code(), "UNKNOWN_CATEGORY");
        }
        if reg.category("length").map(|c| c.unit(&name).is_none()).unwrap_or(false) {
            let err = convert(&ConversionRequest::new("length", name.as_str(), name.as_str(), value)).unwrap_err();
            prop_assert_eq!(err.error_code(), "UNKNOWN_UNIT");
        }
    }

    #[test]
    fn measurement_round_trip(index in any::<prop::sample::Index>(), value in 1.0e-3f64..1.0e6) {
        let edges = measurement_edges();
        let (category, from, to) = edges[index.index(edges.len())];
        let there = convert(&ConversionRequest::new(category, from, to, value)).unwrap();
        let back = convert(&ConversionRequest::new(category, to, from, there.value)).unwrap();
        let tolerance = if category == "temperature" { 1e-9 * value.abs().max(1.0) } else { 1e-4 * value.abs() };
        prop_assert!((back.value - value).abs() <= tolerance,
            "{} {} -> {} -> {}: {} vs {}", category, from, to, from, back.value, value);
    }

    #[test]
    fn similarity_is_symmetric(a in "[a-zA-Z ]{0,16}", b in "[a-zA-Z ]{0,16}") {
        prop_assert_eq!(similarity(&a, &b), similarity(&b, &a));
    }

    #[test]
    fn similarity_is_bounded(a in "\\PC{0,16}", b in "\\PC{0,16}") {
        let score = similarity(&a, &b);
        prop_assert!((0.0..=1.0).contains(&score));
        prop_assert_eq!(similarity(&a, &a), 1.0);
    }

    #[test]
    fn empty_query_returns_catalog_unchanged(catalog in catalog_strategy()) {
        let matches = search("", &catalog);
        prop_assert_eq!(matches.len(), catalog.len());
        for (m, entry) in matches.iter().zip(catalog.iter()) {
            prop_assert_eq!(m.entry, entry);
        }
    }

    #[test]
    fn ranking_is_sorted_and_stable(catalog in catalog_strategy(), query in "[a-z]{1,6}") {
        let matches = search(&query, &catalog);
        for pair in matches.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
            if pair[0].score == pair[1].score {
                let first = catalog.iter().position(|e| std::ptr::eq(e, pair[0].entry));
                let second = catalog.iter().position(|e| std::ptr::eq(e, pair[1].entry));
                prop_assert!(first < second);
            }
        }
        for m in &matches {
            prop_assert!(m.score > 0.2);
        }
    }
}

#[test]
fn temperature_exact_values() {
    let value = |from: &str, to: &str, v: f64| {
        convert(&ConversionRequest::new("temperature", from, to, v)).unwrap().value
    };
    assert_eq!(value("celsius", "fahrenheit", 0.0), 32.0);
    assert_eq!(value("celsius", "kelvin", 0.0), 273.15);
    assert_eq!(value("fahrenheit", "celsius", 32.0), 0.0);
}

#[test]
fn every_measurement_and_currency_category_is_complete() {
    for category in registry().list_categories() {
        if category.kind != CategoryKind::Pricing {
            assert!(category.missing_edges().is_empty(), "{} has gaps", category.key);
        }
    }
}
