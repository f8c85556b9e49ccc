//! Tests for the public-holiday set and its JSON cache.

use std::path::PathBuf;

use balance_engine::error::BalanceError;
use balance_engine::{HolidaySet, Marker};
use chrono::NaiveDate;

fn d(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn holiday(summary: &str, description: &str, start: &str, end: &str) -> Marker {
    Marker {
        id: String::new(),
        summary: summary.to_string(),
        description: description.to_string(),
        start: d(start),
        end: d(end),
    }
}

fn temp_path(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "balance-engine-test-{}-{}",
        std::process::id(),
        name
    ));
    let _ = std::fs::remove_file(&path);
    path
}

#[test]
fn calendar_entries_cover_every_day_of_their_span() {
    let set = HolidaySet::from_calendar(
        &[holiday("Christmas", "Public holiday", "2024-12-25", "2024-12-27")],
        "Zurich",
    );
    assert_eq!(set.len(), 2);
    assert_eq!(set.label(d("2024-12-25")), Some("Christmas"));
    assert_eq!(set.label(d("2024-12-26")), Some("Christmas"));
    assert!(!set.contains(d("2024-12-27")));
}

#[test]
fn regional_holidays_must_name_the_region() {
    let set = HolidaySet::from_calendar(
        &[
            holiday("Sechseläuten", "Public holiday in Zurich", "2024-04-15", "2024-04-16"),
            holiday("St. Joseph", "Public holiday in Ticino, Valais", "2024-03-19", "2024-03-20"),
            holiday("Labour Day", "Observance", "2024-05-01", "2024-05-02"),
        ],
        "Zurich",
    );
    assert!(set.contains(d("2024-04-15")));
    assert!(!set.contains(d("2024-03-19")));
    assert!(set.contains(d("2024-05-01")));
}

#[test]
fn cache_is_tab_indented_date_keyed_json() {
    let path = temp_path("store.json");
    let mut set = HolidaySet::new();
    set.insert(d("2024-01-02"), "Berchtold's Day");
    set.insert(d("2024-01-01"), "New Year's Day");

    set.store(&path).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(
        text,
        "{\n\t\"2024-01-01\": \"New Year's Day\",\n\t\"2024-01-02\": \"Berchtold's Day\"\n}\n"
    );
    assert_eq!(HolidaySet::load(&path).unwrap(), set);

    let _ = std::fs::remove_file(&path);
}

#[test]
fn load_rejects_bad_keys() {
    let path = temp_path("bad-keys.json");
    std::fs::write(&path, r#"{"New Year": "2024-01-01"}"#).unwrap();

    assert!(matches!(
        HolidaySet::load(&path),
        Err(BalanceError::InvalidDate(_))
    ));
    let _ = std::fs::remove_file(&path);
}

#[test]
fn load_or_fetch_uses_cache_when_present() {
    let path = temp_path("present.json");
    let mut set = HolidaySet::new();
    set.insert(d("2024-08-01"), "National Day");
    set.store(&path).unwrap();

    let loaded = HolidaySet::load_or_fetch(&path, || panic!("cache should be used")).unwrap();
    assert_eq!(loaded, set);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn load_or_fetch_rebuilds_missing_or_corrupt_cache() {
    let path = temp_path("corrupt.json");
    std::fs::write(&path, "not json").unwrap();

    let fetched = HolidaySet::load_or_fetch(&path, || {
        let mut set = HolidaySet::new();
        set.insert(d("2024-08-01"), "National Day");
        Ok(set)
    })
    .unwrap();

    assert_eq!(fetched.len(), 1);
    assert_eq!(HolidaySet::load(&path).unwrap(), fetched, "cache rewritten");
    let _ = std::fs::remove_file(&path);
}

#[test]
fn load_or_fetch_propagates_fetch_errors() {
    let path = temp_path("missing.json");
    let result = HolidaySet::load_or_fetch(&path, || {
        Err(BalanceError::Calendar("offline".to_string()))
    });
    assert!(matches!(result, Err(BalanceError::Calendar(_))));
    assert!(!path.exists());
}
