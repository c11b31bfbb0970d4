//! Restricted-country lookup tests.

use tradedesk_core::{reference::EmbargoLevel, DeskConfig, ScreeningEngine};

fn engine() -> ScreeningEngine {
    let config = DeskConfig::bundled().expect("bundled reference data");
    ScreeningEngine::new(config.sanctions)
}

#[test]
fn north_korea_is_under_full_embargo() {
    let engine = engine();
    let country = engine
        .check_country_restrictions("KP")
        .expect("KP is restricted");
    assert_eq!(country.name, "North Korea");
    assert_eq!(country.level, EmbargoLevel::FullEmbargo);
    assert_eq!(country.programs, vec!["DPRK".to_string()]);
}

#[test]
fn partial_restrictions_are_reported() {
    let engine = engine();
    let russia = engine.check_country_restrictions("RU").expect("RU is restricted");
    assert_eq!(russia.level, EmbargoLevel::Partial);
}

#[test]
fn unlisted_country_is_not_found() {
    let engine = engine();
    assert!(engine.check_country_restrictions("FR").is_none());
}

/// Codes are stored uppercase; lookups do not normalize.
#[test]
fn lookup_is_case_sensitive() {
    let engine = engine();
    assert!(engine.check_country_restrictions("kp").is_none());
    assert!(engine.check_country_restrictions(" KP").is_none());
    assert!(engine.check_country_restrictions("").is_none());
}

#[test]
fn bundled_list_has_eight_restricted_countries() {
    let engine = engine();
    let codes: Vec<&str> = engine
        .reference()
        .restricted_countries()
        .iter()
        .map(|c| c.code.as_str())
        .collect();
    assert_eq!(codes, vec!["KP", "IR", "CU", "SY", "RU", "BY", "VE", "MM"]);
}
