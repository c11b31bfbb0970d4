//! Screening log tests: SQLite round trip, ordering and counts.

use chrono::{TimeZone, Utc};
use tradedesk_core::{store::DeskStore, DeskConfig, ScreeningEngine, ScreeningMatch};

fn setup() -> (DeskStore, ScreeningEngine) {
    let _ = env_logger::builder().is_test(true).try_init();
    let store = DeskStore::in_memory().expect("in-memory store");
    store.migrate().expect("migration");
    let config = DeskConfig::bundled().expect("bundled reference data");
    (store, ScreeningEngine::new(config.sanctions))
}

#[test]
fn recorded_screening_reads_back() {
    let (store, engine) = setup();
    let matches = engine.screen_party("Korea Kwangson");
    let at = Utc.with_ymd_and_hms(2026, 3, 2, 9, 30, 0).unwrap();

    let id = store
        .record_screening("Korea Kwangson", &matches, at)
        .expect("record screening");
    let row = store
        .screening_by_id(&id)
        .expect("query log")
        .expect("row exists");

    assert_eq!(row.query, "Korea Kwangson");
    assert_eq!(row.screened_at, "2026-03-02T09:30:00Z");
    assert_eq!(row.match_count, matches.len() as i64);
    assert_eq!(row.top_confidence, Some(75));

    let payload: Vec<ScreeningMatch> =
        serde_json::from_str(&row.payload).expect("payload is match JSON");
    assert_eq!(payload, matches);
}

#[test]
fn clear_screening_has_no_top_confidence() {
    let (store, engine) = setup();
    let matches = engine.screen_party("Acme Trading Co");
    assert!(matches.is_empty());

    let id = store
        .record_screening("Acme Trading Co", &matches, Utc::now())
        .expect("record screening");
    let row = store.screening_by_id(&id).unwrap().unwrap();
    assert_eq!(row.match_count, 0);
    assert_eq!(row.top_confidence, None);
    assert_eq!(row.payload, "[]");
}

#[test]
fn unknown_screening_id_is_none() {
    let (store, _) = setup();
    assert!(store.screening_by_id("scr-missing").unwrap().is_none());
}

#[test]
fn recent_screenings_are_newest_first() {
    let (store, engine) = setup();
    for query in ["SBERBANK", "Acme", "TALIBAN"] {
        let matches = engine.screen_party(query);
        store
            .record_screening(query, &matches, Utc::now())
            .expect("record screening");
    }

    let recent = store.recent_screenings(2).expect("recent screenings");
    let queries: Vec<&str> = recent.iter().map(|r| r.query.as_str()).collect();
    assert_eq!(queries, vec!["TALIBAN", "Acme"]);

    assert_eq!(store.screening_count().unwrap(), 3);
    assert_eq!(store.hit_count().unwrap(), 2);
}

#[test]
fn migration_is_idempotent() {
    let (store, _) = setup();
    store.migrate().expect("second migration");
    assert_eq!(store.screening_count().unwrap(), 0);
}
