use std::sync::{
    Arc,
    atomic::{AtomicI64, Ordering},
};

use chrono::DateTime;

use moodlog::{
    core::{memory::MemoryEntryTable, store::EntryStore},
    entry::EntryDraft,
    persist::{EntryTable, sqlite::SqliteEntryTable},
    types::{EntryDate, Mood},
};

fn date(s: &str) -> EntryDate {
    s.parse().expect("date")
}

/// Clock that advances one second per reading.
fn ticking_store(table: Box<dyn EntryTable>) -> EntryStore {
    let ms = Arc::new(AtomicI64::new(1_700_000_000_000));
    EntryStore::with_clock(
        table,
        Box::new(move || {
            let now = ms.fetch_add(1_000, Ordering::SeqCst);
            DateTime::from_timestamp_millis(now).expect("ts")
        }),
    )
}

fn tables() -> Vec<(&'static str, Box<dyn EntryTable>)> {
    vec![
        ("memory", Box::new(MemoryEntryTable::new()) as Box<dyn EntryTable>),
        ("sqlite", Box::new(SqliteEntryTable::open_in_memory().expect("sqlite")) as Box<dyn EntryTable>),
    ]
}

#[test]
fn save_then_resave_replaces_whole_record() {
    for (name, table) in tables() {
        let mut store = ticking_store(table);

        let id = store
            .upsert(&EntryDraft::new(date("2024-05-01"), Mood::Happy).with_content("good day"))
            .expect("first save");
        let first = store.get_by_date(date("2024-05-01")).expect("get").expect("entry");
        assert_eq!(first.id, id, "{name}");
        assert_eq!(first.mood, Mood::Happy, "{name}");
        assert_eq!(first.content.as_deref(), Some("good day"), "{name}");
        assert_eq!(first.created_at, first.updated_at, "{name}");

        let again = store
            .upsert(&EntryDraft::new(date("2024-05-01"), Mood::Sad))
            .expect("second save");
        let second = store.get_by_date(date("2024-05-01")).expect("get").expect("entry");
        assert_eq!(again, id, "{name}");
        assert_eq!(second.id, id, "{name}");
        assert_eq!(second.mood, Mood::Sad, "{name}");
        assert_eq!(second.content, None, "{name}");
        assert_eq!(second.created_at, first.created_at, "{name}");
        assert!(second.updated_at > second.created_at, "{name}");
    }
}

#[test]
fn photos_are_replaced_not_merged() {
    for (name, table) in tables() {
        let mut store = ticking_store(table);
        let d = date("2024-06-10");
        store
            .upsert(&EntryDraft::new(d, Mood::Neutral).with_photos(vec!["data:a".into(), "data:b".into()]))
            .expect("save");
        assert_eq!(store.get_by_date(d).expect("get").expect("entry").photos.len(), 2, "{name}");

        store
            .upsert(&EntryDraft::new(d, Mood::Neutral).with_photos(vec!["data:c".into()]))
            .expect("save");
        let rec = store.get_by_date(d).expect("get").expect("entry");
        assert_eq!(rec.photos, vec!["data:c".to_string()], "{name}");
    }
}

#[test]
fn missing_date_is_absent_not_error() {
    for (name, table) in tables() {
        let store = ticking_store(table);
        assert!(store.get_by_date(date("2030-01-01")).expect("get").is_none(), "{name}");
    }
}

#[test]
fn inverted_range_is_empty() {
    for (name, table) in tables() {
        let mut store = ticking_store(table);
        store
            .upsert(&EntryDraft::new(date("2024-03-15"), Mood::Angry))
            .expect("save");
        let out = store
            .get_by_date_range(date("2024-03-31"), date("2024-03-01"))
            .expect("range");
        assert!(out.is_empty(), "{name}");
    }
}

#[test]
fn range_is_inclusive_and_ordered() {
    for (name, table) in tables() {
        let mut store = ticking_store(table);
        for d in ["2024-03-20", "2024-03-01", "2024-02-29", "2024-03-31", "2024-04-01"] {
            store.upsert(&EntryDraft::new(date(d), Mood::Happy)).expect("save");
        }
        let dates: Vec<String> = store
            .get_by_date_range(date("2024-03-01"), date("2024-03-31"))
            .expect("range")
            .into_iter()
            .map(|e| e.date.to_string())
            .collect();
        assert_eq!(dates, ["2024-03-01", "2024-03-20", "2024-03-31"], "{name}");
    }
}

#[test]
fn february_month_query_respects_leap_years() {
    for (name, table) in tables() {
        let mut store = ticking_store(table);
        for d in [
            "2023-01-31", "2023-02-01", "2023-02-28", "2023-03-01",
            "2024-01-31", "2024-02-01", "2024-02-29", "2024-03-01",
        ] {
            store.upsert(&EntryDraft::new(date(d), Mood::Worried)).expect("save");
        }

        let leap: Vec<String> = store
            .get_by_month(2024, 2)
            .expect("month")
            .into_iter()
            .map(|e| e.date.to_string())
            .collect();
        assert_eq!(leap, ["2024-02-01", "2024-02-29"], "{name}");

        let common: Vec<String> = store
            .get_by_month(2023, 2)
            .expect("month")
            .into_iter()
            .map(|e| e.date.to_string())
            .collect();
        assert_eq!(common, ["2023-02-01", "2023-02-28"], "{name}");
    }
}

#[test]
fn year_query_covers_whole_year_only() {
    for (name, table) in tables() {
        let mut store = ticking_store(table);
        for d in ["2023-12-31", "2024-01-01", "2024-07-04", "2024-12-31", "2025-01-01"] {
            store.upsert(&EntryDraft::new(date(d), Mood::Happy)).expect("save");
        }
        let got = store.get_by_year(2024).expect("year");
        assert_eq!(got.len(), 3, "{name}");
        assert_eq!(got[0].date, date("2024-01-01"), "{name}");
        assert_eq!(got[2].date, date("2024-12-31"), "{name}");
        assert_eq!(store.get_all().expect("all").len(), 5, "{name}");
    }
}

#[test]
fn delete_then_lookup_is_absent_and_unknown_delete_is_ok() {
    for (name, table) in tables() {
        let mut store = ticking_store(table);
        let id = store
            .upsert(&EntryDraft::new(date("2024-05-01"), Mood::Happy))
            .expect("save");

        assert!(store.delete_by_id(id).expect("delete"), "{name}");
        assert!(store.get_by_date(date("2024-05-01")).expect("get").is_none(), "{name}");

        assert!(!store.delete_by_id(id).expect("second delete"), "{name}");
        assert!(!store.delete_by_id(9_999).expect("unknown delete"), "{name}");
    }
}

#[test]
fn save_after_delete_creates_fresh_entry() {
    for (name, table) in tables() {
        let mut store = ticking_store(table);
        let d = date("2024-08-08");
        let old = store.upsert(&EntryDraft::new(d, Mood::Sad)).expect("save");
        store.delete_by_id(old).expect("delete");
        let new = store.upsert(&EntryDraft::new(d, Mood::Happy)).expect("save");
        assert_ne!(old, new, "{name}");
        let rec = store.get_by_date(d).expect("get").expect("entry");
        assert_eq!(rec.created_at, rec.updated_at, "{name}");
    }
}
