use tempfile::TempDir;

use moodlog::{
    core::store::EntryStore,
    entry::EntryDraft,
    persist::{EntryTable, sqlite::SqliteEntryTable},
    runtime::config::{RuntimeConfig, open_store},
    types::{EntryDate, Mood},
};

fn date(s: &str) -> EntryDate {
    s.parse().expect("date")
}

#[test]
fn entries_survive_reopen() {
    let tmp = TempDir::new().expect("tmp");
    let db_path = tmp.path().join("mood.db");

    let mut store = EntryStore::new(Box::new(SqliteEntryTable::open(&db_path).expect("open sqlite")));
    let id = store
        .upsert(
            &EntryDraft::new(date("2024-05-01"), Mood::Happy)
                .with_content("picnic")
                .with_photos(vec!["data:image/png;base64,AAAA".into()]),
        )
        .expect("save");
    store
        .upsert(&EntryDraft::new(date("2024-05-02"), Mood::Worried))
        .expect("save");
    store.flush().expect("flush");
    let before = store.get_all().expect("all");
    drop(store);

    let reopened = SqliteEntryTable::open(&db_path).expect("reopen");
    let after = reopened.scan_all().expect("scan");
    assert_eq!(after, before);
    assert_eq!(after[0].id, id);
    assert_eq!(after[0].photos, vec!["data:image/png;base64,AAAA".to_string()]);
}

#[test]
fn config_path_opens_file_backed_store() {
    let tmp = TempDir::new().expect("tmp");
    let cfg = RuntimeConfig {
        db_path: Some(tmp.path().join("cfg.db")),
        ..RuntimeConfig::default()
    };

    let mut store = open_store(&cfg).expect("open");
    store
        .upsert(&EntryDraft::new(date("2024-01-01"), Mood::Neutral))
        .expect("save");
    drop(store);

    let store = open_store(&cfg).expect("reopen");
    assert!(store.get_by_date(date("2024-01-01")).expect("get").is_some());
}

#[test]
fn missing_directory_is_a_storage_error() {
    let tmp = TempDir::new().expect("tmp");
    let cfg = RuntimeConfig {
        db_path: Some(tmp.path().join("no/such/dir/mood.db")),
        ..RuntimeConfig::default()
    };
    let err = open_store(&cfg).unwrap_err();
    assert!(err.is_storage());
}
