use tether_store::migrate::latest_version;
use tether_store::Store;

#[test]
fn migrations_apply_once() {
    let store = Store::open_in_memory().expect("open in memory");
    assert_eq!(store.schema_version().expect("version before migrate"), 0);

    store.migrate().expect("migrate");
    store.migrate().expect("migrate again");

    let version: i64 = store
        .connection()
        .query_row("SELECT version FROM tether_schema LIMIT 1;", [], |row| {
            row.get(0)
        })
        .expect("schema version");
    assert_eq!(version, latest_version());
    assert_eq!(store.schema_version().expect("version"), latest_version());
}

#[test]
fn newer_database_is_rejected() {
    let store = Store::open_in_memory().expect("open in memory");
    store.migrate().expect("migrate");
    store
        .connection()
        .execute(
            "UPDATE tether_schema SET version = ?1;",
            [latest_version() + 1],
        )
        .expect("bump version");

    let err = store.migrate().unwrap_err();
    assert!(err.to_string().contains("newer than available migrations"));
}

#[test]
fn file_store_persists_between_opens() {
    let temp = tempfile::TempDir::new().expect("tempdir");
    let path = temp.path().join("tether.sqlite3");

    {
        let store = Store::open(&path).expect("open");
        store.migrate().expect("migrate");
        store
            .connection()
            .execute(
                "INSERT INTO contacts (first_name, last_name, created_at) VALUES ('Ada', 'Lovelace', 0);",
                [],
            )
            .expect("insert");
    }

    let store = Store::open(&path).expect("reopen");
    store.migrate().expect("migrate");
    assert_eq!(store.contacts().count().expect("count"), 1);
}
