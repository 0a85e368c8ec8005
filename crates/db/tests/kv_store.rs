mod support;

use meter_db::{KeyValueStore, SqliteStore};
use support::{setup_db, setup_store};

#[test]
fn set_entry_overwrites_existing_value() {
    let test_db = setup_db();
    let db = &test_db.db;
    db.set_entry("usage-tracking", "[]").expect("set");
    db.set_entry("usage-tracking", "[{}]").expect("overwrite");
    assert_eq!(
        db.get_entry("usage-tracking").expect("get").as_deref(),
        Some("[{}]")
    );
}

#[test]
fn delete_entry_reports_removed_rows() {
    let test_db = setup_db();
    let db = &test_db.db;
    db.set_entry("usage-2025-01-01", "{}").expect("set");
    assert_eq!(db.delete_entry("usage-2025-01-01").expect("delete"), 1);
    assert_eq!(db.delete_entry("usage-2025-01-01").expect("delete"), 0);
    assert!(db.get_entry("usage-2025-01-01").expect("get").is_none());
}

#[test]
fn list_keys_matches_literal_prefix() {
    let test_db = setup_db();
    let db = &test_db.db;
    db.set_entry("usage-2025-01-01", "{}").expect("set");
    db.set_entry("usage-2025-01-02", "{}").expect("set");
    db.set_entry("usage-tracking", "[]").expect("set");
    db.set_entry("usageX2025", "{}").expect("set");
    db.set_entry("conversation-u1", "[]").expect("set");

    let keys = db.list_keys("usage-2025").expect("keys");
    assert_eq!(keys, vec!["usage-2025-01-01", "usage-2025-01-02"]);

    let keys = db.list_keys("usage_").expect("keys");
    assert!(keys.is_empty());
}

#[test]
fn sqlite_store_persists_across_handles() {
    let test_store = setup_store();
    test_store
        .store
        .set("usage-tracking", "[1]")
        .expect("set");

    let reopened = SqliteStore::open(test_store.store.path()).expect("reopen");
    assert_eq!(
        reopened.get("usage-tracking").expect("get").as_deref(),
        Some("[1]")
    );
    reopened.delete("usage-tracking").expect("delete");
    assert!(test_store.store.get("usage-tracking").expect("get").is_none());
    assert_eq!(reopened.name(), "sqlite");
}
