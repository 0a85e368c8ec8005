mod support;

use meter_db::{Db, MIGRATIONS};
use rusqlite::Connection;
use support::setup_db;

#[test]
fn migrate_records_every_migration() {
    let test_db = setup_db();
    let applied = test_db.db.applied_migrations().expect("applied");
    let expected: Vec<String> = MIGRATIONS
        .iter()
        .map(|(name, _)| name.to_string())
        .collect();
    assert_eq!(applied, expected);
}

#[test]
fn migrate_is_idempotent() {
    let test_db = setup_db();
    let mut db = Db::open(&test_db.path).expect("reopen");
    db.migrate().expect("migrate again");
    db.set_entry("usage-tracking", "[]").expect("set");
    db.migrate().expect("migrate third time");
    assert_eq!(
        db.get_entry("usage-tracking").expect("get").as_deref(),
        Some("[]")
    );
    assert_eq!(db.applied_migrations().expect("applied").len(), MIGRATIONS.len());
}

#[test]
fn migrate_creates_kv_table() {
    let test_db = setup_db();
    let conn = Connection::open(&test_db.path).expect("open conn");
    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'kv_entry'",
            [],
            |row| row.get(0),
        )
        .expect("count");
    assert_eq!(count, 1);
}

#[test]
fn migrate_creates_no_unused_indexes() {
    let test_db = setup_db();
    let conn = Connection::open(&test_db.path).expect("open conn");
    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master \
             WHERE type = 'index' AND tbl_name = 'kv_entry' AND sql IS NOT NULL",
            [],
            |row| row.get(0),
        )
        .expect("count");
    assert_eq!(count, 0);
    assert_eq!(MIGRATIONS.len(), 1);
}
