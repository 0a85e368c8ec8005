use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{SecondsFormat, Utc};
use rusqlite::params;

use crate::Db;
use crate::error::Result;

/// Durable string key-value storage used for usage counters.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&self, key: &str, value: &str) -> Result<()>;

    fn delete(&self, key: &str) -> Result<()>;

    fn name(&self) -> &str {
        "unknown"
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn delete(&self, key: &str) -> Result<()> {
        (**self).delete(key)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl Db {
    pub fn get_entry(&self, key: &str) -> Result<Option<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT value FROM kv_entry WHERE key = ?1")?;
        let mut rows = stmt.query([key])?;
        if let Some(row) = rows.next()? {
            Ok(Some(row.get::<_, String>(0)?))
        } else {
            Ok(None)
        }
    }

    pub fn set_entry(&self, key: &str, value: &str) -> Result<()> {
        let now = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        self.conn.execute(
            r#"
            INSERT INTO kv_entry (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
              value = excluded.value,
              updated_at = excluded.updated_at
            "#,
            params![key, value, now],
        )?;
        Ok(())
    }

    pub fn delete_entry(&self, key: &str) -> Result<usize> {
        Ok(self
            .conn
            .execute("DELETE FROM kv_entry WHERE key = ?1", params![key])?)
    }

    pub fn list_keys(&self, prefix: &str) -> Result<Vec<String>> {
        let pattern = format!("{}%", escape_like(prefix));
        let mut stmt = self.conn.prepare(
            r#"
            SELECT key
            FROM kv_entry
            WHERE key LIKE ?1 ESCAPE '\'
            ORDER BY key ASC
            "#,
        )?;
        let rows = stmt.query_map(params![pattern], |row| row.get::<_, String>(0))?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }
}

fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// SQLite-backed store. Each call opens its own connection so the store can
/// be shared across threads.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    path: PathBuf,
}

impl SqliteStore {
    /// Opens the database once to apply migrations.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let mut db = Db::open(&path)?;
        db.migrate()?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn db(&self) -> Result<Db> {
        Db::open(&self.path)
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.db()?.get_entry(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.db()?.set_entry(key, value)
    }

    fn delete(&self, key: &str) -> Result<()> {
        self.db()?.delete_entry(key).map(|_| ())
    }

    fn name(&self) -> &str {
        "sqlite"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_like_escapes_wildcards() {
        assert_eq!(escape_like("usage_%"), "usage\\_\\%");
        assert_eq!(escape_like("usage-"), "usage-");
    }

    #[test]
    fn in_memory_db_round_trips_entries() {
        let mut db = Db::open_in_memory().expect("open");
        db.migrate().expect("migrate");
        db.set_entry("usage-tracking", "[]").expect("set");
        assert_eq!(db.list_keys("usage-").expect("keys"), vec!["usage-tracking"]);
    }
}
