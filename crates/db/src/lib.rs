mod error;
mod kv;
mod memory;
mod migrations;

use std::path::Path;

use rusqlite::Connection;

pub use error::{DbError, Result};
pub use kv::{KeyValueStore, SqliteStore};
pub use memory::MemoryStore;
pub use migrations::MIGRATIONS;

pub struct Db {
    conn: Connection,
}

impl Db {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        conn.pragma_update(None, "temp_store", "MEMORY")?;
        conn.pragma_update(None, "busy_timeout", 5_000)?;
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }
}
