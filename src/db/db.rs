use super::migrations::init_with_migrations;
use crate::libs::config::Config;
use anyhow::Result;
use rusqlite::Connection;
use std::path::Path;

pub const DB_FILE_NAME: &str = "heures.db";

/// Open SQLite connection with the schema migrated to the latest version.
pub struct Db {
    pub conn: Connection,
}

impl Db {
    /// Opens the database configured in `config.json`, or `heures.db` in the
    /// data directory.
    pub fn new() -> Result<Db> {
        Self::from_config(&Config::read()?)
    }

    pub fn from_config(config: &Config) -> Result<Db> {
        Self::open(&config.database_path()?)
    }

    pub fn open(path: &Path) -> Result<Db> {
        tracing::debug!(path = %path.display(), "opening database");
        Self::prepare(Connection::open(path)?)
    }

    /// Private in-memory database, mostly for tests.
    pub fn in_memory() -> Result<Db> {
        Self::prepare(Connection::open_in_memory()?)
    }

    fn prepare(mut conn: Connection) -> Result<Db> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        init_with_migrations(&mut conn)?;
        Ok(Db { conn })
    }
}
