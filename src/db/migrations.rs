//! Versioned schema migrations.
//!
//! Each migration has a version, a name and an `up` function run inside the
//! migration transaction. Applied versions are recorded in the `migrations`
//! table; on open, every registered migration above the recorded maximum is
//! applied in order, all in one transaction.
//!
//! ## Usage
//!
//! ```rust
//! use heures::db::migrations::{get_db_version, init_with_migrations};
//! use rusqlite::Connection;
//!
//! let mut conn = Connection::open_in_memory()?;
//! init_with_migrations(&mut conn)?;
//! assert!(get_db_version(&conn)? >= 1);
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::libs::messages::Message;
use crate::{msg_debug, msg_error};
use anyhow::Result;
use rusqlite::{params, Connection, Transaction};

const MIGRATIONS_TABLE: &str = "
CREATE TABLE IF NOT EXISTS migrations (
    id INTEGER PRIMARY KEY,
    version INTEGER NOT NULL UNIQUE,
    name TEXT NOT NULL,
    applied_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)";

#[derive(Debug, Clone)]
struct Migration {
    version: u32,
    name: &'static str,
    up: fn(&Transaction) -> Result<()>,
}

/// Registry of all schema migrations, in version order.
pub struct MigrationManager {
    migrations: Vec<Migration>,
}

impl Default for MigrationManager {
    fn default() -> Self {
        Self::new()
    }
}

impl MigrationManager {
    pub fn new() -> Self {
        let mut manager = Self { migrations: Vec::new() };
        manager.register_migrations();
        manager
    }

    fn register_migrations(&mut self) {
        // Version 1: accounts and work entries
        self.add_migration(1, "create_users_and_work_entries", |tx| {
            tx.execute(
                "CREATE TABLE IF NOT EXISTS users (
                    id TEXT NOT NULL PRIMARY KEY,
                    first_name TEXT NOT NULL,
                    last_name TEXT NOT NULL,
                    email TEXT NOT NULL UNIQUE,
                    phone TEXT,
                    avatar_url TEXT,
                    password_hash TEXT NOT NULL,
                    created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
                    updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
                )",
                [],
            )?;

            // Dates and times stay as entered; the pipeline parses them.
            tx.execute(
                "CREATE TABLE IF NOT EXISTS work_entries (
                    id TEXT NOT NULL PRIMARY KEY,
                    user_id TEXT NOT NULL,
                    start_date TEXT NOT NULL,
                    start_time TEXT NOT NULL,
                    end_date TEXT NOT NULL,
                    end_time TEXT NOT NULL,
                    has_break BOOLEAN NOT NULL DEFAULT FALSE,
                    break_start_hour TEXT,
                    break_start_min TEXT,
                    break_end_hour TEXT,
                    break_end_min TEXT,
                    category TEXT,
                    hourly_rate REAL,
                    client_id TEXT,
                    client_name TEXT,
                    activity_id TEXT,
                    activity_name TEXT,
                    location TEXT,
                    comment TEXT,
                    created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
                    updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
                )",
                [],
            )?;

            tx.execute(
                "CREATE INDEX IF NOT EXISTS idx_work_entries_user_date ON work_entries(user_id, start_date)",
                [],
            )?;
            Ok(())
        });

        // Version 2: client/activity registry and custom categories
        self.add_migration(2, "add_clients_and_categories", |tx| {
            tx.execute(
                "CREATE TABLE IF NOT EXISTS clients (
                    id TEXT NOT NULL PRIMARY KEY,
                    user_id TEXT NOT NULL,
                    name TEXT NOT NULL,
                    kind TEXT NOT NULL DEFAULT 'client',
                    default_rate REAL,
                    color TEXT,
                    address TEXT,
                    city TEXT,
                    postal_code TEXT,
                    siret TEXT,
                    description TEXT,
                    created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
                )",
                [],
            )?;
            tx.execute("CREATE INDEX IF NOT EXISTS idx_clients_user ON clients(user_id)", [])?;

            tx.execute(
                "CREATE TABLE IF NOT EXISTS categories (
                    user_id TEXT NOT NULL,
                    name TEXT NOT NULL,
                    created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
                    PRIMARY KEY (user_id, name)
                )",
                [],
            )?;
            Ok(())
        });

        // Version 3: server-side sessions
        self.add_migration(3, "add_sessions", |tx| {
            tx.execute(
                "CREATE TABLE IF NOT EXISTS sessions (
                    token_hash TEXT NOT NULL PRIMARY KEY,
                    user_id TEXT NOT NULL,
                    created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
                    expires_at TIMESTAMP NOT NULL
                )",
                [],
            )?;
            tx.execute("CREATE INDEX IF NOT EXISTS idx_sessions_user ON sessions(user_id)", [])?;
            Ok(())
        });
    }

    fn add_migration(&mut self, version: u32, name: &'static str, up: fn(&Transaction) -> Result<()>) {
        self.migrations.push(Migration { version, name, up });
    }

    /// Applies every pending migration inside a single transaction.
    pub fn run_migrations(&self, conn: &mut Connection) -> Result<()> {
        conn.execute(MIGRATIONS_TABLE, [])?;

        let current_version = self.get_current_version(conn)?;
        let pending: Vec<&Migration> = self.migrations.iter().filter(|m| m.version > current_version).collect();

        if pending.is_empty() {
            msg_debug!(Message::DatabaseUpToDate);
            return Ok(());
        }

        msg_debug!(Message::MigrationsFound(pending.len()));

        let tx = conn.transaction()?;
        for migration in pending {
            msg_debug!(Message::RunningMigration(migration.version, migration.name.to_string()));

            if let Err(e) = (migration.up)(&tx) {
                msg_error!(Message::MigrationFailed(migration.version, e.to_string()));
                return Err(e);
            }
            tx.execute(
                "INSERT INTO migrations (version, name) VALUES (?1, ?2)",
                params![migration.version, migration.name],
            )?;
            msg_debug!(Message::MigrationCompleted(migration.version));
        }
        tx.commit()?;

        tracing::info!(version = self.latest_version(), "database schema migrated");
        Ok(())
    }

    fn get_current_version(&self, conn: &Connection) -> Result<u32> {
        conn.execute(MIGRATIONS_TABLE, [])?;
        let version: Option<u32> = conn.query_row("SELECT MAX(version) FROM migrations", [], |row| row.get(0))?;
        Ok(version.unwrap_or(0))
    }

    pub fn latest_version(&self) -> u32 {
        self.migrations.last().map(|m| m.version).unwrap_or(0)
    }

    pub fn is_migration_applied(&self, conn: &Connection, version: u32) -> Result<bool> {
        let count: i32 = conn.query_row("SELECT COUNT(*) FROM migrations WHERE version = ?1", params![version], |row| row.get(0))?;
        Ok(count > 0)
    }

    /// `(version, name, applied_at)` of every applied migration.
    pub fn get_migration_history(&self, conn: &Connection) -> Result<Vec<(u32, String, String)>> {
        let mut stmt = conn.prepare("SELECT version, name, applied_at FROM migrations ORDER BY version")?;
        let history = stmt
            .query_map([], |row| Ok((row.get::<_, u32>(0)?, row.get::<_, String>(1)?, row.get::<_, String>(2)?)))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(history)
    }
}

pub fn init_with_migrations(conn: &mut Connection) -> Result<()> {
    MigrationManager::new().run_migrations(conn)
}

pub fn get_db_version(conn: &Connection) -> Result<u32> {
    MigrationManager::new().get_current_version(conn)
}

pub fn needs_migration(conn: &Connection) -> Result<bool> {
    let manager = MigrationManager::new();
    Ok(manager.get_current_version(conn)? < manager.latest_version())
}
