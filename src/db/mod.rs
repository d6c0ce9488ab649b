//! Persistence layer built on SQLite.
//!
//! [`db::Db`] opens a connection and brings the schema up to date through
//! [`migrations`]. Repositories borrow that connection and expose typed
//! operations per table, so the same connection can back the CLI or be
//! shared by the REST server behind a mutex.
//!
//! ## Usage
//!
//! ```rust
//! use heures::db::{db::Db, entries::Entries};
//! use heures::libs::entry::WorkEntry;
//!
//! let db = Db::in_memory()?;
//! let entries = Entries::new(&db.conn);
//! entries.insert(&WorkEntry::new("local", "2025-01-10", "09:00", "2025-01-10", "17:00"))?;
//! assert_eq!(entries.list_by_user("local")?.len(), 1);
//! # Ok::<(), anyhow::Error>(())
//! ```

/// Connection management.
pub mod db;

/// Versioned schema migrations.
pub mod migrations;

/// Custom work categories per user.
pub mod categories;

/// Client and activity registry.
pub mod clients;

/// Work entries.
pub mod entries;

/// Hashed login sessions of the REST backend.
pub mod sessions;

/// User accounts.
pub mod users;
