use crate::libs::categories::{self, CategoryError};
use anyhow::Result;
use rusqlite::{params, Connection};

const INSERT_CATEGORY: &str = "INSERT OR IGNORE INTO categories (user_id, name) VALUES (?1, ?2)";
const DELETE_CATEGORY: &str = "DELETE FROM categories WHERE user_id = ?1 AND name = ?2";
const SELECT_CUSTOM: &str = "SELECT name FROM categories WHERE user_id = ?1 ORDER BY created_at, name";

/// Per-user custom categories. The default set is never stored.
pub struct Categories<'a> {
    conn: &'a Connection,
}

impl<'a> Categories<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn list_custom(&self, user_id: &str) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare(SELECT_CUSTOM)?;
        let names = stmt
            .query_map(params![user_id], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(names)
    }

    /// Default categories followed by the user's own.
    pub fn list(&self, user_id: &str) -> Result<Vec<String>> {
        Ok(categories::merge(&self.list_custom(user_id)?))
    }

    /// Adds a custom category. Returns `false` when it already exists,
    /// as a default or a custom one.
    pub fn add(&self, user_id: &str, name: &str) -> Result<bool, CategoryError> {
        let name = categories::normalize(name)?;
        if categories::is_default(&name) {
            return Ok(false);
        }
        self.conn
            .execute(INSERT_CATEGORY, params![user_id, name])
            .map(|inserted| inserted > 0)
            .map_err(|e| CategoryError::Storage(e.to_string()))
    }

    /// Removes a custom category. Default categories are rejected; `false`
    /// means the name was not found.
    pub fn remove(&self, user_id: &str, name: &str) -> Result<bool, CategoryError> {
        categories::check_removable(name)?;
        self.conn
            .execute(DELETE_CATEGORY, params![user_id, name.trim()])
            .map(|deleted| deleted > 0)
            .map_err(|e| CategoryError::Storage(e.to_string()))
    }
}
