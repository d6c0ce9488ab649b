use crate::libs::auth::hash_password;
use crate::libs::validate::{UserPatch, ValidSignup};
use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const USER_COLUMNS: &str = "id, first_name, last_name, email, phone, avatar_url, created_at, updated_at";
const INSERT_USER: &str = "INSERT INTO users (id, first_name, last_name, email, phone, password_hash) VALUES (?1, ?2, ?3, ?4, ?5, ?6)";
const UPDATE_USER: &str = "UPDATE users SET first_name = ?2, last_name = ?3, email = ?4, phone = ?5, avatar_url = ?6,
    updated_at = CURRENT_TIMESTAMP WHERE id = ?1";
const SELECT_PASSWORD_HASH: &str = "SELECT password_hash FROM users WHERE id = ?1";
const COUNT_EMAIL: &str = "SELECT COUNT(*) FROM users WHERE email = ?1 AND id != ?2";

// Rows owned by a user, removed together with the account.
const DELETE_USER_DATA: [&str; 5] = [
    "DELETE FROM work_entries WHERE user_id = ?1",
    "DELETE FROM clients WHERE user_id = ?1",
    "DELETE FROM categories WHERE user_id = ?1",
    "DELETE FROM sessions WHERE user_id = ?1",
    "DELETE FROM users WHERE id = ?1",
];

pub const USER_ID_PREFIX: &str = "u_";

/// Public view of an account. The password hash never leaves the repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

pub struct Users<'a> {
    conn: &'a Connection,
}

impl<'a> Users<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Creates an account. Returns `None` when the email is already taken.
    pub fn create(&self, signup: &ValidSignup) -> Result<Option<User>> {
        if self.email_taken(&signup.email, "")? {
            return Ok(None);
        }
        let id = format!("{}{}", USER_ID_PREFIX, Uuid::new_v4().simple());
        let password_hash = hash_password(&signup.password)?;
        self.conn.execute(
            INSERT_USER,
            params![id, signup.first_name, signup.last_name, signup.email, signup.phone, password_hash],
        )?;
        self.get(&id)
    }

    pub fn get(&self, id: &str) -> Result<Option<User>> {
        let sql = format!("SELECT {} FROM users WHERE id = ?1", USER_COLUMNS);
        Ok(self.conn.query_row(&sql, params![id], user_from_row).optional()?)
    }

    pub fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let sql = format!("SELECT {} FROM users WHERE email = ?1", USER_COLUMNS);
        Ok(self.conn.query_row(&sql, params![email.trim().to_lowercase()], user_from_row).optional()?)
    }

    pub fn password_hash(&self, id: &str) -> Result<Option<String>> {
        Ok(self.conn.query_row(SELECT_PASSWORD_HASH, params![id], |row| row.get(0)).optional()?)
    }

    /// Whether `email` belongs to an account other than `except_id`.
    pub fn email_taken(&self, email: &str, except_id: &str) -> Result<bool> {
        let count: i64 = self.conn.query_row(COUNT_EMAIL, params![email, except_id], |row| row.get(0))?;
        Ok(count > 0)
    }

    /// Applies a validated profile patch. `None` when the user does not exist.
    pub fn update(&self, id: &str, patch: UserPatch) -> Result<Option<User>> {
        let Some(mut user) = self.get(id)? else {
            return Ok(None);
        };
        if let Some(v) = patch.first_name {
            user.first_name = v;
        }
        if let Some(v) = patch.last_name {
            user.last_name = v;
        }
        if let Some(v) = patch.email {
            user.email = v;
        }
        if let Some(v) = patch.phone {
            user.phone = Some(v).filter(|p| !p.is_empty());
        }
        if let Some(v) = patch.avatar_url {
            user.avatar_url = Some(v).filter(|a| !a.is_empty());
        }
        self.conn.execute(
            UPDATE_USER,
            params![user.id, user.first_name, user.last_name, user.email, user.phone, user.avatar_url],
        )?;
        self.get(id)
    }

    /// Deletes the account with its entries, clients, categories and sessions.
    pub fn delete(&self, id: &str) -> Result<bool> {
        let tx = self.conn.unchecked_transaction()?;
        let mut deleted = 0;
        for sql in DELETE_USER_DATA {
            deleted = tx.execute(sql, params![id])?;
        }
        tx.commit()?;
        Ok(deleted > 0)
    }
}

fn user_from_row(row: &Row) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        first_name: row.get(1)?,
        last_name: row.get(2)?,
        email: row.get(3)?,
        phone: row.get(4)?,
        avatar_url: row.get(5)?,
        created_at: row.get(6)?,
        updated_at: row.get(7)?,
    })
}
