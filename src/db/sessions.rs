use crate::libs::auth::{generate_token, hash_token};
use anyhow::Result;
use chrono::{Duration, Utc};
use rusqlite::{params, Connection, OptionalExtension};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const INSERT_SESSION: &str = "INSERT INTO sessions (token_hash, user_id, expires_at) VALUES (?1, ?2, ?3)";
const SELECT_ACTIVE: &str = "SELECT user_id FROM sessions WHERE token_hash = ?1 AND expires_at > ?2";
const DELETE_SESSION: &str = "DELETE FROM sessions WHERE token_hash = ?1";
const DELETE_EXPIRED: &str = "DELETE FROM sessions WHERE expires_at <= ?1";

/// Server-side login sessions. Only the SHA-256 digest of a token is stored;
/// the token itself is returned once, at creation.
pub struct Sessions<'a> {
    conn: &'a Connection,
}

impl<'a> Sessions<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Opens a session for `user_id` valid for `ttl_hours` and returns its token.
    pub fn create(&self, user_id: &str, ttl_hours: i64) -> Result<String> {
        let token = generate_token();
        let expires_at = (Utc::now() + Duration::hours(ttl_hours)).format(TIMESTAMP_FORMAT).to_string();
        self.conn.execute(INSERT_SESSION, params![hash_token(&token), user_id, expires_at])?;
        Ok(token)
    }

    /// User id owning `token`, if the session exists and has not expired.
    pub fn resolve(&self, token: &str) -> Result<Option<String>> {
        Ok(self
            .conn
            .query_row(SELECT_ACTIVE, params![hash_token(token), now()], |row| row.get(0))
            .optional()?)
    }

    pub fn revoke(&self, token: &str) -> Result<bool> {
        Ok(self.conn.execute(DELETE_SESSION, params![hash_token(token)])? > 0)
    }

    pub fn purge_expired(&self) -> Result<usize> {
        Ok(self.conn.execute(DELETE_EXPIRED, params![now()])?)
    }
}

fn now() -> String {
    Utc::now().format(TIMESTAMP_FORMAT).to_string()
}
