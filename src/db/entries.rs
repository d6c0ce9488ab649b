use crate::libs::entry::{Location, WorkEntry};
use crate::libs::messages::Message;
use crate::msg_error_anyhow;
use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension, Row};

const ENTRY_COLUMNS: &str = "id, user_id, start_date, start_time, end_date, end_time, has_break,
    break_start_hour, break_start_min, break_end_hour, break_end_min, category, hourly_rate,
    client_id, client_name, activity_id, activity_name, location, comment, created_at, updated_at";
const INSERT_ENTRY: &str = "INSERT INTO work_entries (id, user_id, start_date, start_time, end_date, end_time, has_break,
    break_start_hour, break_start_min, break_end_hour, break_end_min, category, hourly_rate,
    client_id, client_name, activity_id, activity_name, location, comment)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19)";
const UPDATE_ENTRY: &str = "UPDATE work_entries SET start_date = ?2, start_time = ?3, end_date = ?4, end_time = ?5,
    has_break = ?6, break_start_hour = ?7, break_start_min = ?8, break_end_hour = ?9, break_end_min = ?10,
    category = ?11, hourly_rate = ?12, client_id = ?13, client_name = ?14, activity_id = ?15,
    activity_name = ?16, location = ?17, comment = ?18, updated_at = CURRENT_TIMESTAMP
    WHERE id = ?1";
const DELETE_ENTRY: &str = "DELETE FROM work_entries WHERE id = ?1";
const DELETE_BY_USER: &str = "DELETE FROM work_entries WHERE user_id = ?1";
const ORDER_NEWEST_FIRST: &str = "ORDER BY start_date DESC, start_time DESC";

/// Work entry repository.
pub struct Entries<'a> {
    conn: &'a Connection,
}

impl<'a> Entries<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Stores a new entry and returns it as persisted (timestamps filled in).
    pub fn insert(&self, entry: &WorkEntry) -> Result<WorkEntry> {
        self.conn.execute(
            INSERT_ENTRY,
            params![
                entry.id,
                entry.user_id,
                entry.start_date,
                entry.start_time,
                entry.end_date,
                entry.end_time,
                entry.has_break,
                entry.break_start_hour,
                entry.break_start_min,
                entry.break_end_hour,
                entry.break_end_min,
                entry.category,
                entry.hourly_rate,
                entry.client_id,
                entry.client_name,
                entry.activity_id,
                entry.activity_name,
                location_json(&entry.location)?,
                entry.comment,
            ],
        )?;
        self.get(&entry.id)?.ok_or_else(|| msg_error_anyhow!(Message::EntryNotFound(entry.id.clone())))
    }

    pub fn get(&self, id: &str) -> Result<Option<WorkEntry>> {
        let sql = format!("SELECT {} FROM work_entries WHERE id = ?1", ENTRY_COLUMNS);
        Ok(self.conn.query_row(&sql, params![id], entry_from_row).optional()?)
    }

    /// Entries of `user_id`, newest first.
    pub fn list_by_user(&self, user_id: &str) -> Result<Vec<WorkEntry>> {
        let sql = format!("SELECT {} FROM work_entries WHERE user_id = ?1 {}", ENTRY_COLUMNS, ORDER_NEWEST_FIRST);
        let mut stmt = self.conn.prepare(&sql)?;
        let entry_iter = stmt.query_map(params![user_id], entry_from_row)?;

        let mut entries = Vec::new();
        for entry in entry_iter {
            entries.push(entry?);
        }
        Ok(entries)
    }

    /// Overwrites a stored entry. Fails when the id is unknown.
    pub fn update(&self, entry: &WorkEntry) -> Result<WorkEntry> {
        let affected = self.conn.execute(
            UPDATE_ENTRY,
            params![
                entry.id,
                entry.start_date,
                entry.start_time,
                entry.end_date,
                entry.end_time,
                entry.has_break,
                entry.break_start_hour,
                entry.break_start_min,
                entry.break_end_hour,
                entry.break_end_min,
                entry.category,
                entry.hourly_rate,
                entry.client_id,
                entry.client_name,
                entry.activity_id,
                entry.activity_name,
                location_json(&entry.location)?,
                entry.comment,
            ],
        )?;
        if affected == 0 {
            return Err(msg_error_anyhow!(Message::EntryNotFound(entry.id.clone())));
        }
        self.get(&entry.id)?.ok_or_else(|| msg_error_anyhow!(Message::EntryNotFound(entry.id.clone())))
    }

    /// Returns `false` when nothing was deleted.
    pub fn delete(&self, id: &str) -> Result<bool> {
        Ok(self.conn.execute(DELETE_ENTRY, params![id])? > 0)
    }

    pub fn delete_by_user(&self, user_id: &str) -> Result<usize> {
        Ok(self.conn.execute(DELETE_BY_USER, params![user_id])?)
    }
}

fn location_json(location: &Option<Location>) -> Result<Option<String>> {
    Ok(match location {
        Some(location) => Some(serde_json::to_string(location)?),
        None => None,
    })
}

fn entry_from_row(row: &Row) -> rusqlite::Result<WorkEntry> {
    let location: Option<String> = row.get(17)?;
    Ok(WorkEntry {
        id: row.get(0)?,
        user_id: row.get(1)?,
        start_date: row.get(2)?,
        start_time: row.get(3)?,
        end_date: row.get(4)?,
        end_time: row.get(5)?,
        has_break: row.get(6)?,
        break_start_hour: row.get(7)?,
        break_start_min: row.get(8)?,
        break_end_hour: row.get(9)?,
        break_end_min: row.get(10)?,
        category: row.get(11)?,
        hourly_rate: row.get(12)?,
        client_id: row.get(13)?,
        client_name: row.get(14)?,
        activity_id: row.get(15)?,
        activity_name: row.get(16)?,
        location: location.and_then(|json| serde_json::from_str(&json).ok()),
        comment: row.get(18)?,
        created_at: row.get(19)?,
        updated_at: row.get(20)?,
    })
}
