use crate::libs::client::{ClientKind, ClientRecord};
use crate::libs::messages::Message;
use crate::msg_error_anyhow;
use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension, Row};

const CLIENT_COLUMNS: &str = "id, user_id, name, kind, default_rate, color, address, city, postal_code, siret, description";
const INSERT_CLIENT: &str = "INSERT INTO clients (id, user_id, name, kind, default_rate, color, address, city, postal_code, siret, description)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)";
const UPDATE_CLIENT: &str = "UPDATE clients SET name = ?2, kind = ?3, default_rate = ?4, color = ?5, address = ?6, city = ?7,
    postal_code = ?8, siret = ?9, description = ?10 WHERE id = ?1";
const DELETE_CLIENT: &str = "DELETE FROM clients WHERE id = ?1";

/// Client and activity registry. Deleting a record leaves the work entries
/// that reference it untouched; they keep their denormalized name.
pub struct Clients<'a> {
    conn: &'a Connection,
}

impl<'a> Clients<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn insert(&self, client: &ClientRecord) -> Result<()> {
        self.conn.execute(
            INSERT_CLIENT,
            params![
                client.id,
                client.user_id,
                client.name,
                client.kind.to_string(),
                client.default_rate,
                client.color,
                client.address,
                client.city,
                client.postal_code,
                client.siret,
                client.description,
            ],
        )?;
        Ok(())
    }

    pub fn get(&self, id: &str) -> Result<Option<ClientRecord>> {
        let sql = format!("SELECT {} FROM clients WHERE id = ?1", CLIENT_COLUMNS);
        Ok(self.conn.query_row(&sql, params![id], client_from_row).optional()?)
    }

    /// Records of `user_id`, clients before activities, then by name.
    pub fn list_by_user(&self, user_id: &str) -> Result<Vec<ClientRecord>> {
        let sql = format!("SELECT {} FROM clients WHERE user_id = ?1 ORDER BY kind, name COLLATE NOCASE", CLIENT_COLUMNS);
        let mut stmt = self.conn.prepare(&sql)?;
        let client_iter = stmt.query_map(params![user_id], client_from_row)?;

        let mut clients = Vec::new();
        for client in client_iter {
            clients.push(client?);
        }
        Ok(clients)
    }

    pub fn update(&self, client: &ClientRecord) -> Result<()> {
        let affected = self.conn.execute(
            UPDATE_CLIENT,
            params![
                client.id,
                client.name,
                client.kind.to_string(),
                client.default_rate,
                client.color,
                client.address,
                client.city,
                client.postal_code,
                client.siret,
                client.description,
            ],
        )?;
        if affected == 0 {
            return Err(msg_error_anyhow!(Message::ClientNotFound(client.id.clone())));
        }
        Ok(())
    }

    pub fn delete(&self, id: &str) -> Result<bool> {
        Ok(self.conn.execute(DELETE_CLIENT, params![id])? > 0)
    }
}

fn client_from_row(row: &Row) -> rusqlite::Result<ClientRecord> {
    let kind: String = row.get(3)?;
    Ok(ClientRecord {
        id: row.get(0)?,
        user_id: row.get(1)?,
        name: row.get(2)?,
        kind: kind.parse().unwrap_or(ClientKind::Client),
        default_rate: row.get(4)?,
        color: row.get(5)?,
        address: row.get(6)?,
        city: row.get(7)?,
        postal_code: row.get(8)?,
        siret: row.get(9)?,
        description: row.get(10)?,
    })
}
