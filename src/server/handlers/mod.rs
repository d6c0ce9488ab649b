pub mod auth;
pub mod categories;
pub mod clients;
pub mod entries;
pub mod reports;
pub mod users;

use axum::Json;
use serde_json::{json, Value};

pub const SERVICE_NAME: &str = "heures-backend";

pub async fn health() -> Json<Value> {
    Json(json!({
        "ok": true,
        "service": SERVICE_NAME,
        "database": "SQLite",
    }))
}
