use crate::db::entries::Entries;
use crate::libs::entry::{EntryWithDuration, WorkEntry};
use crate::libs::validate::{EntryPatch, NewWorkEntry};
use crate::server::auth::AuthUser;
use crate::server::error::{ApiError, ApiResult};
use crate::server::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use rusqlite::Connection;

/// The caller's entries, newest first, each with its computed duration.
pub async fn list(State(state): State<AppState>, auth: AuthUser) -> ApiResult<Json<Vec<EntryWithDuration>>> {
    let entries = {
        let conn = state.db.lock();
        Entries::new(&conn).list_by_user(&auth.user_id)?
    };
    Ok(Json(entries.into_iter().map(EntryWithDuration::from).collect()))
}

pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    body: Result<Json<NewWorkEntry>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<EntryWithDuration>)> {
    let Json(mut payload) = body?;
    match payload.user_id.as_deref().map(str::trim) {
        Some(owner) if !owner.is_empty() && owner != auth.user_id => return Err(ApiError::Forbidden),
        _ => payload.user_id = Some(auth.user_id.clone()),
    }
    payload.id = None;
    let entry = payload.validate()?;

    let stored = {
        let conn = state.db.lock();
        Entries::new(&conn).insert(&entry)?
    };
    tracing::debug!(entry_id = %stored.id, "work entry created");
    Ok((StatusCode::CREATED, Json(stored.into())))
}

pub async fn show(State(state): State<AppState>, auth: AuthUser, Path(id): Path<String>) -> ApiResult<Json<EntryWithDuration>> {
    let conn = state.db.lock();
    let entry = owned_entry(&conn, &auth, &id)?;
    Ok(Json(entry.into()))
}

pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    body: Result<Json<EntryPatch>, JsonRejection>,
) -> ApiResult<Json<EntryWithDuration>> {
    let Json(patch) = body?;

    let conn = state.db.lock();
    let mut entry = owned_entry(&conn, &auth, &id)?;
    patch.apply(&mut entry)?;
    let stored = Entries::new(&conn).update(&entry)?;
    Ok(Json(stored.into()))
}

pub async fn remove(State(state): State<AppState>, auth: AuthUser, Path(id): Path<String>) -> ApiResult<StatusCode> {
    let conn = state.db.lock();
    owned_entry(&conn, &auth, &id)?;
    Entries::new(&conn).delete(&id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Loads an entry, answering 404 when it does not exist and 403 when it
/// belongs to another user.
fn owned_entry(conn: &Connection, auth: &AuthUser, id: &str) -> ApiResult<WorkEntry> {
    let entry = Entries::new(conn).get(id)?.ok_or(ApiError::NotFound("Work entry"))?;
    auth.ensure_owner(&entry.user_id)?;
    Ok(entry)
}
