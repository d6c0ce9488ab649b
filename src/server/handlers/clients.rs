use crate::db::clients::Clients;
use crate::libs::client::ClientRecord;
use crate::libs::validate::ClientPayload;
use crate::server::auth::AuthUser;
use crate::server::error::{ApiError, ApiResult};
use crate::server::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use rusqlite::Connection;

pub async fn list(State(state): State<AppState>, auth: AuthUser) -> ApiResult<Json<Vec<ClientRecord>>> {
    let conn = state.db.lock();
    Ok(Json(Clients::new(&conn).list_by_user(&auth.user_id)?))
}

pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    body: Result<Json<ClientPayload>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ClientRecord>)> {
    let Json(payload) = body?;
    let record = payload.into_record(&auth.user_id)?;

    let conn = state.db.lock();
    Clients::new(&conn).insert(&record)?;
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    body: Result<Json<ClientPayload>, JsonRejection>,
) -> ApiResult<Json<ClientRecord>> {
    let Json(payload) = body?;

    let conn = state.db.lock();
    let mut record = owned_client(&conn, &auth, &id)?;
    payload.apply(&mut record)?;
    Clients::new(&conn).update(&record)?;
    Ok(Json(record))
}

pub async fn remove(State(state): State<AppState>, auth: AuthUser, Path(id): Path<String>) -> ApiResult<StatusCode> {
    let conn = state.db.lock();
    owned_client(&conn, &auth, &id)?;
    Clients::new(&conn).delete(&id)?;
    Ok(StatusCode::NO_CONTENT)
}

fn owned_client(conn: &Connection, auth: &AuthUser, id: &str) -> ApiResult<ClientRecord> {
    let record = Clients::new(conn).get(id)?.ok_or(ApiError::NotFound("Client"))?;
    auth.ensure_owner(&record.user_id)?;
    Ok(record)
}
