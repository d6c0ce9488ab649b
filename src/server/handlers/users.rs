use crate::db::users::{User, Users};
use crate::libs::validate::UserPatch;
use crate::server::auth::AuthUser;
use crate::server::error::{ApiError, ApiResult};
use crate::server::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

pub async fn me(State(state): State<AppState>, auth: AuthUser) -> ApiResult<Json<User>> {
    let conn = state.db.lock();
    let user = Users::new(&conn).get(&auth.user_id)?.ok_or(ApiError::NotFound("User"))?;
    Ok(Json(user))
}

pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    body: Result<Json<UserPatch>, JsonRejection>,
) -> ApiResult<Json<User>> {
    auth.ensure_owner(&id)?;
    let Json(patch) = body?;
    let patch = patch.validate()?;

    let conn = state.db.lock();
    let users = Users::new(&conn);
    if let Some(email) = &patch.email {
        if users.email_taken(email, &id)? {
            return Err(ApiError::EmailTaken);
        }
    }
    let user = users.update(&id, patch)?.ok_or(ApiError::NotFound("User"))?;
    Ok(Json(user))
}

pub async fn remove(State(state): State<AppState>, auth: AuthUser, Path(id): Path<String>) -> ApiResult<StatusCode> {
    auth.ensure_owner(&id)?;

    let conn = state.db.lock();
    if !Users::new(&conn).delete(&id)? {
        return Err(ApiError::NotFound("User"));
    }
    tracing::info!(user_id = %id, "account deleted");
    Ok(StatusCode::NO_CONTENT)
}
