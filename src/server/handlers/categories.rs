use crate::db::categories::Categories;
use crate::server::auth::AuthUser;
use crate::server::error::{ApiError, ApiResult};
use crate::server::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct NewCategory {
    #[serde(default)]
    pub name: String,
}

/// Default categories followed by the caller's own.
pub async fn list(State(state): State<AppState>, auth: AuthUser) -> ApiResult<Json<Vec<String>>> {
    let conn = state.db.lock();
    Ok(Json(Categories::new(&conn).list(&auth.user_id)?))
}

/// Adds a category and returns the full list. Answers 201 when the category
/// is new and 200 when it already existed.
pub async fn add(
    State(state): State<AppState>,
    auth: AuthUser,
    body: Result<Json<NewCategory>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Vec<String>>)> {
    let Json(request) = body?;

    let conn = state.db.lock();
    let categories = Categories::new(&conn);
    let created = categories.add(&auth.user_id, &request.name)?;
    let status = if created { StatusCode::CREATED } else { StatusCode::OK };
    Ok((status, Json(categories.list(&auth.user_id)?)))
}

pub async fn remove(State(state): State<AppState>, auth: AuthUser, Path(name): Path<String>) -> ApiResult<Json<Vec<String>>> {
    let conn = state.db.lock();
    let categories = Categories::new(&conn);
    if !categories.remove(&auth.user_id, &name)? {
        return Err(ApiError::NotFound("Category"));
    }
    Ok(Json(categories.list(&auth.user_id)?))
}
