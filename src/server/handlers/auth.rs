use crate::db::sessions::Sessions;
use crate::db::users::{User, Users};
use crate::libs::auth::verify_password;
use crate::libs::validate::SignupRequest;
use crate::server::auth::AuthUser;
use crate::server::error::{ApiError, ApiResult};
use crate::server::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Token returned by sign-up and login, with the account it belongs to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

pub async fn signup(
    State(state): State<AppState>,
    body: Result<Json<SignupRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<AuthResponse>)> {
    let Json(request) = body?;
    let signup = request.validate()?;

    let conn = state.db.lock();
    let user = Users::new(&conn).create(&signup)?.ok_or(ApiError::EmailTaken)?;
    let token = Sessions::new(&conn).create(&user.id, state.settings.session_ttl_hours)?;
    tracing::info!(user_id = %user.id, "account created");

    Ok((StatusCode::CREATED, Json(AuthResponse { token, user })))
}

pub async fn login(State(state): State<AppState>, body: Result<Json<LoginRequest>, JsonRejection>) -> ApiResult<Json<AuthResponse>> {
    let Json(request) = body?;

    let conn = state.db.lock();
    let users = Users::new(&conn);
    let user = users.find_by_email(&request.email)?.ok_or(ApiError::InvalidCredentials)?;
    let stored = users.password_hash(&user.id)?.ok_or(ApiError::InvalidCredentials)?;
    if !verify_password(&request.password, &stored) {
        tracing::warn!(user_id = %user.id, "rejected login");
        return Err(ApiError::InvalidCredentials);
    }

    let sessions = Sessions::new(&conn);
    sessions.purge_expired()?;
    let token = sessions.create(&user.id, state.settings.session_ttl_hours)?;

    Ok(Json(AuthResponse { token, user }))
}

pub async fn logout(State(state): State<AppState>, auth: AuthUser) -> ApiResult<StatusCode> {
    let conn = state.db.lock();
    Sessions::new(&conn).revoke(&auth.token)?;
    Ok(StatusCode::NO_CONTENT)
}
