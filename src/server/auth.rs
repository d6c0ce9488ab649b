use super::error::ApiError;
use super::AppState;
use crate::db::sessions::Sessions;
use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

/// Caller identified by a valid `Authorization: Bearer <token>` header.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: String,
    pub token: String,
}

impl AuthUser {
    /// Rejects access to resources owned by someone else.
    pub fn ensure_owner(&self, owner_id: &str) -> Result<(), ApiError> {
        if self.user_id == owner_id {
            Ok(())
        } else {
            Err(ApiError::Forbidden)
        }
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or(ApiError::Unauthorized)?
            .to_string();

        let user_id = {
            let conn = state.db.lock();
            Sessions::new(&conn).resolve(&token)?
        };

        match user_id {
            Some(user_id) => Ok(AuthUser { user_id, token }),
            None => Err(ApiError::Unauthorized),
        }
    }
}
