//! `AuthUser` extractor — verifies the session token and injects the subject.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::CookieJar;
use uuid::Uuid;

use authgate_core::error::AppError;

use crate::error::ApiError;
use crate::state::AppState;

/// The authenticated identity behind the current request.
///
/// The token is taken from the `Authorization: Bearer` header when
/// present, otherwise from the session cookie set at registration/login.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    /// Subject id embedded in the verified token.
    pub user_id: Uuid,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let bearer = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer ").map(str::to_string));

        let token = match bearer {
            Some(token) => token,
            None => CookieJar::from_headers(&parts.headers)
                .get(&state.config.auth.cookie_name)
                .map(|cookie| cookie.value().to_string())
                .ok_or_else(|| AppError::unauthorized("Missing session token"))?,
        };

        let claims = state.jwt_decoder.verify(&token)?;

        Ok(AuthUser {
            user_id: claims.user_id(),
        })
    }
}
