//! Auth handlers — register and login.

use std::future::Future;
use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::OffsetDateTime;
use validator::Validate;

use authgate_core::config::AuthConfig;
use authgate_core::error::AppError;
use authgate_core::result::AppResult;
use authgate_service::AuthSession;

use crate::dto::request::{LoginRequest, RegisterRequest};
use crate::dto::response::{ApiResponse, AuthResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// POST /register
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let session = with_flow_budget(state.flow_budget(), state.identity.register(req.into())).await?;

    let jar = jar.add(session_cookie(&state.config.auth, &session));
    Ok((
        StatusCode::CREATED,
        jar,
        Json(ApiResponse::ok(AuthResponse::from(session))),
    ))
}

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let session = with_flow_budget(state.flow_budget(), state.identity.login(req.into())).await?;

    let jar = jar.add(session_cookie(&state.config.auth, &session));
    Ok((
        StatusCode::OK,
        jar,
        Json(ApiResponse::ok(AuthResponse::from(session))),
    ))
}

/// Bounds a flow to its wall-clock budget. On elapse the flow is aborted
/// and a timeout-class failure returned; any store operation already
/// issued is not compensated.
async fn with_flow_budget<T>(
    budget: Duration,
    flow: impl Future<Output = AppResult<T>>,
) -> AppResult<T> {
    tokio::time::timeout(budget, flow)
        .await
        .map_err(|_| AppError::timeout("Request did not complete within its time budget"))?
}

/// Builds the HTTPOnly session cookie expiring with the token.
fn session_cookie(config: &AuthConfig, session: &AuthSession) -> Cookie<'static> {
    let expires = OffsetDateTime::from_unix_timestamp(session.expires_at.timestamp()).ok();

    Cookie::build((config.cookie_name.clone(), session.token.clone()))
        .http_only(true)
        .path("/")
        .same_site(SameSite::Lax)
        .expires(expires)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use authgate_core::error::ErrorKind;
    use chrono::Utc;
    use uuid::Uuid;

    #[tokio::test(start_paused = true)]
    async fn test_flow_budget_elapse_is_a_timeout() {
        let err = with_flow_budget(Duration::from_secs(5), async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(())
        })
        .await
        .expect_err("should time out");

        assert_eq!(err.kind, ErrorKind::Timeout);
    }

    #[tokio::test]
    async fn test_flow_budget_passes_results_through() {
        let ok = with_flow_budget(Duration::from_secs(5), async { Ok(42) })
            .await
            .expect("ok");
        assert_eq!(ok, 42);

        let failed: AppResult<()> = with_flow_budget(Duration::from_secs(5), async {
            Err(AppError::unauthorized("wrong email or password"))
        })
        .await;
        assert_eq!(failed.expect_err("err").kind, ErrorKind::Unauthorized);
    }

    #[test]
    fn test_session_cookie_contract() {
        let config = AuthConfig::default();
        let session = AuthSession {
            user_id: Uuid::new_v4(),
            token: "tok".to_string(),
            expires_at: Utc::now() + chrono::Duration::hours(3),
        };

        let cookie = session_cookie(&config, &session);
        assert_eq!(cookie.name(), "jwt");
        assert_eq!(cookie.value(), "tok");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.path(), Some("/"));
        assert!(cookie.expires_datetime().is_some());
    }
}
