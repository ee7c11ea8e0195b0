//! Application state shared across all handlers and middleware.

use std::sync::Arc;
use std::time::Duration;

use sqlx::PgPool;

use authgate_auth::jwt::JwtDecoder;
use authgate_core::config::AppConfig;
use authgate_database::UserRepository;
use authgate_service::IdentityService;

/// Application state passed to every Axum handler via `State<AppState>`.
///
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// PostgreSQL connection pool.
    pub db_pool: PgPool,
    /// Credential store, used directly by the profile endpoint.
    pub user_repo: Arc<UserRepository>,
    /// Session token verifier.
    pub jwt_decoder: Arc<JwtDecoder>,
    /// The configured identity provider (local flows or remote client).
    pub identity: Arc<dyn IdentityService>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("provider", &self.config.identity.provider)
            .finish()
    }
}

impl AppState {
    /// The wall-clock budget for one register/login flow.
    pub fn flow_budget(&self) -> Duration {
        Duration::from_secs(self.config.identity.flow_timeout_seconds)
    }
}
