//! The identity operations contract shared by the local and remote providers.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use authgate_core::result::AppResult;
use authgate_entity::Credentials;

/// Result of a successful registration or login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    /// The authenticated identity's id.
    pub user_id: Uuid,
    /// Signed session token handed back to the client.
    pub token: String,
    /// Absolute expiry of the token.
    pub expires_at: DateTime<Utc>,
}

/// Identity operations exposed to the HTTP boundary.
///
/// Implemented by [`crate::AccountService`] against the local credential
/// store and by [`crate::RemoteIdentityClient`] against a remote identity
/// service.
#[async_trait]
pub trait IdentityService: Send + Sync {
    /// Register a new identity and mint a session token for it.
    async fn register(&self, credentials: Credentials) -> AppResult<AuthSession>;

    /// Authenticate an existing identity and mint a session token.
    async fn login(&self, credentials: Credentials) -> AppResult<AuthSession>;
}
