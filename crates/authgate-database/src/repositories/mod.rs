//! Repository implementations and the credential store contract.

pub mod user;

use async_trait::async_trait;
use uuid::Uuid;

use authgate_core::result::AppResult;
use authgate_entity::user::{NewUser, User};

/// The durable record-keeper for identities.
///
/// Defined as a trait so that the flows can be exercised against an
/// in-memory double in tests and so secret-free unit tests never need a
/// live database.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Insert a new identity keyed by its id.
    ///
    /// Fails with a conflict error when the email is already registered
    /// and a database error when the backing connection cannot execute
    /// the write.
    async fn register(&self, new_user: &NewUser) -> AppResult<User>;

    /// Look up an identity by email. `Ok(None)` means no such identity;
    /// connection failures surface as database errors.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Look up an identity by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;
}
