//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A registered identity in the Authgate system.
///
/// Created once at registration, read at login, never mutated or deleted
/// by the gateway.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique identifier, generated at registration time.
    pub id: Uuid,
    /// Optional given name, empty by default.
    pub first_name: String,
    /// Optional family name, empty by default.
    pub last_name: String,
    /// Email address, unique across all identities; the login key.
    pub email: String,
    /// Argon2 hash of the password. The plaintext is never stored and the
    /// hash is never serialized into responses.
    #[serde(skip_serializing)]
    #[sqlx(rename = "password")]
    pub password_hash: String,
    /// When the identity was created.
    pub created_at: DateTime<Utc>,
}

/// Data required to insert a new identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    /// Identifier assigned by the registration flow.
    pub id: Uuid,
    /// Email address.
    pub email: String,
    /// Pre-hashed password.
    pub password_hash: String,
}
