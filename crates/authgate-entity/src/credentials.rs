//! Transient email/password pair accepted by the flows.

use serde::{Deserialize, Serialize};

/// The only input the register and login flows accept. Never persisted.
#[derive(Clone, Serialize, Deserialize)]
pub struct Credentials {
    /// Email address used as the login key.
    pub email: String,
    /// Plaintext password, hashed or verified immediately.
    pub password: String,
}

impl Credentials {
    /// Creates a new credential pair.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

// The plaintext must not leak into logs through debug formatting.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_masks_password() {
        let creds = Credentials::new("a@x.com", "hunter2");
        let rendered = format!("{creds:?}");
        assert!(rendered.contains("a@x.com"));
        assert!(!rendered.contains("hunter2"));
    }
}
