//! Registration and login flows against the local credential store.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};
use uuid::Uuid;

use authgate_auth::jwt::JwtEncoder;
use authgate_auth::password::PasswordHasher;
use authgate_core::error::AppError;
use authgate_core::result::AppResult;
use authgate_database::CredentialStore;
use authgate_entity::user::{NewUser, User};
use authgate_entity::Credentials;

use crate::identity::{AuthSession, IdentityService};

/// The one message returned for any credential failure on login, so that
/// an unknown email is indistinguishable from a wrong password.
const BAD_CREDENTIALS: &str = "wrong email or password";

/// Orchestrates hashing, store access, and token issuance for the local
/// provider. All collaborators are injected, so the flows can be tested
/// against an in-memory store double.
#[derive(Clone)]
pub struct AccountService {
    /// Durable identity records.
    store: Arc<dyn CredentialStore>,
    /// Password hashing.
    hasher: Arc<PasswordHasher>,
    /// Session token issuance.
    encoder: Arc<JwtEncoder>,
}

impl std::fmt::Debug for AccountService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountService").finish()
    }
}

impl AccountService {
    /// Creates a new account service.
    pub fn new(
        store: Arc<dyn CredentialStore>,
        hasher: Arc<PasswordHasher>,
        encoder: Arc<JwtEncoder>,
    ) -> Self {
        Self {
            store,
            hasher,
            encoder,
        }
    }

    fn validate(credentials: &Credentials) -> AppResult<()> {
        if credentials.email.trim().is_empty() {
            return Err(AppError::validation("email is required"));
        }
        if credentials.password.is_empty() {
            return Err(AppError::validation("password is required"));
        }
        Ok(())
    }
}

#[async_trait]
impl IdentityService for AccountService {
    /// Registration flow: validate, generate an id, hash the password,
    /// issue the token, then write the record.
    ///
    /// The durable write comes last: a failure anywhere earlier leaves no
    /// row behind, and a failed write only wastes an unreturned token.
    async fn register(&self, credentials: Credentials) -> AppResult<AuthSession> {
        Self::validate(&credentials)?;

        let user_id = Uuid::new_v4();
        let password_hash = self.hasher.hash(&credentials.password)?;
        let issued = self.encoder.issue(user_id)?;

        let user = self
            .store
            .register(&NewUser {
                id: user_id,
                email: credentials.email.clone(),
                password_hash,
            })
            .await?;

        info!(user_id = %user.id, "Registered new identity");

        Ok(AuthSession {
            user_id: user.id,
            token: issued.token,
            expires_at: issued.expires_at,
        })
    }

    /// Login flow: validate, look up by email, verify the hash, issue a
    /// token. Unknown email and wrong password share one failure.
    async fn login(&self, credentials: Credentials) -> AppResult<AuthSession> {
        Self::validate(&credentials)?;

        let user = self
            .store
            .find_by_email(&credentials.email)
            .await?
            .ok_or_else(|| AppError::unauthorized(BAD_CREDENTIALS))?;

        let password_valid = self
            .hasher
            .verify(&credentials.password, &user.password_hash)?;

        if !password_valid {
            warn!(user_id = %user.id, "Login attempt with wrong password");
            return Err(AppError::unauthorized(BAD_CREDENTIALS));
        }

        let issued = self.encoder.issue(user.id)?;

        info!(user_id = %user.id, "Login succeeded");

        Ok(AuthSession {
            user_id: user.id,
            token: issued.token,
            expires_at: issued.expires_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use authgate_core::config::AuthConfig;
    use authgate_core::error::ErrorKind;
    use chrono::Utc;
    use std::sync::Mutex;

    /// In-memory credential store with the same uniqueness contract as
    /// the PostgreSQL repository: emails match exactly, case-sensitively.
    #[derive(Default)]
    struct MemoryStore {
        users: Mutex<Vec<User>>,
    }

    #[async_trait]
    impl CredentialStore for MemoryStore {
        async fn register(&self, new_user: &NewUser) -> AppResult<User> {
            let mut users = self.users.lock().expect("lock");
            if users.iter().any(|u| u.email == new_user.email) {
                return Err(AppError::conflict("Email already in use"));
            }
            let user = User {
                id: new_user.id,
                first_name: String::new(),
                last_name: String::new(),
                email: new_user.email.clone(),
                password_hash: new_user.password_hash.clone(),
                created_at: Utc::now(),
            };
            users.push(user.clone());
            Ok(user)
        }

        async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
            let users = self.users.lock().expect("lock");
            Ok(users.iter().find(|u| u.email == email).cloned())
        }

        async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
            let users = self.users.lock().expect("lock");
            Ok(users.iter().find(|u| u.id == id).cloned())
        }
    }

    fn service_with_store(store: Arc<MemoryStore>) -> AccountService {
        let config = AuthConfig {
            jwt_secret: "flow-test-secret".to_string(),
            ..AuthConfig::default()
        };
        AccountService::new(
            store,
            Arc::new(PasswordHasher::new()),
            Arc::new(JwtEncoder::new(&config)),
        )
    }

    fn creds(email: &str, password: &str) -> Credentials {
        Credentials::new(email, password)
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let store = Arc::new(MemoryStore::default());
        let service = service_with_store(Arc::clone(&store));

        let registered = service
            .register(creds("a@x.com", "p1"))
            .await
            .expect("register");

        let session = service.login(creds("a@x.com", "p1")).await.expect("login");
        assert_eq!(session.user_id, registered.user_id);
        assert!(session.expires_at > Utc::now());
    }

    #[tokio::test]
    async fn test_token_subject_matches_stored_identity() {
        let store = Arc::new(MemoryStore::default());
        let service = service_with_store(Arc::clone(&store));

        let session = service
            .register(creds("a@x.com", "p1"))
            .await
            .expect("register");

        let config = AuthConfig {
            jwt_secret: "flow-test-secret".to_string(),
            ..AuthConfig::default()
        };
        let decoder = authgate_auth::jwt::JwtDecoder::new(&config);
        let claims = decoder.verify(&session.token).expect("verify");

        let stored = store
            .find_by_email("a@x.com")
            .await
            .expect("lookup")
            .expect("present");
        assert_eq!(claims.sub, stored.id);
    }

    #[tokio::test]
    async fn test_duplicate_email_is_a_conflict() {
        let store = Arc::new(MemoryStore::default());
        let service = service_with_store(Arc::clone(&store));

        service
            .register(creds("a@x.com", "p1"))
            .await
            .expect("first register");
        let err = service
            .register(creds("a@x.com", "p2"))
            .await
            .expect_err("second register");

        assert_eq!(err.kind, ErrorKind::Conflict);
        assert_eq!(store.users.lock().expect("lock").len(), 1);
    }

    #[tokio::test]
    async fn test_email_matching_is_case_sensitive() {
        let store = Arc::new(MemoryStore::default());
        let service = service_with_store(Arc::clone(&store));

        service
            .register(creds("a@x.com", "p1"))
            .await
            .expect("register");

        // A case variant is a different login key, not the same identity.
        let err = service
            .login(creds("A@x.com", "p1"))
            .await
            .expect_err("case variant is unknown");
        assert_eq!(err.kind, ErrorKind::Unauthorized);

        service
            .register(creds("A@x.com", "p2"))
            .await
            .expect("case variant registers as a distinct identity");
        assert_eq!(store.users.lock().expect("lock").len(), 2);
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_email_are_indistinguishable() {
        let store = Arc::new(MemoryStore::default());
        let service = service_with_store(store);

        service
            .register(creds("a@x.com", "p1"))
            .await
            .expect("register");

        let wrong_password = service
            .login(creds("a@x.com", "wrong"))
            .await
            .expect_err("wrong password");
        let unknown_email = service
            .login(creds("nobody@x.com", "p1"))
            .await
            .expect_err("unknown email");

        assert_eq!(wrong_password.kind, ErrorKind::Unauthorized);
        assert_eq!(unknown_email.kind, ErrorKind::Unauthorized);
        assert_eq!(wrong_password.message, unknown_email.message);
    }

    #[tokio::test]
    async fn test_missing_fields_are_validation_errors() {
        let store = Arc::new(MemoryStore::default());
        let service = service_with_store(store);

        let no_email = service
            .register(creds("", "p1"))
            .await
            .expect_err("no email");
        let no_password = service
            .login(creds("a@x.com", ""))
            .await
            .expect_err("no password");

        assert_eq!(no_email.kind, ErrorKind::Validation);
        assert_eq!(no_password.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_stored_password_is_hashed() {
        let store = Arc::new(MemoryStore::default());
        let service = service_with_store(Arc::clone(&store));

        service
            .register(creds("a@x.com", "p1"))
            .await
            .expect("register");

        let stored = store
            .find_by_email("a@x.com")
            .await
            .expect("lookup")
            .expect("present");
        assert_ne!(stored.password_hash, "p1");
        assert!(stored.password_hash.starts_with("$argon2id$"));
    }
}
