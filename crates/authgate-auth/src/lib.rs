//! # authgate-auth
//!
//! Session token issuance/verification and password hashing for the
//! Authgate gateway.
//!
//! ## Modules
//!
//! - `jwt` — signed, time-limited session token creation and validation
//! - `password` — Argon2id password hashing and verification

pub mod jwt;
pub mod password;

pub use jwt::{Claims, JwtDecoder, JwtEncoder, TokenError};
pub use password::PasswordHasher;
