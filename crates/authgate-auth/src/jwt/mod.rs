//! Session token encoding, decoding, and claims.

pub mod claims;
pub mod decoder;
pub mod encoder;

use thiserror::Error;

use authgate_core::error::AppError;

pub use claims::Claims;
pub use decoder::JwtDecoder;
pub use encoder::{IssuedToken, JwtEncoder};

/// Errors surfaced by the token issuer and verifier.
///
/// A token moves one way: issued, valid until its expiry, then invalid
/// forever. There is no refresh and no revocation list, so the verifier
/// only ever distinguishes "unusable token" from "token without a
/// subject".
#[derive(Debug, Error)]
pub enum TokenError {
    /// The signature did not verify, the token is structurally malformed,
    /// or it has expired.
    #[error("invalid token: {0}")]
    Invalid(String),
    /// The embedded subject id is the nil identifier.
    #[error("token subject is missing")]
    MissingSubject,
    /// The signing primitive itself failed.
    #[error("token signing failed: {0}")]
    Signing(String),
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Signing(msg) => AppError::internal(format!("Token signing failed: {msg}")),
            other => AppError::unauthorized(other.to_string()),
        }
    }
}
