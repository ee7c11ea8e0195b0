//! # authgate-entity
//!
//! Domain entities for Authgate: the persisted user identity and the
//! transient credential pair accepted by the flows.

pub mod credentials;
pub mod user;

pub use credentials::Credentials;
pub use user::{NewUser, User};
