//! # authgate-service
//!
//! The credential/session core of the gateway: the `IdentityService`
//! contract, the local register/login flows, and the remote-delegation
//! client.

pub mod account;
pub mod identity;
pub mod remote;

pub use account::AccountService;
pub use identity::{AuthSession, IdentityService};
pub use remote::RemoteIdentityClient;
