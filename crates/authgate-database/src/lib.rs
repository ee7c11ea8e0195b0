//! # authgate-database
//!
//! PostgreSQL connection management, schema migration, and the concrete
//! credential store implementation.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::create_pool;
pub use repositories::user::UserRepository;
pub use repositories::CredentialStore;
