//! Remote identity service delegation.

pub mod client;

pub use client::RemoteIdentityClient;
