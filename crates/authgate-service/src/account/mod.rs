//! Local register and login flows.

pub mod service;

pub use service::AccountService;
