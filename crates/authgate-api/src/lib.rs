//! # authgate-api
//!
//! HTTP API layer for Authgate built on Axum.
//!
//! Provides the register/login/me endpoints, DTOs, the authenticated-user
//! extractor, middleware (CORS, request logging), and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_state, run_server};
pub use router::build_router;
pub use state::AppState;
