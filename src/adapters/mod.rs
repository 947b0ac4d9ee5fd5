//! Adapters - Implementations of port interfaces.
//!
//! - `auth` - Session validators (JWT, mock)
//! - `http` - axum router and handlers
//! - `profile` - Profile stores (in-memory, PostgreSQL, Redis)

pub mod auth;
pub mod http;
pub mod profile;
