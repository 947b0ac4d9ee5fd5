//! HTTP adapter for profile endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{ErrorResponse, HealthResponse, MessageResponse, UsernameQuery};
pub use handlers::{health, ProfileAppState};
pub use routes::{auth_profile_routes, profile_routes};
