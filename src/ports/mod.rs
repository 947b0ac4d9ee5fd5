//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `ProfileStore` - Financial profile persistence (document, key-value, in-memory)
//! - `SessionValidator` - Bearer token validation for the protected routes

mod profile_store;
mod session_validator;

pub use profile_store::{ProfileStore, UpsertOutcome};
pub use session_validator::SessionValidator;
