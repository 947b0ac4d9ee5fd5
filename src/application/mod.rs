//! Application layer - Commands, Queries, and the services that run them.
//!
//! This layer orchestrates domain operations and coordinates between ports.

mod profile_service;

pub use profile_service::{
    FetchProfileQuery, ProfileService, SubmitProfileCommand, SubmitProfileResult,
};
