//! ProfileService - Boundary-facing orchestration for financial profiles.
//!
//! Validates the username, applies payload defaults, and delegates to the
//! injected [`ProfileStore`]. Holds no state of its own.

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::finance::{FinancialProfile, FinancialSummary, ProfilePayload};
use crate::domain::foundation::{DomainError, Username};
use crate::ports::ProfileStore;

/// Command to create or replace a profile.
#[derive(Debug, Clone)]
pub struct SubmitProfileCommand {
    pub username: String,
    pub payload: ProfilePayload,
}

/// Result of a successful submit.
#[derive(Debug, Clone)]
pub struct SubmitProfileResult {
    /// True on the first write for this username.
    pub created: bool,
    pub profile: FinancialProfile,
}

/// Query for a single profile.
#[derive(Debug, Clone)]
pub struct FetchProfileQuery {
    pub username: String,
}

pub struct ProfileService {
    store: Arc<dyn ProfileStore>,
}

impl ProfileService {
    pub fn new(store: Arc<dyn ProfileStore>) -> Self {
        Self { store }
    }

    /// Creates the profile on first write, replaces it afterwards.
    pub async fn submit_profile(
        &self,
        cmd: SubmitProfileCommand,
    ) -> Result<SubmitProfileResult, DomainError> {
        let username = Username::new(cmd.username)?;
        let data = cmd.payload.into_profile_data(&username);

        let outcome = self.store.upsert(&username, data).await?;

        if outcome.created {
            info!(username = %username, "financial profile created");
        } else {
            info!(username = %username, "financial profile replaced");
        }

        Ok(SubmitProfileResult {
            created: outcome.created,
            profile: outcome.profile,
        })
    }

    /// Fails with `ProfileNotFound` when nothing is stored for the username.
    pub async fn fetch_profile(&self, query: FetchProfileQuery) -> Result<FinancialProfile, DomainError> {
        let username = Username::new(query.username)?;

        match self.store.get(&username).await? {
            Some(profile) => Ok(profile),
            None => {
                debug!(username = %username, "financial profile not found");
                Err(DomainError::profile_not_found(username.as_str()))
            }
        }
    }

    pub async fn financial_summary(
        &self,
        query: FetchProfileQuery,
    ) -> Result<FinancialSummary, DomainError> {
        let profile = self.fetch_profile(query).await?;
        Ok(FinancialSummary::from_profile(&profile))
    }
}
