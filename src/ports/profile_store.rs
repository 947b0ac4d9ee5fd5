//! ProfileStore port for financial profile persistence.
//!
//! # Contract
//!
//! Implementations must:
//! - Hold at most one record per username
//! - Return `Ok(None)` from `get` when no record exists (absence is not an error)
//! - Fully replace `userDetails`, `income`, `debt` and `expenses` on every upsert
//! - Decide "created" and write in one atomic step where the backend allows it
//! - Report backend faults as storage-class `DomainError`s, without retrying

use async_trait::async_trait;

use crate::domain::finance::{FinancialProfile, ProfileData};
use crate::domain::foundation::{DomainError, Username};

/// Result of an upsert.
#[derive(Debug, Clone, PartialEq)]
pub struct UpsertOutcome {
    /// The profile as stored after the write.
    pub profile: FinancialProfile,
    /// True when no record existed for the username before this write.
    pub created: bool,
}

impl UpsertOutcome {
    pub fn created(profile: FinancialProfile) -> Self {
        Self {
            profile,
            created: true,
        }
    }

    pub fn replaced(profile: FinancialProfile) -> Self {
        Self {
            profile,
            created: false,
        }
    }
}

/// Durable mapping from username to financial profile.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Find the profile for `username`.
    async fn get(&self, username: &Username) -> Result<Option<FinancialProfile>, DomainError>;

    /// Create the profile for `username`, or replace its mutable fields.
    async fn upsert(
        &self,
        username: &Username,
        data: ProfileData,
    ) -> Result<UpsertOutcome, DomainError>;
}
