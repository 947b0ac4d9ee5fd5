//! In-Memory Profile Store Adapter
//!
//! Keeps profiles in a process-local map. Useful for development and tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::finance::{FinancialProfile, ProfileData};
use crate::domain::foundation::{DomainError, Username};
use crate::ports::{ProfileStore, UpsertOutcome};

/// In-memory storage for financial profiles
#[derive(Debug, Clone, Default)]
pub struct InMemoryProfileStore {
    profiles: Arc<RwLock<HashMap<Username, FinancialProfile>>>,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored profiles.
    pub async fn len(&self) -> usize {
        self.profiles.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.profiles.read().await.is_empty()
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn get(&self, username: &Username) -> Result<Option<FinancialProfile>, DomainError> {
        Ok(self.profiles.read().await.get(username).cloned())
    }

    async fn upsert(
        &self,
        username: &Username,
        data: ProfileData,
    ) -> Result<UpsertOutcome, DomainError> {
        let profile = FinancialProfile::from_data(username.clone(), data);

        // Existence check and write share one lock acquisition.
        let mut profiles = self.profiles.write().await;
        let previous = profiles.insert(username.clone(), profile.clone());

        Ok(match previous {
            None => UpsertOutcome::created(profile),
            Some(_) => UpsertOutcome::replaced(profile),
        })
    }
}
