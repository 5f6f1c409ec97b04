//! Profile store trait

use async_trait::async_trait;
use thiserror::Error;

#[cfg(test)]
use mockall::automock;

use super::entity::{IdentityId, UserProfile};

/// Profile store failure. Only I/O-level problems surface here; a missing
/// document is never an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Profile store error: {message}")]
pub struct ProfileStoreError {
    pub message: String,
}

impl ProfileStoreError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Document store holding one profile per identity, keyed by uid
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Write the profile, replacing any existing document with the same uid
    async fn create_profile(&self, profile: &UserProfile) -> Result<(), ProfileStoreError>;

    /// Remove the profile. Deleting an absent profile succeeds.
    async fn delete_profile(&self, uid: &IdentityId) -> Result<(), ProfileStoreError>;

    async fn get_profile(&self, uid: &IdentityId) -> Result<Option<UserProfile>, ProfileStoreError>;

    /// Check the store is reachable
    async fn health_check(&self) -> Result<(), ProfileStoreError> {
        Ok(())
    }
}
