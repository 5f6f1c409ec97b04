//! In-memory profile store

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::account::{IdentityId, ProfileStore, ProfileStoreError, UserProfile};

#[derive(Debug, Default)]
pub struct InMemoryProfileStore {
    profiles: RwLock<HashMap<IdentityId, UserProfile>>,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.profiles.read().await.len()
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn create_profile(&self, profile: &UserProfile) -> Result<(), ProfileStoreError> {
        self.profiles
            .write()
            .await
            .insert(profile.uid.clone(), profile.clone());
        Ok(())
    }

    async fn delete_profile(&self, uid: &IdentityId) -> Result<(), ProfileStoreError> {
        self.profiles.write().await.remove(uid);
        Ok(())
    }

    async fn get_profile(&self, uid: &IdentityId) -> Result<Option<UserProfile>, ProfileStoreError> {
        Ok(self.profiles.read().await.get(uid).cloned())
    }
}
