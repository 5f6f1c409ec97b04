//! Identity record storage used by the local identity provider

use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt::Debug;
use tokio::sync::RwLock;

use crate::domain::account::{IdentityError, IdentityId, UserIdentity};

/// Stored identity, including the password hash
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityRecord {
    pub id: IdentityId,
    /// Normalized (trimmed, lowercase)
    pub email: String,
    pub password_hash: String,
    /// Disabled identities cannot sign in and their sessions stop verifying
    pub disabled: bool,
}

impl IdentityRecord {
    pub fn new(id: IdentityId, email: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
            password_hash: password_hash.into(),
            disabled: false,
        }
    }

    pub fn to_identity(&self) -> UserIdentity {
        UserIdentity {
            id: self.id.clone(),
            email: self.email.clone(),
            disabled: self.disabled,
        }
    }
}

/// Storage for identity records. Email addresses are unique.
#[async_trait]
pub trait IdentityRepository: Send + Sync + Debug {
    /// Insert a record. Fails with `EmailAlreadyExists` on a duplicate email.
    async fn insert(&self, record: IdentityRecord) -> Result<(), IdentityError>;

    async fn get(&self, id: &IdentityId) -> Result<Option<IdentityRecord>, IdentityError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<IdentityRecord>, IdentityError>;

    /// Returns false when no record was deleted
    async fn delete(&self, id: &IdentityId) -> Result<bool, IdentityError>;
}

/// In-memory identity records
#[derive(Debug, Default)]
pub struct InMemoryIdentityRepository {
    records: RwLock<HashMap<IdentityId, IdentityRecord>>,
}

impl InMemoryIdentityRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl IdentityRepository for InMemoryIdentityRepository {
    async fn insert(&self, record: IdentityRecord) -> Result<(), IdentityError> {
        let mut records = self.records.write().await;

        if records.values().any(|r| r.email == record.email) {
            return Err(IdentityError::EmailAlreadyExists);
        }

        records.insert(record.id.clone(), record);
        Ok(())
    }

    async fn get(&self, id: &IdentityId) -> Result<Option<IdentityRecord>, IdentityError> {
        Ok(self.records.read().await.get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<IdentityRecord>, IdentityError> {
        Ok(self
            .records
            .read()
            .await
            .values()
            .find(|r| r.email == email)
            .cloned())
    }

    async fn delete(&self, id: &IdentityId) -> Result<bool, IdentityError> {
        Ok(self.records.write().await.remove(id).is_some())
    }
}
