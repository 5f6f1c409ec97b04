//! PostgreSQL profile store (table `users`)

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::account::{IdentityId, ProfileStore, ProfileStoreError, UserProfile};

#[derive(Debug, Clone)]
pub struct PostgresProfileStore {
    pool: PgPool,
}

impl PostgresProfileStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileStore for PostgresProfileStore {
    async fn create_profile(&self, profile: &UserProfile) -> Result<(), ProfileStoreError> {
        sqlx::query(
            r#"
            INSERT INTO users (uid, email, created_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (uid) DO UPDATE
            SET email = EXCLUDED.email, created_at = EXCLUDED.created_at
            "#,
        )
        .bind(profile.uid.as_str())
        .bind(&profile.email)
        .bind(&profile.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| ProfileStoreError::new(format!("Failed to write profile: {}", e)))?;

        Ok(())
    }

    async fn delete_profile(&self, uid: &IdentityId) -> Result<(), ProfileStoreError> {
        sqlx::query("DELETE FROM users WHERE uid = $1")
            .bind(uid.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| ProfileStoreError::new(format!("Failed to delete profile: {}", e)))?;

        Ok(())
    }

    async fn get_profile(&self, uid: &IdentityId) -> Result<Option<UserProfile>, ProfileStoreError> {
        let row = sqlx::query("SELECT uid, email, created_at FROM users WHERE uid = $1")
            .bind(uid.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| ProfileStoreError::new(format!("Failed to read profile: {}", e)))?;

        Ok(row.map(|row| UserProfile {
            uid: IdentityId::new(row.get::<String, _>("uid")),
            email: row.get("email"),
            created_at: row.get("created_at"),
        }))
    }

    async fn health_check(&self) -> Result<(), ProfileStoreError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(|e| ProfileStoreError::new(format!("Database unreachable: {}", e)))
    }
}
