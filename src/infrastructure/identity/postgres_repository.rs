//! PostgreSQL identity repository

use async_trait::async_trait;
use sqlx::{postgres::PgRow, PgPool, Row};

use super::repository::{IdentityRecord, IdentityRepository};
use crate::domain::account::{IdentityError, IdentityId};

/// PostgreSQL implementation of IdentityRepository (table `identities`)
#[derive(Debug, Clone)]
pub struct PostgresIdentityRepository {
    pool: PgPool,
}

impl PostgresIdentityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn storage_error(action: &str, e: sqlx::Error) -> IdentityError {
    IdentityError::provider("auth/internal-error", format!("Failed to {}: {}", action, e))
}

fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.is_unique_violation())
}

fn row_to_record(row: &PgRow) -> IdentityRecord {
    IdentityRecord {
        id: IdentityId::new(row.get::<String, _>("id")),
        email: row.get("email"),
        password_hash: row.get("password_hash"),
        disabled: row.get("disabled"),
    }
}

#[async_trait]
impl IdentityRepository for PostgresIdentityRepository {
    async fn insert(&self, record: IdentityRecord) -> Result<(), IdentityError> {
        sqlx::query(
            r#"
            INSERT INTO identities (id, email, password_hash, disabled)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(record.id.as_str())
        .bind(&record.email)
        .bind(&record.password_hash)
        .bind(record.disabled)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                IdentityError::EmailAlreadyExists
            } else {
                storage_error("create identity", e)
            }
        })?;

        Ok(())
    }

    async fn get(&self, id: &IdentityId) -> Result<Option<IdentityRecord>, IdentityError> {
        let row = sqlx::query(
            r#"
            SELECT id, email, password_hash, disabled
            FROM identities
            WHERE id = $1
            "#,
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| storage_error("get identity", e))?;

        Ok(row.as_ref().map(row_to_record))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<IdentityRecord>, IdentityError> {
        let row = sqlx::query(
            r#"
            SELECT id, email, password_hash, disabled
            FROM identities
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| storage_error("find identity by email", e))?;

        Ok(row.as_ref().map(row_to_record))
    }

    async fn delete(&self, id: &IdentityId) -> Result<bool, IdentityError> {
        let result = sqlx::query("DELETE FROM identities WHERE id = $1")
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error("delete identity", e))?;

        Ok(result.rows_affected() > 0)
    }
}
