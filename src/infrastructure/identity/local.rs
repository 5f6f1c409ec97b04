//! In-process identity provider backed by an identity repository

use async_trait::async_trait;
use chrono::Duration;
use rand::{distributions::Alphanumeric, Rng};
use std::sync::Arc;
use tracing::{debug, info};
use validator::ValidateEmail;

use super::password::PasswordHasher;
use super::repository::{IdentityRecord, IdentityRepository};
use super::token::{TokenError, TokenKind, TokenSigner};
use crate::domain::account::{IdentityError, IdentityId, IdentityProvider, SessionUser, UserIdentity};

const UID_LENGTH: usize = 28;
const MIN_PROVIDER_PASSWORD_LENGTH: usize = 6;

/// Identity provider that keeps identities in a repository, hashes passwords
/// with the configured hasher and signs tokens locally
#[derive(Debug)]
pub struct LocalIdentityProvider<R: IdentityRepository, H: PasswordHasher> {
    repository: Arc<R>,
    hasher: Arc<H>,
    signer: TokenSigner,
    id_token_ttl: Duration,
}

impl<R: IdentityRepository, H: PasswordHasher> LocalIdentityProvider<R, H> {
    pub fn new(repository: Arc<R>, hasher: Arc<H>, signer: TokenSigner, id_token_ttl: Duration) -> Self {
        Self {
            repository,
            hasher,
            signer,
            id_token_ttl,
        }
    }

    async fn active_record(&self, id: &str) -> Result<Option<IdentityRecord>, IdentityError> {
        let record = self.repository.get(&IdentityId::new(id)).await?;
        Ok(record.filter(|r| !r.disabled))
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn generate_uid() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(UID_LENGTH)
        .map(char::from)
        .collect()
}

#[async_trait]
impl<R: IdentityRepository, H: PasswordHasher> IdentityProvider for LocalIdentityProvider<R, H> {
    async fn create_identity(
        &self,
        email: &str,
        password: &str,
    ) -> Result<UserIdentity, IdentityError> {
        let email = normalize_email(email);
        if !email.as_str().validate_email() {
            return Err(IdentityError::InvalidEmail);
        }

        if password.chars().count() < MIN_PROVIDER_PASSWORD_LENGTH {
            return Err(IdentityError::WeakPassword);
        }

        let password_hash = self.hasher.hash(password)?;
        let record = IdentityRecord::new(IdentityId::new(generate_uid()), email, password_hash);
        let identity = record.to_identity();

        self.repository.insert(record).await?;

        info!(uid = %identity.id, "Created identity");
        Ok(identity)
    }

    async fn delete_identity(&self, id: &IdentityId) -> Result<(), IdentityError> {
        if !self.repository.delete(id).await? {
            return Err(IdentityError::NotFound);
        }

        info!(uid = %id, "Deleted identity");
        Ok(())
    }

    async fn find_identity_by_email(&self, email: &str) -> Result<UserIdentity, IdentityError> {
        self.repository
            .find_by_email(&normalize_email(email))
            .await?
            .map(|record| record.to_identity())
            .ok_or(IdentityError::NotFound)
    }

    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<String, IdentityError> {
        let Some(record) = self.repository.find_by_email(&normalize_email(email)).await? else {
            debug!("Sign-in for unknown email");
            return Err(IdentityError::InvalidCredential);
        };

        if !self.hasher.verify(password, &record.password_hash) {
            debug!(uid = %record.id, "Sign-in with wrong password");
            return Err(IdentityError::InvalidCredential);
        }

        if record.disabled {
            return Err(IdentityError::UserDisabled);
        }

        self.signer
            .sign(TokenKind::Id, record.id.as_str(), &record.email, self.id_token_ttl)
            .map_err(|e| IdentityError::provider("auth/internal-error", e.to_string()))
    }

    async fn issue_session(&self, id_token: &str, ttl: Duration) -> Result<String, IdentityError> {
        let claims = self
            .signer
            .verify(id_token, TokenKind::Id)
            .map_err(|e| IdentityError::InvalidToken(e.to_string()))?;

        let record = self
            .active_record(&claims.sub)
            .await?
            .ok_or_else(|| IdentityError::InvalidToken("identity is missing or disabled".into()))?;

        self.signer
            .sign(TokenKind::Session, record.id.as_str(), &record.email, ttl)
            .map_err(|e| IdentityError::provider("auth/internal-error", e.to_string()))
    }

    async fn verify_session(&self, token: &str) -> Result<SessionUser, IdentityError> {
        let claims = self
            .signer
            .verify(token, TokenKind::Session)
            .map_err(|e| match e {
                TokenError::Expired => IdentityError::Expired,
                TokenError::Invalid(reason) => IdentityError::Invalid(reason),
            })?;

        let record = self
            .active_record(&claims.sub)
            .await?
            .ok_or(IdentityError::Revoked)?;

        Ok(SessionUser {
            id: record.id,
            email: record.email,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::identity::{Argon2Hasher, InMemoryIdentityRepository};

    type Provider = LocalIdentityProvider<InMemoryIdentityRepository, Argon2Hasher>;

    fn provider() -> Provider {
        LocalIdentityProvider::new(
            Arc::new(InMemoryIdentityRepository::new()),
            Arc::new(Argon2Hasher::new()),
            TokenSigner::new("test-secret", "proteus-test"),
            Duration::hours(1),
        )
    }

    async fn session_for(provider: &Provider, email: &str, password: &str) -> String {
        let id_token = provider.sign_in_with_password(email, password).await.unwrap();
        provider.issue_session(&id_token, Duration::days(5)).await.unwrap()
    }

    #[tokio::test]
    async fn test_create_identity_normalizes_email() {
        let provider = provider();
        let identity = provider.create_identity("  A@B.com ", "Aa1!aaaa").await.unwrap();

        assert_eq!(identity.email, "a@b.com");
        assert_eq!(identity.id.as_str().len(), 28);
        assert!(identity.id.as_str().chars().all(|c| c.is_ascii_alphanumeric()));

        let found = provider.find_identity_by_email("a@b.com").await.unwrap();
        assert_eq!(found.id, identity.id);
    }

    #[tokio::test]
    async fn test_create_identity_errors() {
        let provider = provider();
        provider.create_identity("a@b.com", "Aa1!aaaa").await.unwrap();

        assert_eq!(
            provider.create_identity("a@b.com", "Aa1!aaaa").await,
            Err(IdentityError::EmailAlreadyExists)
        );
        assert_eq!(
            provider.create_identity("c@d.com", "12345").await,
            Err(IdentityError::WeakPassword)
        );
        assert_eq!(
            provider.create_identity("nope", "Aa1!aaaa").await,
            Err(IdentityError::InvalidEmail)
        );
    }

    #[tokio::test]
    async fn test_delete_identity_not_found() {
        let provider = provider();

        assert_eq!(
            provider.delete_identity(&IdentityId::new("missing")).await,
            Err(IdentityError::NotFound)
        );
    }

    #[tokio::test]
    async fn test_sign_in_does_not_reveal_unknown_email() {
        let provider = provider();
        provider.create_identity("a@b.com", "Aa1!aaaa").await.unwrap();

        assert_eq!(
            provider.sign_in_with_password("x@y.com", "Aa1!aaaa").await,
            Err(IdentityError::InvalidCredential)
        );
        assert_eq!(
            provider.sign_in_with_password("a@b.com", "wrong").await,
            Err(IdentityError::InvalidCredential)
        );
    }

    #[tokio::test]
    async fn test_issue_then_verify_session() {
        let provider = provider();
        let identity = provider.create_identity("a@b.com", "Aa1!aaaa").await.unwrap();

        let session = session_for(&provider, "a@b.com", "Aa1!aaaa").await;
        let user = provider.verify_session(&session).await.unwrap();

        assert_eq!(user.id, identity.id);
        assert_eq!(user.email, "a@b.com");
    }

    #[tokio::test]
    async fn test_id_token_is_not_a_session() {
        let provider = provider();
        provider.create_identity("a@b.com", "Aa1!aaaa").await.unwrap();

        let id_token = provider.sign_in_with_password("a@b.com", "Aa1!aaaa").await.unwrap();
        assert!(matches!(
            provider.verify_session(&id_token).await,
            Err(IdentityError::Invalid(_))
        ));
    }

    #[tokio::test]
    async fn test_issue_session_rejects_garbage() {
        let provider = provider();

        assert!(matches!(
            provider.issue_session("garbage", Duration::days(5)).await,
            Err(IdentityError::InvalidToken(_))
        ));
    }

    #[tokio::test]
    async fn test_expired_session() {
        let provider = provider();
        provider.create_identity("a@b.com", "Aa1!aaaa").await.unwrap();

        let id_token = provider.sign_in_with_password("a@b.com", "Aa1!aaaa").await.unwrap();
        let session = provider
            .issue_session(&id_token, Duration::seconds(-30))
            .await
            .unwrap();

        assert_eq!(
            provider.verify_session(&session).await,
            Err(IdentityError::Expired)
        );
    }

    #[tokio::test]
    async fn test_deleted_identity_session_is_revoked() {
        let provider = provider();
        let identity = provider.create_identity("a@b.com", "Aa1!aaaa").await.unwrap();
        let session = session_for(&provider, "a@b.com", "Aa1!aaaa").await;

        provider.delete_identity(&identity.id).await.unwrap();

        assert_eq!(
            provider.verify_session(&session).await,
            Err(IdentityError::Revoked)
        );
    }

    #[tokio::test]
    async fn test_repeated_sign_in_sessions_all_verify() {
        let provider = provider();
        provider.create_identity("a@b.com", "Aa1!aaaa").await.unwrap();

        let first = session_for(&provider, "a@b.com", "Aa1!aaaa").await;
        let second = session_for(&provider, "a@b.com", "Aa1!aaaa").await;

        assert!(provider.verify_session(&first).await.is_ok());
        assert!(provider.verify_session(&second).await.is_ok());
    }

    #[tokio::test]
    async fn test_disabled_identity() {
        let repository = Arc::new(InMemoryIdentityRepository::new());
        let provider = LocalIdentityProvider::new(
            repository.clone(),
            Arc::new(Argon2Hasher::new()),
            TokenSigner::new("test-secret", "proteus-test"),
            Duration::hours(1),
        );

        let hash = Argon2Hasher::new().hash("Aa1!aaaa").unwrap();
        let mut record = IdentityRecord::new(IdentityId::new("uid-1"), "a@b.com", hash);
        record.disabled = true;
        repository.insert(record).await.unwrap();

        assert_eq!(
            provider.sign_in_with_password("a@b.com", "Aa1!aaaa").await,
            Err(IdentityError::UserDisabled)
        );

        let session = provider
            .signer
            .sign(TokenKind::Session, "uid-1", "a@b.com", Duration::days(5))
            .unwrap();
        assert_eq!(
            provider.verify_session(&session).await,
            Err(IdentityError::Revoked)
        );
    }
}
