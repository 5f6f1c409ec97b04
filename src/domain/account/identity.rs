//! Identity provider trait and its error codes

use async_trait::async_trait;
use thiserror::Error;

#[cfg(test)]
use mockall::automock;

use super::entity::{IdentityId, SessionUser, UserIdentity};

/// Errors raised by an identity provider. Each carries a stable provider code
/// that the error translator turns into a user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityError {
    #[error("The email address is badly formatted")]
    InvalidEmail,

    #[error("The email address is already in use by another account")]
    EmailAlreadyExists,

    #[error("The password does not meet the provider's strength requirements")]
    WeakPassword,

    #[error("No identity matches the given identifier")]
    NotFound,

    #[error("The supplied credentials are incorrect")]
    InvalidCredential,

    #[error("The identity has been disabled")]
    UserDisabled,

    #[error("Password sign-in is disabled")]
    OperationNotAllowed,

    #[error("The operation requires a recent sign-in")]
    RequiresRecentLogin,

    #[error("Invalid id token: {0}")]
    InvalidToken(String),

    #[error("The session token has expired")]
    Expired,

    #[error("The session token has been revoked")]
    Revoked,

    #[error("Invalid session token: {0}")]
    Invalid(String),

    #[error("Identity provider error ({code}): {message}")]
    Provider { code: String, message: String },
}

impl IdentityError {
    pub fn provider(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Stable provider error code, e.g. `auth/email-already-exists`
    pub fn code(&self) -> &str {
        match self {
            Self::InvalidEmail => "auth/invalid-email",
            Self::EmailAlreadyExists => "auth/email-already-exists",
            Self::WeakPassword => "auth/weak-password",
            Self::NotFound => "auth/user-not-found",
            Self::InvalidCredential => "auth/invalid-credential",
            Self::UserDisabled => "auth/user-disabled",
            Self::OperationNotAllowed => "auth/operation-not-allowed",
            Self::RequiresRecentLogin => "auth/requires-recent-login",
            Self::InvalidToken(_) => "auth/invalid-id-token",
            Self::Expired => "auth/session-cookie-expired",
            Self::Revoked => "auth/session-cookie-revoked",
            Self::Invalid(_) => "auth/argument-error",
            Self::Provider { code, .. } => code,
        }
    }
}

/// System of record for identities, credentials and session tokens
#[cfg_attr(test, automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Create an identity with a password credential
    async fn create_identity(
        &self,
        email: &str,
        password: &str,
    ) -> Result<UserIdentity, IdentityError>;

    /// Delete an identity. Fails with `NotFound` when it does not exist.
    async fn delete_identity(&self, id: &IdentityId) -> Result<(), IdentityError>;

    /// Look up an identity by email address
    async fn find_identity_by_email(&self, email: &str) -> Result<UserIdentity, IdentityError>;

    /// Check a password credential and return a short-lived id token that
    /// can be exchanged for a session
    async fn sign_in_with_password(&self, email: &str, password: &str)
        -> Result<String, IdentityError>;

    /// Exchange an id token for a session token valid for `ttl`
    async fn issue_session(
        &self,
        id_token: &str,
        ttl: chrono::Duration,
    ) -> Result<String, IdentityError>;

    /// Verify a session token
    async fn verify_session(&self, token: &str) -> Result<SessionUser, IdentityError>;
}
