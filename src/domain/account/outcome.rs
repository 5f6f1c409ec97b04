//! Structured results of account lifecycle operations

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// Category of a failed lifecycle operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountErrorKind {
    /// Rejected by the identity provider
    Identity,
    /// Profile write failed during signup; the identity was rolled back
    ProfileCreation,
    /// No identity for the given email
    AccountNotFound,
    /// Session could not be established
    Session,
    /// Profile store read failed
    Store,
}

impl AccountErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Identity => "identity",
            Self::ProfileCreation => "profile_creation",
            Self::AccountNotFound => "account_not_found",
            Self::Session => "session",
            Self::Store => "store",
        }
    }
}

/// Categorized failure with a message safe to show to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountFailure {
    pub kind: AccountErrorKind,
    pub message: String,
}

impl AccountFailure {
    pub fn new(kind: AccountErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Result of a lifecycle operation, serialized as `{"success": true}` or
/// `{"success": false, "errorKind": ..., "message": ...}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationResult {
    Success,
    Failure(AccountFailure),
}

impl OperationResult {
    pub fn failure(kind: AccountErrorKind, message: impl Into<String>) -> Self {
        Self::Failure(AccountFailure::new(kind, message))
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    pub fn failure_kind(&self) -> Option<AccountErrorKind> {
        match self {
            Self::Success => None,
            Self::Failure(failure) => Some(failure.kind),
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Success => None,
            Self::Failure(failure) => Some(&failure.message),
        }
    }
}

impl From<AccountFailure> for OperationResult {
    fn from(failure: AccountFailure) -> Self {
        Self::Failure(failure)
    }
}

impl Serialize for OperationResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Success => {
                let mut state = serializer.serialize_struct("OperationResult", 1)?;
                state.serialize_field("success", &true)?;
                state.end()
            }
            Self::Failure(failure) => {
                let mut state = serializer.serialize_struct("OperationResult", 3)?;
                state.serialize_field("success", &false)?;
                state.serialize_field("errorKind", &failure.kind)?;
                state.serialize_field("message", &failure.message)?;
                state.end()
            }
        }
    }
}
