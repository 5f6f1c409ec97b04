//! Account entities shared by the identity provider and the profile store

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Opaque identifier assigned by the identity provider
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdentityId(String);

impl IdentityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for IdentityId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for IdentityId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl std::fmt::Display for IdentityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity as exposed by the identity provider. The password credential
/// stays inside the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserIdentity {
    pub id: IdentityId,
    pub email: String,
    pub disabled: bool,
}

impl UserIdentity {
    pub fn new(id: impl Into<IdentityId>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            disabled: false,
        }
    }
}

/// Profile document stored under `users/{uid}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub uid: IdentityId,
    /// Copied from the identity at signup, not kept in sync afterwards
    pub email: String,
    /// RFC 3339 timestamp, set once
    pub created_at: String,
}

impl UserProfile {
    /// Build a profile stamped with the current time
    pub fn new(uid: IdentityId, email: impl Into<String>) -> Self {
        Self {
            uid,
            email: email.into(),
            created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// Caller resolved from a verified session token
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionUser {
    pub id: IdentityId,
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_created_at_is_rfc3339() {
        let profile = UserProfile::new(IdentityId::new("uid-1"), "a@b.com");

        assert!(chrono::DateTime::parse_from_rfc3339(&profile.created_at).is_ok());
        assert!(profile.created_at.ends_with('Z'));
    }

    #[test]
    fn test_profile_serializes_camel_case() {
        let profile = UserProfile {
            uid: IdentityId::new("uid-1"),
            email: "a@b.com".to_string(),
            created_at: "2024-01-01T00:00:00.000Z".to_string(),
        };

        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["uid"], "uid-1");
        assert_eq!(json["createdAt"], "2024-01-01T00:00:00.000Z");
    }

    #[test]
    fn test_new_identity_is_enabled() {
        let identity = UserIdentity::new("uid-1", "a@b.com");
        assert!(!identity.disabled);
        assert_eq!(identity.id.as_str(), "uid-1");
    }
}
