//! Success response bodies

use serde::Serialize;

use crate::domain::account::UserProfile;

/// Result of a conversion action: `{"message": "Success", "data": ...}`
#[derive(Debug, Clone, Serialize)]
pub struct ActionResponse<T> {
    pub message: String,
    pub data: T,
}

impl<T> ActionResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            message: "Success".to_string(),
            data,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub id_token: String,
    /// Seconds until the id token expires
    pub expires_in: i64,
}

/// The signed-in user and their profile, when one exists
#[derive(Debug, Clone, Serialize)]
pub struct MeResponse {
    pub id: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<UserProfile>,
}
