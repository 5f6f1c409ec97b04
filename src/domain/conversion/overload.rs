//! Classification of AI provider failures shown to the user

use crate::domain::DomainError;

pub const AI_OVERLOADED_MESSAGE: &str =
    "The AI model is temporarily overloaded. Please try again in a few moments.";

/// True when the error text describes a transient overload of the model
pub fn is_transient_overload(message: &str) -> bool {
    message.contains("503")
        && (message.contains("Service Unavailable") || message.contains("model is overloaded"))
}

/// Message shown to the user for a failed conversion
pub fn user_facing_ai_error(error: &DomainError) -> String {
    let message = match error {
        DomainError::Provider { message, .. } => message.clone(),
        other => other.to_string(),
    };

    if is_transient_overload(&message) {
        AI_OVERLOADED_MESSAGE.to_string()
    } else {
        message
    }
}
