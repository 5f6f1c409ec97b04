//! Maps identity provider error codes to user-facing messages

use tracing::warn;

/// Message shown for codes without a table entry
pub const UNEXPECTED_AUTH_ERROR: &str =
    "An unexpected authentication error occurred. Please try again.";

const MESSAGES: &[(&str, &str)] = &[
    ("auth/invalid-email", "Please enter a valid email address."),
    ("auth/user-not-found", "No account found with this email address."),
    (
        "auth/invalid-credential",
        "Incorrect email or password. Please try again.",
    ),
    ("auth/wrong-password", "Incorrect password. Please try again."),
    (
        "auth/email-already-exists",
        "An account with this email address already exists.",
    ),
    (
        "auth/weak-password",
        "The password is too weak. Please use a stronger password.",
    ),
    (
        "auth/operation-not-allowed",
        "Email/Password sign-in is not enabled for this project.",
    ),
    (
        "auth/requires-recent-login",
        "This is a sensitive operation. Please sign out and sign back in to continue.",
    ),
    ("auth/user-disabled", "This account has been disabled."),
    (
        "auth/invalid-id-token",
        "Your sign-in has expired. Please sign in again.",
    ),
    (
        "auth/id-token-expired",
        "Your sign-in has expired. Please sign in again.",
    ),
];

/// Translate a provider error code. Unknown codes are logged for operators and
/// mapped to a generic message; the code itself never reaches the user.
pub fn translate(code: &str, raw: Option<&dyn std::error::Error>) -> &'static str {
    if let Some((_, message)) = MESSAGES.iter().find(|(known, _)| *known == code) {
        return message;
    }

    match raw {
        Some(error) => warn!(code, error = %error, "Unhandled identity provider error code"),
        None => warn!(code, "Unhandled identity provider error code"),
    }

    UNEXPECTED_AUTH_ERROR
}
