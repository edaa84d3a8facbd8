//! Auth error taxonomy

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthError {
    InvalidCredential,
    UserNotFound,
    WeakPassword,
    EmailInUse,
    InvalidEmail,
    /// Anything the taxonomy does not cover, with the raw code or message
    Other(String),
}

impl AuthError {
    /// Map a Firebase Auth error code
    pub fn from_code(code: &str) -> Self {
        match code {
            "auth/invalid-credential" | "auth/wrong-password" | "auth/invalid-login-credentials" => {
                AuthError::InvalidCredential
            }
            "auth/user-not-found" => AuthError::UserNotFound,
            "auth/weak-password" => AuthError::WeakPassword,
            "auth/email-already-in-use" => AuthError::EmailInUse,
            "auth/invalid-email" => AuthError::InvalidEmail,
            other => AuthError::Other(other.to_string()),
        }
    }

    pub fn user_message(&self) -> &'static str {
        match self {
            AuthError::InvalidCredential => "Invalid email or password.",
            AuthError::UserNotFound => "No user with this email was found.",
            AuthError::WeakPassword => "Password must be at least 6 characters.",
            AuthError::EmailInUse => "This email is already in use.",
            AuthError::InvalidEmail => "The email address is not valid.",
            AuthError::Other(_) => "An error occurred. Please try again.",
        }
    }
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::Other(detail) => write!(f, "unmapped auth error: {}", detail),
            known => write!(f, "{}", known.user_message()),
        }
    }
}

impl std::error::Error for AuthError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_codes_map_to_taxonomy() {
        assert_eq!(AuthError::from_code("auth/wrong-password"), AuthError::InvalidCredential);
        assert_eq!(AuthError::from_code("auth/user-not-found"), AuthError::UserNotFound);
        assert_eq!(AuthError::from_code("auth/weak-password"), AuthError::WeakPassword);
        assert_eq!(AuthError::from_code("auth/email-already-in-use"), AuthError::EmailInUse);
    }

    #[test]
    fn test_unmapped_code_shows_generic_message() {
        let err = AuthError::from_code("auth/too-many-requests");
        assert_eq!(err, AuthError::Other("auth/too-many-requests".to_string()));
        assert_eq!(err.user_message(), "An error occurred. Please try again.");
    }
}
