//! Domain Layer - Core Entity Trait and Errors

use serde::{Deserialize, Serialize};

use crate::auth::AuthError;

/// Core trait for persisted entities
pub trait Entity: Sized + Clone {
    /// The type of the entity's unique identifier
    type Id: Clone + Eq + std::hash::Hash;

    /// Returns the entity's unique identifier
    fn id(&self) -> &Self::Id;
}

/// Locate an entity by id in a slice
pub fn find_by_id<'a, E: Entity>(entities: &'a [E], id: &E::Id) -> Option<&'a E> {
    entities.iter().find(|e| e.id() == id)
}

/// Common result type for vault operations
pub type VaultResult<T> = Result<T, VaultError>;

/// Required-field failures raised by the add/edit form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationError {
    MissingTitle,
    MissingUrl,
    MissingFile,
    FileTooLarge { size: u64, limit: u64 },
}

impl ValidationError {
    /// Inline message shown next to the form
    pub fn user_message(&self) -> String {
        match self {
            ValidationError::MissingTitle => "Enter a title.".to_string(),
            ValidationError::MissingUrl => "Enter a URL.".to_string(),
            ValidationError::MissingFile => "Choose a file to upload.".to_string(),
            ValidationError::FileTooLarge { limit, .. } => format!(
                "File is too large for local storage (limit {} KB).",
                limit / 1024
            ),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::MissingTitle => write!(f, "title is required"),
            ValidationError::MissingUrl => write!(f, "url is required"),
            ValidationError::MissingFile => write!(f, "file is required"),
            ValidationError::FileTooLarge { size, limit } => {
                write!(f, "file of {} bytes exceeds limit of {} bytes", size, limit)
            }
        }
    }
}

/// Vault-level errors
#[derive(Debug, Clone, PartialEq)]
pub enum VaultError {
    Validation(ValidationError),
    Auth(AuthError),
    Storage(String),
    Upload(String),
    NotFound(String),
    Serialization(String),
}

impl VaultError {
    /// Text for the toast notification. Storage failures stay generic.
    pub fn user_message(&self) -> String {
        match self {
            VaultError::Validation(e) => e.user_message(),
            VaultError::Auth(e) => e.user_message().to_string(),
            VaultError::Upload(_) => "File upload failed. Nothing was saved.".to_string(),
            VaultError::NotFound(_) => "This item no longer exists.".to_string(),
            VaultError::Storage(_) | VaultError::Serialization(_) => {
                "Something went wrong while saving. Please try again.".to_string()
            }
        }
    }
}

impl std::fmt::Display for VaultError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VaultError::Validation(e) => write!(f, "Validation failed: {}", e),
            VaultError::Auth(e) => write!(f, "Auth error: {}", e),
            VaultError::Storage(msg) => write!(f, "Storage error: {}", msg),
            VaultError::Upload(msg) => write!(f, "Upload error: {}", msg),
            VaultError::NotFound(msg) => write!(f, "Not found: {}", msg),
            VaultError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl std::error::Error for VaultError {}

impl From<ValidationError> for VaultError {
    fn from(e: ValidationError) -> Self {
        VaultError::Validation(e)
    }
}

impl From<AuthError> for VaultError {
    fn from(e: AuthError) -> Self {
        VaultError::Auth(e)
    }
}

impl From<serde_json::Error> for VaultError {
    fn from(e: serde_json::Error) -> Self {
        VaultError::Serialization(e.to_string())
    }
}
