//! Domain Layer - Core Entity Trait
//!
//! This trait defines the basic contract for all domain entities.
//! All entities have a unique, copyable ID.

use serde::{Deserialize, Serialize};

/// Core trait for all domain entities
pub trait Entity: Sized + Clone {
    /// The type of the entity's unique identifier
    type Id: Copy + Eq + std::hash::Hash;

    /// Returns the entity's unique identifier
    fn id(&self) -> Self::Id;
}

/// Common result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level errors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum DomainError {
    /// Malformed input, e.g. an empty title or name
    #[error("Invalid input: {0}")]
    Validation(String),
    /// The operation targets an id that does not exist
    #[error("Not found: {0}")]
    NotFound(String),
    /// Opaque failure from the identity provider, one message per provider error
    #[error("Authentication failed: {}", .0.join("; "))]
    ExternalAuth(Vec<String>),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn is_validation(&self) -> bool {
        matches!(self, DomainError::Validation(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, DomainError::NotFound(_))
    }

    /// Messages suitable for rendering as a list under a form
    pub fn messages(&self) -> Vec<String> {
        match self {
            DomainError::ExternalAuth(messages) if !messages.is_empty() => messages.clone(),
            other => vec![other.to_string()],
        }
    }
}

/// Reject empty or whitespace-only display text.
/// `field` names the offending field in the error message.
pub fn validate_text(field: &str, value: &str) -> DomainResult<()> {
    if value.trim().is_empty() {
        return Err(DomainError::Validation(format!("{} must not be empty", field)));
    }
    Ok(())
}
