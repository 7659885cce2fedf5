//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::{BanId, UserId};

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Ban not found: {0}")]
    BanNotFound(BanId),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Ban references a user that does not exist: {0}")]
    InvalidIdentity(UserId),

    #[error("Ban has neither a user nor an IP address")]
    OrphanedBan,

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Malformed metadata in {field}: {reason}")]
    MalformedMetadata { field: &'static str, reason: String },

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::BanNotFound(_) => "UNKNOWN_BAN",

            Self::InvalidIdentity(_) => "INVALID_IDENTITY",
            Self::OrphanedBan => "ORPHANED_BAN",
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::MalformedMetadata { .. } => "MALFORMED_METADATA",

            Self::StorageUnavailable(_) => "STORAGE_UNAVAILABLE",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::BanNotFound(_))
    }

    /// Check if this is a validation error (the record was rejected before storage)
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidIdentity(_)
                | Self::OrphanedBan
                | Self::ValidationError(_)
                | Self::MalformedMetadata { .. }
        )
    }

    /// Check if the storage collaborator failed
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::StorageUnavailable(_))
    }
}
