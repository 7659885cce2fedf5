//! Service layer error types
//!
//! Provides a unified error type for all service operations.

use ban_common::AppError;
use ban_core::DomainError;
use std::fmt;
use validator::ValidationErrors;

/// Service layer error type
#[derive(Debug)]
pub enum ServiceError {
    /// Domain rule violation or storage failure
    Domain(DomainError),

    /// Application error (config, bootstrap)
    App(AppError),

    /// Resource not found
    NotFound { resource: &'static str, id: String },

    /// Request validation error
    Validation(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Domain(e) => write!(f, "{e}"),
            Self::App(e) => write!(f, "{e}"),
            Self::NotFound { resource, id } => write!(f, "{resource} not found: {id}"),
            Self::Validation(msg) => write!(f, "Validation error: {msg}"),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Domain(e) => Some(e),
            Self::App(e) => Some(e),
            _ => None,
        }
    }
}

impl ServiceError {
    /// Create a not found error
    pub fn not_found(resource: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource,
            id: id.into(),
        }
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// The record was rejected before reaching storage
    pub fn is_validation(&self) -> bool {
        match self {
            Self::Domain(e) => e.is_validation(),
            Self::Validation(_) => true,
            _ => false,
        }
    }

    /// Storage could not complete the request
    pub fn is_storage_unavailable(&self) -> bool {
        matches!(self, Self::Domain(e) if e.is_storage())
    }

    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Domain(e) => e.is_not_found(),
            Self::NotFound { .. } => true,
            _ => false,
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Domain(e) => {
                if e.is_not_found() {
                    404
                } else if e.is_validation() {
                    400
                } else if e.is_storage() {
                    503
                } else {
                    500
                }
            }
            Self::App(e) => e.status_code(),
            Self::NotFound { .. } => 404,
            Self::Validation(_) => 400,
        }
    }

    /// Get the error code for API responses
    pub fn error_code(&self) -> &str {
        match self {
            Self::Domain(e) => e.code(),
            Self::App(e) => e.error_code(),
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
        }
    }
}

impl From<DomainError> for ServiceError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

impl From<AppError> for ServiceError {
    fn from(err: AppError) -> Self {
        Self::App(err)
    }
}

impl From<ValidationErrors> for ServiceError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors.to_string())
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Domain(e) => AppError::Domain(e),
            ServiceError::App(e) => e,
            ServiceError::NotFound { resource, id } => {
                AppError::NotFound(format!("{resource} {id}"))
            }
            ServiceError::Validation(msg) => AppError::Validation(msg),
        }
    }
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;
