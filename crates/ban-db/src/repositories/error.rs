//! Error handling utilities for repositories

use ban_core::error::DomainError;
use ban_core::value_objects::BanId;
use sqlx::Error as SqlxError;

/// Convert SQLx error to DomainError.
///
/// Constraint violations and values a column cannot hold are the caller's
/// fault; decode problems are bugs; everything else means the database could
/// not serve the request.
pub fn map_db_error(e: SqlxError) -> DomainError {
    match &e {
        SqlxError::Database(db_err)
            if db_err.is_check_violation()
                || db_err.code().is_some_and(|code| is_rejected_input(&code)) =>
        {
            DomainError::ValidationError(db_err.message().to_string())
        }
        SqlxError::ColumnDecode { .. }
        | SqlxError::ColumnNotFound(_)
        | SqlxError::Decode(_)
        | SqlxError::TypeNotFound { .. } => DomainError::InternalError(e.to_string()),
        _ => DomainError::StorageUnavailable(e.to_string()),
    }
}

/// SQLSTATEs raised for values the column cannot hold:
/// string_data_right_truncation and invalid_text_representation
fn is_rejected_input(code: &str) -> bool {
    matches!(code, "22001" | "22P02")
}

/// Create a "ban not found" error
pub fn ban_not_found(id: BanId) -> DomainError {
    DomainError::BanNotFound(id)
}
