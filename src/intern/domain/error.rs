//! Error types for intern and task validation.

use super::TaskStatus;
use thiserror::Error;

/// Errors returned while validating intern and task input.
///
/// Display strings are part of the observable contract and are returned to
/// callers verbatim.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The task title is missing or empty.
    #[error("title required")]
    MissingTitle,

    /// The task status is missing or empty.
    #[error("status required")]
    MissingStatus,

    /// The task status is not one of the known values.
    #[error("invalid status: {}", TaskStatus::expected_values())]
    InvalidStatus(String),

    /// The intern name is missing or blank.
    #[error("name required")]
    MissingName,

    /// The intern batch is missing or blank.
    #[error("batch required")]
    MissingBatch,

    /// The requested sort field is not sortable.
    #[error("unknown sort field: {0}")]
    UnknownSortField(String),
}
