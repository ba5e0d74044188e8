//! Uniform response envelope for service results.

use super::{InternList, InternServiceError, InternServiceResult};
use crate::intern::domain::Intern;
use serde::Serialize;

/// Public failure categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Input was rejected before storage was touched.
    Validation,
    /// The intern or task does not exist.
    NotFound,
    /// Storage failed; the message is passed through.
    Storage,
}

/// Envelope returned to callers for every operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceResponse<T> {
    /// Whether the operation succeeded.
    pub success: bool,
    /// Payload on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Number of matching records, for listings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
    /// Confirmation shown for successful writes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Failure message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Failure category.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<ErrorKind>,
}

impl<T> ServiceResponse<T> {
    /// Wraps a successful payload.
    #[must_use]
    pub const fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            total: None,
            message: None,
            error: None,
            kind: None,
        }
    }

    /// Describes a failure.
    #[must_use]
    pub fn failure(error: &InternServiceError) -> Self {
        Self {
            success: false,
            data: None,
            total: None,
            message: None,
            error: Some(error.to_string()),
            kind: Some(error.kind()),
        }
    }

    /// Attaches a confirmation message to a successful response.
    ///
    /// Failures are returned unchanged.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        if self.success {
            self.message = Some(message.into());
        }
        self
    }
}

impl<T> From<InternServiceResult<T>> for ServiceResponse<T> {
    fn from(result: InternServiceResult<T>) -> Self {
        result.map_or_else(|err| Self::failure(&err), Self::ok)
    }
}

impl ServiceResponse<Intern> {
    /// Wraps the result of a create call.
    #[must_use]
    pub fn created(result: InternServiceResult<Intern>) -> Self {
        Self::from(result).with_message("Intern created successfully")
    }

    /// Wraps the result of an update call.
    #[must_use]
    pub fn updated(result: InternServiceResult<Intern>) -> Self {
        Self::from(result).with_message("Intern updated successfully")
    }
}

impl ServiceResponse<()> {
    /// Wraps the result of a delete call, which carries no payload.
    #[must_use]
    pub fn deleted(result: InternServiceResult<()>) -> Self {
        match result {
            Ok(()) => Self {
                data: None,
                ..Self::ok(())
            }
            .with_message("Intern deleted successfully"),
            Err(err) => Self::failure(&err),
        }
    }
}

impl ServiceResponse<Vec<Intern>> {
    /// Wraps a listing, carrying its total alongside the page.
    #[must_use]
    pub fn from_list(result: InternServiceResult<InternList>) -> Self {
        match result {
            Ok(InternList { interns, total }) => Self {
                total: Some(total),
                ..Self::ok(interns)
            },
            Err(err) => Self::failure(&err),
        }
    }
}
