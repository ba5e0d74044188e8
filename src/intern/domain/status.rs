//! Task status values.

use super::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of a task assigned to an intern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    /// Task is open and unclaimed.
    Open,
    /// Task has been completed.
    Completed,
    /// Task is planned but not started.
    Todo,
    /// Task is being worked on.
    Working,
    /// Task has been postponed.
    Deferred,
    /// Task is waiting on something external.
    Pending,
}

impl TaskStatus {
    /// Every status in canonical order.
    pub const ALL: [Self; 6] = [
        Self::Open,
        Self::Completed,
        Self::Todo,
        Self::Working,
        Self::Deferred,
        Self::Pending,
    ];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Completed => "completed",
            Self::Todo => "todo",
            Self::Working => "working",
            Self::Deferred => "deferred",
            Self::Pending => "pending",
        }
    }

    /// Returns every valid status joined with `", "` in canonical order.
    #[must_use]
    pub fn expected_values() -> String {
        Self::ALL
            .iter()
            .map(|status| status.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == value)
            .ok_or_else(|| ValidationError::InvalidStatus(value.to_owned()))
    }
}
