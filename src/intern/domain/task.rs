//! Canonical task records and task normalization.

use super::{IdGenerator, TaskId, TaskStatus, ValidationError};
use chrono::{DateTime, SecondsFormat, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Loosely-typed task input as supplied by callers.
///
/// Every field is optional so that missing values can be reported as
/// validation errors rather than deserialization failures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskInput {
    /// Existing task identifier, kept when present and non-empty.
    #[serde(default)]
    pub id: Option<String>,
    /// Task title.
    #[serde(default)]
    pub title: Option<String>,
    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,
    /// Raw status string, validated against [`TaskStatus`].
    #[serde(default)]
    pub status: Option<String>,
    /// Original assignment time, kept when present.
    #[serde(default)]
    pub assigned_at: Option<DateTime<Utc>>,
}

impl TaskInput {
    /// Creates input with a title and a raw status.
    #[must_use]
    pub fn new(title: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            status: Some(status.into()),
            ..Self::default()
        }
    }

    /// Sets the task identifier.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the task description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the original assignment time.
    #[must_use]
    pub const fn with_assigned_at(mut self, assigned_at: DateTime<Utc>) -> Self {
        self.assigned_at = Some(assigned_at);
        self
    }
}

/// Canonical task embedded in an intern record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    id: TaskId,
    title: String,
    #[serde(default)]
    description: String,
    status: TaskStatus,
    assigned_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Task {
    /// Validates raw input and produces a canonical task.
    ///
    /// `updated_at` is always set to the current clock time, even when the
    /// input describes an existing task. Identifier generation and clock
    /// reads happen only after validation succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingTitle`] when the title is missing
    /// or empty, [`ValidationError::MissingStatus`] when the status is
    /// missing or empty, and [`ValidationError::InvalidStatus`] when the
    /// status is not a known value.
    pub fn normalize(
        input: TaskInput,
        ids: &impl IdGenerator,
        clock: &impl Clock,
    ) -> Result<Self, ValidationError> {
        let TaskInput {
            id: raw_id,
            title: raw_title,
            description,
            status: raw_status,
            assigned_at,
        } = input;

        let title = raw_title
            .filter(|value| !value.is_empty())
            .ok_or(ValidationError::MissingTitle)?;
        let status_value = raw_status
            .filter(|value| !value.is_empty())
            .ok_or(ValidationError::MissingStatus)?;
        let status = TaskStatus::try_from(status_value.as_str())?;

        let now = clock.utc();
        let id = raw_id
            .filter(|value| !value.is_empty())
            .map_or_else(|| TaskId::new(ids.generate()), TaskId::new);

        Ok(Self {
            id,
            title,
            description: description.unwrap_or_default(),
            status,
            assigned_at: assigned_at.unwrap_or(now),
            updated_at: now,
        })
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> &TaskId {
        &self.id
    }

    /// Returns the task title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the task description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the task status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the assignment timestamp.
    #[must_use]
    pub const fn assigned_at(&self) -> DateTime<Utc> {
        self.assigned_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the native stored shape of this task.
    #[must_use]
    pub fn to_json_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("id".to_owned(), Value::String(self.id.as_str().to_owned()));
        map.insert("title".to_owned(), Value::String(self.title.clone()));
        map.insert(
            "description".to_owned(),
            Value::String(self.description.clone()),
        );
        map.insert(
            "status".to_owned(),
            Value::String(self.status.as_str().to_owned()),
        );
        map.insert("assignedAt".to_owned(), timestamp_value(self.assigned_at));
        map.insert("updatedAt".to_owned(), timestamp_value(self.updated_at));
        map
    }
}

/// Formats a timestamp the way task records store it.
pub(super) fn timestamp_value(timestamp: DateTime<Utc>) -> Value {
    Value::String(timestamp.to_rfc3339_opts(SecondsFormat::AutoSi, true))
}
