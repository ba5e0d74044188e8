//! Intern records as stored and as presented to callers.

use super::{InternId, StorageValue, Task, TaskEntry, decode};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Mutable intern fields as held by storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InternFields {
    /// Intern display name.
    pub name: String,
    /// Batch the intern belongs to.
    pub batch: String,
    /// Roles held by the intern.
    pub roles: Vec<String>,
    /// Projects the intern is working on.
    pub current_projects: Vec<String>,
    /// Stored task list in whichever shape it was written.
    pub tasks_assigned: StorageValue,
}

impl InternFields {
    /// Creates fields with a name and batch and no roles, projects or tasks.
    #[must_use]
    pub fn new(name: impl Into<String>, batch: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            batch: batch.into(),
            roles: Vec::new(),
            current_projects: Vec::new(),
            tasks_assigned: StorageValue::Empty,
        }
    }

    /// Sets roles.
    #[must_use]
    pub fn with_roles(mut self, roles: impl IntoIterator<Item = String>) -> Self {
        self.roles = roles.into_iter().collect();
        self
    }

    /// Sets current projects.
    #[must_use]
    pub fn with_current_projects(mut self, projects: impl IntoIterator<Item = String>) -> Self {
        self.current_projects = projects.into_iter().collect();
        self
    }

    /// Sets the stored task list.
    #[must_use]
    pub fn with_tasks_assigned(mut self, tasks_assigned: StorageValue) -> Self {
        self.tasks_assigned = tasks_assigned;
        self
    }
}

/// Intern record exactly as returned by storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InternRecord {
    /// Record identifier.
    pub id: InternId,
    /// Record fields.
    pub fields: InternFields,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl InternRecord {
    /// Creates a record whose creation and update timestamps are equal.
    #[must_use]
    pub const fn new(id: InternId, fields: InternFields, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            fields,
            created_at,
            updated_at: created_at,
        }
    }
}

/// Partial update of an intern record.
///
/// `None` leaves the stored field unchanged. A present task list replaces
/// the stored list wholesale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InternPatch {
    /// Replacement name.
    pub name: Option<String>,
    /// Replacement batch.
    pub batch: Option<String>,
    /// Replacement roles.
    pub roles: Option<Vec<String>>,
    /// Replacement projects.
    pub current_projects: Option<Vec<String>>,
    /// Replacement task list.
    pub tasks_assigned: Option<StorageValue>,
    /// Update timestamp to store.
    pub updated_at: DateTime<Utc>,
}

impl InternPatch {
    /// Creates a patch that only refreshes the update timestamp.
    #[must_use]
    pub const fn touch(updated_at: DateTime<Utc>) -> Self {
        Self {
            name: None,
            batch: None,
            roles: None,
            current_projects: None,
            tasks_assigned: None,
            updated_at,
        }
    }

    /// Sets the replacement task list.
    #[must_use]
    pub fn with_tasks_assigned(mut self, tasks_assigned: StorageValue) -> Self {
        self.tasks_assigned = Some(tasks_assigned);
        self
    }

    /// Applies the patch to a stored record.
    pub fn apply_to(&self, record: &mut InternRecord) {
        let fields = &mut record.fields;
        if let Some(name) = &self.name {
            fields.name.clone_from(name);
        }
        if let Some(batch) = &self.batch {
            fields.batch.clone_from(batch);
        }
        if let Some(roles) = &self.roles {
            fields.roles.clone_from(roles);
        }
        if let Some(projects) = &self.current_projects {
            fields.current_projects.clone_from(projects);
        }
        if let Some(tasks_assigned) = &self.tasks_assigned {
            fields.tasks_assigned.clone_from(tasks_assigned);
        }
        record.updated_at = self.updated_at;
    }
}

/// Intern as presented to callers, with the task list decoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Intern {
    /// Record identifier.
    pub id: InternId,
    /// Intern display name.
    #[serde(rename = "internName")]
    pub name: String,
    /// Batch the intern belongs to.
    pub batch: String,
    /// Roles held by the intern.
    pub roles: Vec<String>,
    /// Projects the intern is working on.
    pub current_projects: Vec<String>,
    /// Decoded task list, including opaque legacy entries.
    pub tasks_assigned: Vec<TaskEntry>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Intern {
    /// Returns the well-formed tasks, skipping opaque or partial entries.
    #[must_use]
    pub fn tasks(&self) -> Vec<Task> {
        self.tasks_assigned
            .iter()
            .filter_map(TaskEntry::to_task)
            .collect()
    }
}

impl From<InternRecord> for Intern {
    fn from(record: InternRecord) -> Self {
        let InternRecord {
            id,
            fields,
            created_at,
            updated_at,
        } = record;
        let tasks_assigned = decode(&fields.tasks_assigned);

        Self {
            id,
            name: fields.name,
            batch: fields.batch,
            roles: fields.roles,
            current_projects: fields.current_projects,
            tasks_assigned,
            created_at,
            updated_at,
        }
    }
}
