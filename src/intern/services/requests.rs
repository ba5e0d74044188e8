//! Request payloads accepted by the intern service.

use crate::intern::domain::{InternQuery, SortField, SortOrder, TaskInput, ValidationError};
use serde::Deserialize;

/// Request payload for creating an intern record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInternRequest {
    /// Caller-chosen record identifier; generated when absent or empty.
    #[serde(default)]
    pub document_id: Option<String>,
    /// Intern display name.
    #[serde(rename = "internName", default)]
    pub name: String,
    /// Batch the intern belongs to.
    #[serde(default)]
    pub batch: String,
    /// Roles held by the intern.
    #[serde(default)]
    pub roles: Vec<String>,
    /// Projects the intern is working on.
    #[serde(default)]
    pub current_projects: Vec<String>,
    /// Raw tasks, normalized before storage.
    #[serde(default)]
    pub tasks_assigned: Vec<TaskInput>,
}

impl CreateInternRequest {
    /// Creates a request with the required name and batch.
    #[must_use]
    pub fn new(name: impl Into<String>, batch: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            batch: batch.into(),
            ..Self::default()
        }
    }

    /// Sets the record identifier to use instead of a generated one.
    #[must_use]
    pub fn with_document_id(mut self, document_id: impl Into<String>) -> Self {
        self.document_id = Some(document_id.into());
        self
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

    /// Sets the raw tasks.
    #[must_use]
    pub fn with_tasks(mut self, tasks: impl IntoIterator<Item = TaskInput>) -> Self {
        self.tasks_assigned = tasks.into_iter().collect();
        self
    }
}

/// Request payload for a partial intern update.
///
/// Empty strings are treated like absent fields. Present lists replace the
/// stored lists, including when they are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInternRequest {
    /// Replacement name.
    #[serde(rename = "internName", default)]
    pub name: Option<String>,
    /// Replacement batch.
    #[serde(default)]
    pub batch: Option<String>,
    /// Replacement roles.
    #[serde(default)]
    pub roles: Option<Vec<String>>,
    /// Replacement projects.
    #[serde(default)]
    pub current_projects: Option<Vec<String>>,
    /// Replacement raw tasks, normalized before storage.
    #[serde(default)]
    pub tasks_assigned: Option<Vec<TaskInput>>,
}

impl UpdateInternRequest {
    /// Creates a request that changes nothing but the update timestamp.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the replacement name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the replacement batch.
    #[must_use]
    pub fn with_batch(mut self, batch: impl Into<String>) -> Self {
        self.batch = Some(batch.into());
        self
    }

    /// Sets the replacement roles.
    #[must_use]
    pub fn with_roles(mut self, roles: impl IntoIterator<Item = String>) -> Self {
        self.roles = Some(roles.into_iter().collect());
        self
    }

    /// Sets the replacement projects.
    #[must_use]
    pub fn with_current_projects(mut self, projects: impl IntoIterator<Item = String>) -> Self {
        self.current_projects = Some(projects.into_iter().collect());
        self
    }

    /// Sets the replacement raw tasks.
    #[must_use]
    pub fn with_tasks(mut self, tasks: impl IntoIterator<Item = TaskInput>) -> Self {
        self.tasks_assigned = Some(tasks.into_iter().collect());
        self
    }
}

/// Listing parameters as received from a caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListInternsRequest {
    /// Exact batch filter.
    #[serde(default)]
    pub batch: Option<String>,
    /// Case-insensitive name substring.
    #[serde(default)]
    pub search: Option<String>,
    /// Page size.
    #[serde(default)]
    pub limit: Option<usize>,
    /// Number of matches to skip.
    #[serde(default)]
    pub offset: Option<usize>,
    /// Field to sort by.
    #[serde(default)]
    pub sort: Option<String>,
    /// `desc` for descending order; anything else sorts ascending.
    #[serde(default)]
    pub order: Option<String>,
}

impl ListInternsRequest {
    /// Creates a request that lists every intern.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Filters by batch.
    #[must_use]
    pub fn with_batch(mut self, batch: impl Into<String>) -> Self {
        self.batch = Some(batch.into());
        self
    }

    /// Filters by name substring.
    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Limits the page size.
    #[must_use]
    pub const fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Skips leading matches.
    #[must_use]
    pub const fn with_offset(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Sorts by `sort` in `order`.
    #[must_use]
    pub fn with_sort(mut self, sort: impl Into<String>, order: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self.order = Some(order.into());
        self
    }

    /// Translates the parameters into a storage query.
    ///
    /// Empty filter strings are ignored. Sorting applies only when both
    /// `sort` and `order` are given.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnknownSortField`] when `sort` names a
    /// field that cannot be sorted on.
    pub fn into_query(self) -> Result<InternQuery, ValidationError> {
        let mut query = InternQuery::new();
        if let Some(batch) = non_empty(self.batch) {
            query = query.with_batch(batch);
        }
        if let Some(search) = non_empty(self.search) {
            query = query.with_search(search);
        }
        if let Some(limit) = self.limit {
            query = query.with_limit(limit);
        }
        if let Some(offset) = self.offset {
            query = query.with_offset(offset);
        }
        if let (Some(sort), Some(order)) = (non_empty(self.sort), non_empty(self.order)) {
            let field = SortField::try_from(sort.as_str())?;
            query = query.with_sort(field, SortOrder::from_param(&order));
        }
        Ok(query)
    }
}

pub(super) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}
