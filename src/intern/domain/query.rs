//! Listing filters for intern records.

use super::ValidationError;
use serde::{Deserialize, Serialize};

/// Sortable intern fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    /// Intern name.
    Name,
    /// Batch identifier.
    Batch,
    /// Record creation time.
    CreatedAt,
    /// Record update time.
    UpdatedAt,
}

impl TryFrom<&str> for SortField {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "name" | "internName" => Ok(Self::Name),
            "batch" => Ok(Self::Batch),
            "createdAt" | "$createdAt" => Ok(Self::CreatedAt),
            "updatedAt" | "$updatedAt" => Ok(Self::UpdatedAt),
            _ => Err(ValidationError::UnknownSortField(value.to_owned())),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Smallest first.
    #[default]
    Asc,
    /// Largest first.
    Desc,
}

impl SortOrder {
    /// Parses a request parameter: `desc` selects descending order and any
    /// other value ascending.
    #[must_use]
    pub fn from_param(value: &str) -> Self {
        if value == "desc" {
            Self::Desc
        } else {
            Self::Asc
        }
    }
}

/// Single-field ordering of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InternSort {
    /// Field to sort by.
    pub field: SortField,
    /// Sort direction.
    pub order: SortOrder,
}

/// Filters applied when listing intern records.
///
/// `total` on a listing counts every match regardless of `limit` and
/// `offset`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InternQuery {
    /// Exact batch match.
    pub batch: Option<String>,
    /// Case-insensitive substring of the intern name.
    pub search: Option<String>,
    /// Maximum number of records to return.
    pub limit: Option<usize>,
    /// Number of matching records to skip.
    pub offset: Option<usize>,
    /// Ordering; storage order applies when absent.
    pub sort: Option<InternSort>,
}

impl InternQuery {
    /// Creates a query that matches every record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts the listing to one batch.
    #[must_use]
    pub fn with_batch(mut self, batch: impl Into<String>) -> Self {
        self.batch = Some(batch.into());
        self
    }

    /// Restricts the listing to names containing `search`.
    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Limits the number of returned records.
    #[must_use]
    pub const fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Skips the first `offset` matching records.
    #[must_use]
    pub const fn with_offset(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Orders the listing by one field.
    #[must_use]
    pub const fn with_sort(mut self, field: SortField, order: SortOrder) -> Self {
        self.sort = Some(InternSort { field, order });
        self
    }
}
