//! Diesel row models for intern record persistence.

use super::schema::interns;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Query result row for intern records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = interns)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct InternRow {
    /// Record identifier.
    pub id: String,
    /// Intern display name.
    pub intern_name: String,
    /// Batch identifier.
    pub batch: String,
    /// Roles JSON payload.
    pub roles: Value,
    /// Current projects JSON payload.
    pub current_projects: Value,
    /// Task list JSON payload, in whichever shape it was written.
    pub tasks_assigned: Option<Value>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for intern records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = interns)]
pub struct NewInternRow {
    /// Record identifier.
    pub id: String,
    /// Intern display name.
    pub intern_name: String,
    /// Batch identifier.
    pub batch: String,
    /// Roles JSON payload.
    pub roles: Value,
    /// Current projects JSON payload.
    pub current_projects: Value,
    /// Task list JSON payload.
    pub tasks_assigned: Option<Value>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Partial update model; `None` fields are left untouched.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = interns)]
pub struct InternChangeset {
    /// Replacement name.
    pub intern_name: Option<String>,
    /// Replacement batch.
    pub batch: Option<String>,
    /// Replacement roles.
    pub roles: Option<Value>,
    /// Replacement projects.
    pub current_projects: Option<Value>,
    /// Replacement task list; `Some(None)` clears the column.
    pub tasks_assigned: Option<Option<Value>>,
    /// Update timestamp.
    pub updated_at: DateTime<Utc>,
}
