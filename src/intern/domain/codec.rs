//! Stored task-list representation and its codec.
//!
//! Three encodings of `tasksAssigned` coexist in persisted data:
//!
//! 1. a single JSON string holding an array of task objects (legacy);
//! 2. a list whose elements are JSON strings of one task object each;
//! 3. a list of task objects.
//!
//! [`decode`] reads all three and never fails. [`decode_for_rewrite`] is
//! its counterpart for read-modify-write paths. [`encode_tasks`] and
//! [`encode_entries`] always emit the third shape.

use super::{Task, TaskStatus, task::timestamp_value};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

/// Stored value of an intern's `tasksAssigned` field.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum StorageValue {
    /// Field absent or null.
    #[default]
    Empty,
    /// Whole list encoded as one JSON string.
    LegacyJsonString(String),
    /// List of task objects, JSON-encoded task strings, or a mix of both.
    ListOfMixed(Vec<Value>),
}

impl StorageValue {
    /// Returns whether the stored value holds no list at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

impl From<Value> for StorageValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Empty,
            Value::String(raw) => Self::LegacyJsonString(raw),
            Value::Array(items) => Self::ListOfMixed(items),
            other => {
                debug!(shape = json_kind(&other), "unsupported tasksAssigned shape");
                Self::Empty
            }
        }
    }
}

impl From<StorageValue> for Value {
    fn from(value: StorageValue) -> Self {
        match value {
            StorageValue::Empty => Self::Null,
            StorageValue::LegacyJsonString(raw) => Self::String(raw),
            StorageValue::ListOfMixed(items) => Self::Array(items),
        }
    }
}

/// One decoded element of a task list.
///
/// Elements are not validated: a record may lack fields or carry an
/// unknown status. Strings that could not be parsed are kept as opaque
/// values so that rewriting a list never drops data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TaskEntry {
    /// Object-shaped task data.
    Record(Map<String, Value>),
    /// Anything that is not a task object.
    Opaque(Value),
}

impl TaskEntry {
    /// Returns the object fields when this entry is object-shaped.
    #[must_use]
    pub const fn as_record(&self) -> Option<&Map<String, Value>> {
        match self {
            Self::Record(fields) => Some(fields),
            Self::Opaque(_) => None,
        }
    }

    /// Returns the `id` field when present and a string.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.as_record()?.get("id")?.as_str()
    }

    /// Returns the status when present and one of the known values.
    #[must_use]
    pub fn status(&self) -> Option<TaskStatus> {
        let raw = self.as_record()?.get("status")?.as_str()?;
        TaskStatus::try_from(raw).ok()
    }

    /// Converts a well-formed record into a [`Task`].
    ///
    /// Returns `None` for opaque entries and records missing required
    /// fields.
    #[must_use]
    pub fn to_task(&self) -> Option<Task> {
        let fields = self.as_record()?.clone();
        serde_json::from_value(Value::Object(fields)).ok()
    }

    /// Overwrites the status and refreshes `updatedAt`, leaving every other
    /// field untouched.
    ///
    /// Returns `false` for opaque entries, which have no fields to update.
    pub fn set_status(&mut self, status: TaskStatus, updated_at: DateTime<Utc>) -> bool {
        match self {
            Self::Record(fields) => {
                fields.insert(
                    "status".to_owned(),
                    Value::String(status.as_str().to_owned()),
                );
                fields.insert("updatedAt".to_owned(), timestamp_value(updated_at));
                true
            }
            Self::Opaque(_) => false,
        }
    }

    /// Returns the stored form of this entry.
    #[must_use]
    pub fn into_value(self) -> Value {
        match self {
            Self::Record(fields) => Value::Object(fields),
            Self::Opaque(value) => value,
        }
    }
}

impl From<&Task> for TaskEntry {
    fn from(task: &Task) -> Self {
        Self::Record(task.to_json_map())
    }
}

/// Encodes canonical tasks as a native list of objects.
#[must_use]
pub fn encode_tasks(tasks: &[Task]) -> StorageValue {
    StorageValue::ListOfMixed(
        tasks
            .iter()
            .map(|task| Value::Object(task.to_json_map()))
            .collect(),
    )
}

/// Encodes decoded entries as a native list, keeping opaque entries as
/// they were read.
#[must_use]
pub fn encode_entries(entries: Vec<TaskEntry>) -> StorageValue {
    StorageValue::ListOfMixed(entries.into_iter().map(TaskEntry::into_value).collect())
}

/// Decodes a stored task list, tolerating every historical encoding.
///
/// A legacy string that is not a JSON array decodes to an empty list. A
/// list element that is a string but not a JSON object is kept as an
/// [`TaskEntry::Opaque`] value.
#[must_use]
pub fn decode(stored: &StorageValue) -> Vec<TaskEntry> {
    match stored {
        StorageValue::Empty => Vec::new(),
        StorageValue::LegacyJsonString(raw) => parse_legacy(raw).unwrap_or_else(|| {
            debug!("ignoring unparseable legacy task list");
            Vec::new()
        }),
        StorageValue::ListOfMixed(items) => items.iter().cloned().map(decode_item).collect(),
    }
}

/// Decodes a stored task list that is about to be written back.
///
/// Behaves like [`decode`] except that a legacy string which is not a JSON
/// array is kept whole as a single [`TaskEntry::Opaque`] entry, so the
/// rewritten list still carries it.
#[must_use]
pub fn decode_for_rewrite(stored: &StorageValue) -> Vec<TaskEntry> {
    match stored {
        StorageValue::LegacyJsonString(raw) => parse_legacy(raw).unwrap_or_else(|| {
            debug!("keeping unparseable legacy task list as opaque");
            vec![TaskEntry::Opaque(Value::String(raw.clone()))]
        }),
        StorageValue::Empty | StorageValue::ListOfMixed(_) => decode(stored),
    }
}

/// Decodes a stored task list, keeping only well-formed tasks.
#[must_use]
pub fn decode_tasks(stored: &StorageValue) -> Vec<Task> {
    decode(stored).iter().filter_map(TaskEntry::to_task).collect()
}

fn parse_legacy(raw: &str) -> Option<Vec<TaskEntry>> {
    match serde_json::from_str::<Vec<Value>>(raw) {
        Ok(items) => Some(items.into_iter().map(decode_item).collect()),
        Err(err) => {
            debug!(error = %err, "legacy task list is not a JSON array");
            None
        }
    }
}

fn decode_item(item: Value) -> TaskEntry {
    match item {
        Value::Object(fields) => TaskEntry::Record(fields),
        Value::String(raw) => match serde_json::from_str::<Map<String, Value>>(&raw) {
            Ok(fields) => TaskEntry::Record(fields),
            Err(err) => {
                debug!(error = %err, "keeping unparseable task element as opaque");
                TaskEntry::Opaque(Value::String(raw))
            }
        },
        other => TaskEntry::Opaque(other),
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
