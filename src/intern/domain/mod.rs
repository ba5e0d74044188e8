//! Domain model for intern records and task lists.
//!
//! The domain covers task validation, the storage codec for task lists,
//! status aggregation and list queries. Persistence, routing and
//! environment concerns stay outside the domain boundary.

mod codec;
mod error;
mod ids;
mod intern;
mod query;
mod status;
mod summary;
mod task;

pub use codec::{
    StorageValue, TaskEntry, decode, decode_for_rewrite, decode_tasks, encode_entries,
    encode_tasks,
};
pub use error::ValidationError;
pub use ids::{IdGenerator, InternId, TaskId, UuidIdGenerator};
pub use intern::{Intern, InternFields, InternPatch, InternRecord};
pub use query::{InternQuery, InternSort, SortField, SortOrder};
pub use status::TaskStatus;
pub use summary::{StatusCounts, TaskSummary, summarize};
pub use task::{Task, TaskInput};
