//! Status aggregation across intern records.

use super::{InternRecord, TaskStatus, decode};
use serde::{Deserialize, Serialize};

/// Per-status task counters.
///
/// Every status is always present, including those with a zero count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    /// Tasks with status `open`.
    pub open: u64,
    /// Tasks with status `completed`.
    pub completed: u64,
    /// Tasks with status `todo`.
    pub todo: u64,
    /// Tasks with status `working`.
    pub working: u64,
    /// Tasks with status `deferred`.
    pub deferred: u64,
    /// Tasks with status `pending`.
    pub pending: u64,
}

impl StatusCounts {
    /// Returns the counter for `status`.
    #[must_use]
    pub const fn get(&self, status: TaskStatus) -> u64 {
        match status {
            TaskStatus::Open => self.open,
            TaskStatus::Completed => self.completed,
            TaskStatus::Todo => self.todo,
            TaskStatus::Working => self.working,
            TaskStatus::Deferred => self.deferred,
            TaskStatus::Pending => self.pending,
        }
    }

    /// Iterates over `(status, count)` pairs in canonical status order.
    pub fn iter(&self) -> impl Iterator<Item = (TaskStatus, u64)> + '_ {
        TaskStatus::ALL
            .into_iter()
            .map(move |status| (status, self.get(status)))
    }

    const fn slot_mut(&mut self, status: TaskStatus) -> &mut u64 {
        match status {
            TaskStatus::Open => &mut self.open,
            TaskStatus::Completed => &mut self.completed,
            TaskStatus::Todo => &mut self.todo,
            TaskStatus::Working => &mut self.working,
            TaskStatus::Deferred => &mut self.deferred,
            TaskStatus::Pending => &mut self.pending,
        }
    }
}

/// Task status histogram over a set of intern records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSummary {
    /// Per-status counters.
    pub counts: StatusCounts,
    /// Number of tasks counted across all statuses.
    pub total: u64,
}

impl TaskSummary {
    /// Counts one task with the given status.
    pub const fn record(&mut self, status: TaskStatus) {
        *self.counts.slot_mut(status) += 1;
        self.total += 1;
    }
}

/// Folds the task lists of `records` into a status histogram.
///
/// Opaque entries, records without a status, and records with an unknown
/// status are skipped.
#[must_use]
pub fn summarize(records: &[InternRecord]) -> TaskSummary {
    records
        .iter()
        .flat_map(|record| decode(&record.fields.tasks_assigned))
        .filter_map(|entry| entry.status())
        .fold(TaskSummary::default(), |mut summary, status| {
            summary.record(status);
            summary
        })
}
