//! Service layer for intern records and their embedded task lists.

use super::requests::{CreateInternRequest, ListInternsRequest, UpdateInternRequest, non_empty};
use super::response::ErrorKind;
use crate::intern::{
    domain::{
        IdGenerator, Intern, InternFields, InternId, InternPatch, InternQuery, InternRecord, Task,
        TaskEntry, TaskId, TaskInput, TaskStatus, TaskSummary, ValidationError,
        decode_for_rewrite, encode_entries, encode_tasks, summarize,
    },
    ports::{InternRepository, InternRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Service-level errors for intern operations.
#[derive(Debug, Error)]
pub enum InternServiceError {
    /// Input validation failed.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The intern exists but holds no task with the requested identifier.
    #[error("task not found")]
    TaskNotFound {
        /// Intern that was searched.
        intern_id: InternId,
        /// Task identifier that was not found.
        task_id: TaskId,
    },

    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] InternRepositoryError),
}

impl InternServiceError {
    /// Returns the public category of this failure.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::TaskNotFound { .. } | Self::Repository(InternRepositoryError::NotFound(_)) => {
                ErrorKind::NotFound
            }
            Self::Repository(_) => ErrorKind::Storage,
        }
    }
}

/// Result type for intern service operations.
pub type InternServiceResult<T> = Result<T, InternServiceError>;

/// One page of interns with the number of matching records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InternList {
    /// Interns on this page.
    pub interns: Vec<Intern>,
    /// Number of interns matching the filters.
    pub total: u64,
}

/// Intern orchestration service.
#[derive(Clone)]
pub struct InternService<R, C, G>
where
    R: InternRepository,
    C: Clock + Send + Sync,
    G: IdGenerator,
{
    repository: Arc<R>,
    clock: Arc<C>,
    ids: Arc<G>,
}

impl<R, C, G> InternService<R, C, G>
where
    R: InternRepository,
    C: Clock + Send + Sync,
    G: IdGenerator,
{
    /// Creates a new intern service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>, ids: Arc<G>) -> Self {
        Self {
            repository,
            clock,
            ids,
        }
    }

    /// Creates an intern record.
    ///
    /// Every task is normalized before anything is written; the first
    /// invalid task aborts the call.
    ///
    /// # Errors
    ///
    /// Returns [`InternServiceError::Validation`] when the name, batch or a
    /// task is invalid, and [`InternServiceError::Repository`] when storage
    /// rejects the record.
    pub async fn create(&self, request: CreateInternRequest) -> InternServiceResult<Intern> {
        let CreateInternRequest {
            document_id,
            name,
            batch,
            roles,
            current_projects,
            tasks_assigned,
        } = request;

        if name.trim().is_empty() {
            return Err(ValidationError::MissingName.into());
        }
        if batch.trim().is_empty() {
            return Err(ValidationError::MissingBatch.into());
        }
        let tasks = self.normalize_all(tasks_assigned)?;

        let raw_id = non_empty(document_id).unwrap_or_else(|| self.ids.generate());
        let intern_id = InternId::new(raw_id);
        let fields = InternFields::new(name, batch)
            .with_roles(roles)
            .with_current_projects(current_projects)
            .with_tasks_assigned(encode_tasks(&tasks));
        let record = InternRecord::new(intern_id, fields, self.clock.utc());

        let stored = self.repository.create(&record).await?;
        info!(intern_id = %stored.id, tasks = tasks.len(), "created intern");
        Ok(stored.into())
    }

    /// Retrieves one intern with its decoded task list.
    ///
    /// # Errors
    ///
    /// Returns [`InternServiceError::Repository`] when the intern does not
    /// exist or storage fails.
    pub async fn get(&self, intern_id: &InternId) -> InternServiceResult<Intern> {
        let record = self.repository.fetch(intern_id).await?;
        Ok(record.into())
    }

    /// Applies a partial update.
    ///
    /// Empty scalar fields are ignored. A present task list is normalized
    /// and replaces the stored list.
    ///
    /// # Errors
    ///
    /// Returns [`InternServiceError::Validation`] when a task is invalid,
    /// and [`InternServiceError::Repository`] when the intern does not exist
    /// or storage fails.
    pub async fn update(
        &self,
        intern_id: &InternId,
        request: UpdateInternRequest,
    ) -> InternServiceResult<Intern> {
        let tasks = request
            .tasks_assigned
            .map(|inputs| self.normalize_all(inputs))
            .transpose()?;

        let mut patch = InternPatch::touch(self.clock.utc());
        patch.name = non_empty(request.name);
        patch.batch = non_empty(request.batch);
        patch.roles = request.roles;
        patch.current_projects = request.current_projects;
        patch.tasks_assigned = tasks.as_deref().map(encode_tasks);

        let updated = self.repository.update(intern_id, &patch).await?;
        debug!(intern_id = %intern_id, "updated intern");
        Ok(updated.into())
    }

    /// Deletes an intern.
    ///
    /// # Errors
    ///
    /// Returns [`InternServiceError::Repository`] when the intern does not
    /// exist or storage fails.
    pub async fn delete(&self, intern_id: &InternId) -> InternServiceResult<()> {
        self.repository.delete(intern_id).await?;
        info!(intern_id = %intern_id, "deleted intern");
        Ok(())
    }

    /// Lists interns matching the request filters.
    ///
    /// # Errors
    ///
    /// Returns [`InternServiceError::Validation`] for an unknown sort field
    /// and [`InternServiceError::Repository`] when storage fails.
    pub async fn list(&self, request: ListInternsRequest) -> InternServiceResult<InternList> {
        let query = request.into_query()?;
        let page = self.repository.list(&query).await?;
        debug!(total = page.total, returned = page.records.len(), "listed interns");
        Ok(InternList {
            interns: page.records.into_iter().map(Intern::from).collect(),
            total: page.total,
        })
    }

    /// Counts every stored intern.
    ///
    /// # Errors
    ///
    /// Returns [`InternServiceError::Repository`] when storage fails.
    pub async fn count(&self) -> InternServiceResult<u64> {
        let page = self
            .repository
            .list(&InternQuery::new().with_limit(1))
            .await?;
        Ok(page.total)
    }

    /// Counts tasks by status across every intern.
    ///
    /// Entries without a known status are left out of the counts and the
    /// total.
    ///
    /// # Errors
    ///
    /// Returns [`InternServiceError::Repository`] when storage fails.
    pub async fn task_summary(&self) -> InternServiceResult<TaskSummary> {
        let page = self.repository.list(&InternQuery::new()).await?;
        let summary = summarize(&page.records);
        debug!(
            interns = page.records.len(),
            tasks = summary.total,
            "summarized task statuses"
        );
        Ok(summary)
    }

    /// Changes the status of one task and refreshes its `updatedAt`.
    ///
    /// Other tasks and every other field of the changed task are written
    /// back unchanged and in order. The stored list is rewritten as a whole
    /// without a revision check, so a concurrent update of the same intern
    /// may be lost.
    ///
    /// # Errors
    ///
    /// Returns [`InternServiceError::Validation`] for an unknown status
    /// before storage is read, [`InternServiceError::TaskNotFound`] when no
    /// task has `task_id`, and [`InternServiceError::Repository`] when the
    /// intern does not exist or storage fails.
    pub async fn update_task_status(
        &self,
        intern_id: &InternId,
        task_id: &str,
        status: &str,
    ) -> InternServiceResult<Intern> {
        let new_status = TaskStatus::try_from(status)?;
        let record = self.repository.fetch(intern_id).await?;

        let mut entries = decode_for_rewrite(&record.fields.tasks_assigned);
        let entry = entries
            .iter_mut()
            .find(|entry| entry.id() == Some(task_id))
            .ok_or_else(|| InternServiceError::TaskNotFound {
                intern_id: intern_id.clone(),
                task_id: TaskId::new(task_id),
            })?;
        let now = self.clock.utc();
        entry.set_status(new_status, now);

        let patch = InternPatch::touch(now).with_tasks_assigned(encode_entries(entries));
        let updated = self.repository.update(intern_id, &patch).await?;
        info!(
            intern_id = %intern_id,
            task_id,
            status = %new_status,
            "updated task status"
        );
        Ok(updated.into())
    }

    /// Normalizes a task and appends it to an intern's task list.
    ///
    /// A stored list that cannot be parsed is kept as an opaque entry ahead
    /// of the new task. Shares the lost-update exposure of
    /// [`update_task_status`](Self::update_task_status).
    ///
    /// # Errors
    ///
    /// Returns [`InternServiceError::Validation`] when the task is invalid,
    /// and [`InternServiceError::Repository`] when the intern does not exist
    /// or storage fails.
    pub async fn add_task(
        &self,
        intern_id: &InternId,
        input: TaskInput,
    ) -> InternServiceResult<Intern> {
        let task = Task::normalize(input, &*self.ids, &*self.clock)?;
        let record = self.repository.fetch(intern_id).await?;

        let mut entries = decode_for_rewrite(&record.fields.tasks_assigned);
        entries.push(TaskEntry::from(&task));

        let patch =
            InternPatch::touch(task.updated_at()).with_tasks_assigned(encode_entries(entries));
        let updated = self.repository.update(intern_id, &patch).await?;
        info!(intern_id = %intern_id, task_id = %task.id(), "added task");
        Ok(updated.into())
    }

    fn normalize_all(&self, inputs: Vec<TaskInput>) -> Result<Vec<Task>, ValidationError> {
        inputs
            .into_iter()
            .map(|input| Task::normalize(input, &*self.ids, &*self.clock))
            .collect()
    }
}
