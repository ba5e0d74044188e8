//! In-memory repository for intern record tests and local development.

use async_trait::async_trait;
use mockable::Clock;
use std::cmp::Ordering;
use std::sync::{Arc, RwLock};

use super::sample::sample_records;
use crate::intern::{
    domain::{InternId, InternPatch, InternQuery, InternRecord, InternSort, SortField, SortOrder},
    ports::{InternPage, InternRepository, InternRepositoryError, InternRepositoryResult},
};

/// Thread-safe in-memory intern repository.
///
/// Records are kept in insertion order, which is also the listing order
/// when no sort is requested.
#[derive(Debug, Clone, Default)]
pub struct InMemoryInternRepository {
    state: Arc<RwLock<InMemoryInternState>>,
}

#[derive(Debug, Default)]
struct InMemoryInternState {
    records: Vec<InternRecord>,
}

impl InMemoryInternRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository holding `records` verbatim, in order.
    ///
    /// Stored task lists are not re-encoded, so legacy shapes can be seeded.
    #[must_use]
    pub fn with_records(records: impl IntoIterator<Item = InternRecord>) -> Self {
        let state = InMemoryInternState {
            records: records.into_iter().collect(),
        };
        Self {
            state: Arc::new(RwLock::new(state)),
        }
    }

    /// Creates a repository seeded with five sample interns whose tasks cover
    /// every status.
    #[must_use]
    pub fn with_sample_data(clock: &impl Clock) -> Self {
        Self::with_records(sample_records(clock.utc()))
    }
}

fn matches_query(record: &InternRecord, query: &InternQuery) -> bool {
    let batch_matches = query
        .batch
        .as_deref()
        .is_none_or(|batch| record.fields.batch == batch);
    let name_matches = query.search.as_deref().is_none_or(|search| {
        record
            .fields
            .name
            .to_lowercase()
            .contains(&search.to_lowercase())
    });
    batch_matches && name_matches
}

fn compare(left: &InternRecord, right: &InternRecord, sort: InternSort) -> Ordering {
    let ordering = match sort.field {
        SortField::Name => left.fields.name.cmp(&right.fields.name),
        SortField::Batch => left.fields.batch.cmp(&right.fields.batch),
        SortField::CreatedAt => left.created_at.cmp(&right.created_at),
        SortField::UpdatedAt => left.updated_at.cmp(&right.updated_at),
    };
    match sort.order {
        SortOrder::Asc => ordering,
        SortOrder::Desc => ordering.reverse(),
    }
}

fn lock_error(err: impl std::fmt::Display) -> InternRepositoryError {
    InternRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl InternRepository for InMemoryInternRepository {
    async fn list(&self, query: &InternQuery) -> InternRepositoryResult<InternPage> {
        let state = self.state.read().map_err(lock_error)?;
        let mut matching: Vec<InternRecord> = state
            .records
            .iter()
            .filter(|record| matches_query(record, query))
            .cloned()
            .collect();
        let total = u64::try_from(matching.len()).map_err(InternRepositoryError::persistence)?;

        if let Some(sort) = query.sort {
            matching.sort_by(|left, right| compare(left, right, sort));
        }
        let records = matching
            .into_iter()
            .skip(query.offset.unwrap_or(0))
            .take(query.limit.unwrap_or(usize::MAX))
            .collect();

        Ok(InternPage { records, total })
    }

    async fn fetch(&self, id: &InternId) -> InternRepositoryResult<InternRecord> {
        let state = self.state.read().map_err(lock_error)?;
        state
            .records
            .iter()
            .find(|record| record.id == *id)
            .cloned()
            .ok_or_else(|| InternRepositoryError::NotFound(id.clone()))
    }

    async fn create(&self, record: &InternRecord) -> InternRepositoryResult<InternRecord> {
        let mut state = self.state.write().map_err(lock_error)?;
        if state.records.iter().any(|existing| existing.id == record.id) {
            return Err(InternRepositoryError::DuplicateIntern(record.id.clone()));
        }
        state.records.push(record.clone());
        Ok(record.clone())
    }

    async fn update(
        &self,
        id: &InternId,
        patch: &InternPatch,
    ) -> InternRepositoryResult<InternRecord> {
        let mut state = self.state.write().map_err(lock_error)?;
        let record = state
            .records
            .iter_mut()
            .find(|record| record.id == *id)
            .ok_or_else(|| InternRepositoryError::NotFound(id.clone()))?;
        patch.apply_to(record);
        Ok(record.clone())
    }

    async fn delete(&self, id: &InternId) -> InternRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let position = state
            .records
            .iter()
            .position(|record| record.id == *id)
            .ok_or_else(|| InternRepositoryError::NotFound(id.clone()))?;
        state.records.remove(position);
        Ok(())
    }
}
