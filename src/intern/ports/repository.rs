//! Repository port for intern record persistence and listing.

use crate::intern::domain::{InternId, InternPatch, InternQuery, InternRecord};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for intern repository operations.
pub type InternRepositoryResult<T> = Result<T, InternRepositoryError>;

/// One page of a listing together with the number of matching records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InternPage {
    /// Records on this page, in listing order.
    pub records: Vec<InternRecord>,
    /// Number of records matching the filters, ignoring limit and offset.
    pub total: u64,
}

/// Intern record persistence contract.
///
/// Updates replace whole fields and carry no revision token, so two
/// concurrent read-modify-write cycles on the same record may lose one of
/// the writes.
#[async_trait]
pub trait InternRepository: Send + Sync {
    /// Lists records matching `query`.
    async fn list(&self, query: &InternQuery) -> InternRepositoryResult<InternPage>;

    /// Fetches one record.
    ///
    /// # Errors
    ///
    /// Returns [`InternRepositoryError::NotFound`] when the record does not
    /// exist.
    async fn fetch(&self, id: &InternId) -> InternRepositoryResult<InternRecord>;

    /// Stores a new record and returns it as persisted.
    ///
    /// # Errors
    ///
    /// Returns [`InternRepositoryError::DuplicateIntern`] when the record
    /// identifier is already taken.
    async fn create(&self, record: &InternRecord) -> InternRepositoryResult<InternRecord>;

    /// Applies a partial update and returns the updated record.
    ///
    /// # Errors
    ///
    /// Returns [`InternRepositoryError::NotFound`] when the record does not
    /// exist.
    async fn update(
        &self,
        id: &InternId,
        patch: &InternPatch,
    ) -> InternRepositoryResult<InternRecord>;

    /// Deletes a record.
    ///
    /// # Errors
    ///
    /// Returns [`InternRepositoryError::NotFound`] when the record does not
    /// exist.
    async fn delete(&self, id: &InternId) -> InternRepositoryResult<()>;
}

/// Errors returned by intern repository implementations.
#[derive(Debug, Clone, Error)]
pub enum InternRepositoryError {
    /// The record was not found.
    #[error("intern not found: {0}")]
    NotFound(InternId),

    /// A record with the same identifier already exists.
    #[error("duplicate intern identifier: {0}")]
    DuplicateIntern(InternId),

    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure, displayed as the underlying message.
    #[error("{0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl InternRepositoryError {
    /// Wraps a data-quality or deserialization error from persisted rows.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
