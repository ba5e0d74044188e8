//! Port contracts for intern record management.
//!
//! Ports define infrastructure-agnostic interfaces used by intern services.

pub mod repository;

pub use repository::{InternPage, InternRepository, InternRepositoryError, InternRepositoryResult};
