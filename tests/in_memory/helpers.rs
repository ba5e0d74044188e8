//! Shared test helpers for in-memory intern service integration tests.

use std::sync::Arc;

use internhub::intern::{
    adapters::memory::InMemoryInternRepository, domain::UuidIdGenerator,
    services::InternService,
};
use mockable::DefaultClock;
use rstest::fixture;

/// Service type exercised by the integration tests.
pub type TestService = InternService<InMemoryInternRepository, DefaultClock, UuidIdGenerator>;

/// Provides a service over an empty repository.
#[fixture]
pub fn empty_service() -> TestService {
    InternService::new(
        Arc::new(InMemoryInternRepository::new()),
        Arc::new(DefaultClock),
        Arc::new(UuidIdGenerator),
    )
}

/// Provides a service over the five sample interns.
#[fixture]
pub fn sample_service() -> TestService {
    InternService::new(
        Arc::new(InMemoryInternRepository::with_sample_data(&DefaultClock)),
        Arc::new(DefaultClock),
        Arc::new(UuidIdGenerator),
    )
}
