//! In-memory adapters for intern records.

mod repository;
mod sample;

pub use repository::InMemoryInternRepository;
