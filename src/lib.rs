//! Internhub: intern records with embedded task lists.
//!
//! This crate manages intern records, each carrying an ordered list of tasks
//! whose status is one of six fixed values. Task lists written by earlier
//! releases use several encodings; reads accept all of them and writes emit
//! a single native shape.
//!
//! # Architecture
//!
//! Internhub follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (in-memory, `PostgreSQL`)
//!
//! # Modules
//!
//! - [`intern`]: Intern records, task normalization, the task-list codec and
//!   status aggregation

pub mod intern;
