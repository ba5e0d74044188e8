//! Intern records and their embedded task lists.
//!
//! An intern record owns an ordered list of tasks whose status is drawn
//! from a fixed six-value set. Task lists were persisted with three
//! different encodings over time, so every read path decodes permissively
//! while every write path emits the native list shape. The module follows
//! hexagonal architecture:
//!
//! - Domain types, task normalization, the task-list codec and the status
//!   aggregator in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
