//! Adapter implementations for intern record ports.

pub mod memory;
pub mod postgres;
