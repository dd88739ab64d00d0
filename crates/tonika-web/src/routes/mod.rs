//! Route handlers.

pub mod analyze;
pub mod batch;
pub mod health;
