//! Common types and traits for all aggregates

pub mod aggregate_id;
pub mod error;

// Re-exports
pub use aggregate_id::{AggregateId, NavId};
pub use error::{required, DocumentError, ErrorKind};
