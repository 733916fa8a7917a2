//! appdata core - snapshot model and normalization
//!
//! This crate provides:
//! - The snapshot document model exchanged with the API
//! - Review code tables (result/action/status names to numeric ids)
//! - Load plans: per-table statements and row batches
//! - The normalizer turning a snapshot into a load plan
//! - The error and logging facilities shared by the other crates
//!
//! Nothing here performs I/O; the store crate executes plans.

pub mod codes;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod normalize;
pub mod plan;

#[doc(hidden)]
pub use appdata_core_types as core_types;

// Re-export commonly used types
pub use errors::{ExError, ExErrorKind, Result, SnapshotError};
pub use model::AppData;
pub use normalize::normalize;
pub use plan::{BindValue, DeleteMode, LoadPlan, Row, Table, TableLoad};
