//! appdata store - SQLite persistence and the full-replace loader
//!
//! Provides:
//! - SQLite schema with migrations framework
//! - Connection management
//! - The transactional loader that replaces the whole dataset from a
//!   [`LoadPlan`](appdata_core::LoadPlan) behind the `LoadSession` seam

pub mod db;
pub mod errors;
pub mod load;
pub mod migrations;

// Re-export key types
pub use errors::Result;
pub use load::{load, LoadOptions, LoadSession, LoadState, LoadStats, SessionSource};
