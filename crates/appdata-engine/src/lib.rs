//! appdata engine - orchestration layer
//!
//! Provides the operations the outer surfaces (CLI, API) call: full replace
//! of the dataset from a snapshot, and version reporting. Each coordinates the
//! normalizer in core with the loader and schema in the store.

pub mod commands;
