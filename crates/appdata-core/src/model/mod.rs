pub mod snapshot;
pub mod truthy;

pub use snapshot::{AppData, Asset, Department, HistoryEntry, Package, Review, StigReviewers, User};
