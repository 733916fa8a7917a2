pub mod migrate;
pub mod replace;
pub mod version;
