//! File system storage management
//!
//! Scoped file operations over a validated base directory.

pub mod file_store;

pub use file_store::FileStore;
