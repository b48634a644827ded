//! Error handling
//!
//! Defines error types and handling for the conversion service.

pub mod handlers;
pub mod types;

pub use types::*;
