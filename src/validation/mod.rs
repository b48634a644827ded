//! Input validation
//!
//! Two independent gates between untrusted input and the filesystem:
//! filename sanitization and base-directory containment. Both gates must
//! agree before a name reaches any file operation.

pub mod filename;
pub mod path;

pub use filename::{Filename, sanitize_filename};
pub use path::PathValidator;
