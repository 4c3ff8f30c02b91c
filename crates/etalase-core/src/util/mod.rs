//! Utility modules for file operations and path handling.
//!
//! # Modules
//!
//! - [`files`]: Async content-directory listing, reading, and atomic writes
//! - [`paths`]: Path helpers (tilde expansion, safe path segments)

pub mod files;
pub mod paths;
