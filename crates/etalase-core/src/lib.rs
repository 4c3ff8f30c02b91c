//! Shared types, traits, errors, and utilities for Etalase.
//!
//! This crate provides the foundational types used across all Etalase crates.
//! It has no internal Etalase dependencies (dependency level 0).
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`traits`]: Configuration abstraction
//! - [`util`]: File and path utilities

pub mod error;
pub mod traits;
pub mod util;

// Re-export key types at crate root for convenience
pub use error::{Error, Result};
pub use traits::ConfigProvider;
