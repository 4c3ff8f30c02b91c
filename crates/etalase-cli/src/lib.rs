//! Command-line interface and HTTP content endpoints for Etalase sites.
//!
//! # Key Abstractions
//!
//! - [`EtalaseCli`]: loads configuration, builds the content repository, and
//!   dispatches commands
//! - [`EtalaseConfig`]: file/env/default configuration via `confyg`
//! - [`server::router`]: the axum router behind `etalase serve`

pub mod app;
pub mod cli;
pub mod config;
pub mod config_handlers;
pub mod content_handlers;
pub mod server;

pub use app::EtalaseCli;
pub use cli::{CliArgs, Command, ConfigAction, ConfigCommand};
pub use config::EtalaseConfig;
