//! Config module.
//! Provides configuration types, config file discovery, JSON loading, and
//! trash directory preparation.

pub mod json;
pub mod paths;
pub mod types;
mod validate;

pub use json::{LoadedConfig, load_config, load_config_from};
pub use paths::{CONFIG_ENV, config_candidates, explicit_config_path};
pub use types::{Config, LogLevel};

/// Trash directory used when no config file sets one.
pub const DEFAULT_TRASH_DIR: &str = "~/.myTrash";
