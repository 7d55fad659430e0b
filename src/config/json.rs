//! JSON configuration support.
//! - Reads `{ "trashDir": ..., "logLevel": ..., "logFile": ... }` (serde_json).
//! - `$TO_TRASH_CONFIG` wins and must exist; otherwise the first readable
//!   candidate from `config_candidates()` is used; none means defaults.
//! - Unknown fields are rejected so typos surface.

use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::errors::{Result, TrashError};
use crate::fs_ops::normalize_path;

use super::paths::{config_candidates, explicit_config_path};
use super::types::{Config, LogLevel};

/// Mirrors the file layout for deserialization.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct FileConfig {
    trash_dir: Option<String>,
    log_level: Option<String>,
    log_file: Option<String>,
}

/// The effective config and the file it came from, if any.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
    pub source: Option<PathBuf>,
}

/// Discover and read the config file.
pub fn load_config() -> Result<LoadedConfig> {
    if let Some(path) = explicit_config_path() {
        let raw = fs::read_to_string(&path).map_err(|e| config_error(&path, format!("read: {e}")))?;
        return parse_into(&path, &raw);
    }

    for path in config_candidates() {
        match fs::read_to_string(&path) {
            Ok(raw) => return parse_into(&path, &raw),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config here");
            }
            Err(e) => return Err(config_error(&path, format!("read: {e}"))),
        }
    }

    Ok(LoadedConfig {
        config: Config::default(),
        source: None,
    })
}

/// Read one specific config file.
pub fn load_config_from(path: &Path) -> Result<LoadedConfig> {
    let raw = fs::read_to_string(path).map_err(|e| config_error(path, format!("read: {e}")))?;
    parse_into(path, &raw)
}

fn parse_into(path: &Path, raw: &str) -> Result<LoadedConfig> {
    let parsed: FileConfig = if raw.trim().is_empty() {
        FileConfig::default()
    } else {
        serde_json::from_str(raw).map_err(|e| config_error(path, format!("parse: {e}")))?
    };

    let mut config = Config::default();
    if let Some(dir) = non_empty(parsed.trash_dir.as_deref()) {
        config.trash_dir = normalize_path(Path::new(dir)).map_err(|e| config_error(path, format!("trashDir: {e}")))?;
    }
    if let Some(level) = non_empty(parsed.log_level.as_deref()) {
        config.log_level = LogLevel::parse(level)
            .ok_or_else(|| config_error(path, format!("logLevel: unknown level '{level}'")))?;
    }
    if let Some(file) = non_empty(parsed.log_file.as_deref()) {
        config.log_file =
            Some(normalize_path(Path::new(file)).map_err(|e| config_error(path, format!("logFile: {e}")))?);
    }

    debug!(path = %path.display(), trash_dir = %config.trash_dir.display(), "config loaded");
    Ok(LoadedConfig {
        config,
        source: Some(path.to_path_buf()),
    })
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

fn config_error(path: &Path, context: impl Into<String>) -> TrashError {
    TrashError::Config {
        path: path.to_path_buf(),
        context: context.into(),
    }
}
