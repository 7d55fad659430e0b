//! Config file discovery.

use std::env;
use std::path::PathBuf;

use crate::fs_ops::home_dir;

/// Env var naming an explicit config file.
pub const CONFIG_ENV: &str = "TO_TRASH_CONFIG";

const APP_DIR: &str = "to_trash";
const CONFIG_FILE: &str = "config.json";
const HOME_CONFIG_FILE: &str = ".to_trash.json";

// Names used by go-to-trash, whose ledger file name is kept as is.
const LEGACY_APP_DIR: &str = "go-to-trash";
const LEGACY_HOME_CONFIG_FILE: &str = ".go-to-trash.json";

/// Implicit config locations, most specific first:
/// `$XDG_CONFIG_HOME/to_trash/config.json`, `~/.config/to_trash/config.json`,
/// `~/.to_trash.json`, then the same three under the `go-to-trash` names.
pub fn config_candidates() -> Vec<PathBuf> {
    let xdg = env::var_os("XDG_CONFIG_HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from);
    let home = home_dir();

    let mut out = Vec::with_capacity(6);
    for (app_dir, home_file) in [(APP_DIR, HOME_CONFIG_FILE), (LEGACY_APP_DIR, LEGACY_HOME_CONFIG_FILE)] {
        if let Some(xdg) = &xdg {
            out.push(xdg.join(app_dir).join(CONFIG_FILE));
        }
        if let Some(home) = &home {
            out.push(home.join(".config").join(app_dir).join(CONFIG_FILE));
            out.push(home.join(home_file));
        }
    }
    out
}

/// `$TO_TRASH_CONFIG`, when set and non-empty.
pub fn explicit_config_path() -> Option<PathBuf> {
    env::var_os(CONFIG_ENV)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}
