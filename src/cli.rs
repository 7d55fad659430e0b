//! CLI definition and parsing.
//! Defines Args and provides parse() for command-line handling.
//!
//! Notes:
//! - Unknown flags are dropped before clap sees them; the caller warns about them.
//! - --verbose is a shorthand for --log-level debug.

use clap::{Parser, ValueHint};
use std::ffi::OsString;
use std::path::PathBuf;

use crate::config::types::{Config, LogLevel};
use crate::fs_ops::normalize_path;

/// Move files into a trash directory, or restore them interactively.
/// CLI flags override config values (loaded from JSON if present).
#[derive(Parser, Debug, Clone, Default)]
#[command(author, version, about = "Move files to a trash directory instead of deleting them")]
pub struct Args {
    /// Files or directories to trash.
    #[arg(value_name = "PATHS", value_hint = ValueHint::AnyPath)]
    pub paths: Vec<PathBuf>,

    /// Dry-run: report what would be moved without touching anything.
    #[arg(short = 'n', long = "dryrun", visible_alias = "dry-run")]
    pub dry_run: bool,

    /// Enable debug logging (shorthand for --log-level debug).
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Pick files from the trash history and move them back.
    #[arg(long)]
    pub restore: bool,

    /// Override the trash directory.
    #[arg(long, value_name = "DIR", value_hint = ValueHint::DirPath)]
    pub trash_dir: Option<PathBuf>,

    /// Set log level: quiet, normal, info, debug.
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Emit logs in structured JSON.
    #[arg(long)]
    pub json: bool,

    /// Print the config file in effect (or where one is looked for) and exit.
    #[arg(long)]
    pub print_config: bool,
}

/// Long flags clap knows about; `VALUE_FLAGS` take an argument.
const LONG_FLAGS: &[&str] = &[
    "--dryrun",
    "--dry-run",
    "--verbose",
    "--restore",
    "--json",
    "--print-config",
    "--help",
    "--version",
];
const VALUE_FLAGS: &[&str] = &["--trash-dir", "--log-level"];
const SHORT_FLAGS: &[char] = &['n', 'v', 'h', 'V'];

impl Args {
    /// Effective log level derived from flags.
    /// Precedence: --verbose > --log-level value > None (use config default).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.verbose {
            return Some(LogLevel::Debug);
        }
        self.log_level.as_deref().and_then(LogLevel::parse)
    }

    /// Apply CLI overrides to a loaded Config (in-place). No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(dir) = &self.trash_dir {
            cfg.trash_dir = normalize_path(dir).unwrap_or_else(|_| dir.clone());
        }
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
        if self.dry_run {
            cfg.dry_run = true;
        }
    }
}

/// Parse `argv` (program name first), dropping flags clap would reject.
/// Returns the parsed args and the dropped flags.
pub fn parse_lenient<I, T>(argv: I) -> Result<(Args, Vec<String>), clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let (kept, dropped) = filter_unknown_flags(argv.into_iter().map(Into::into));
    let args = Args::try_parse_from(kept)?;
    Ok((args, dropped))
}

pub fn parse() -> Result<(Args, Vec<String>), clap::Error> {
    parse_lenient(std::env::args_os())
}

fn filter_unknown_flags(argv: impl Iterator<Item = OsString>) -> (Vec<OsString>, Vec<String>) {
    let mut kept = Vec::new();
    let mut dropped = Vec::new();
    let mut positional_only = false;
    let mut expect_value = false;

    for (i, arg) in argv.enumerate() {
        if i == 0 || positional_only || expect_value {
            expect_value = false;
            kept.push(arg);
            continue;
        }
        let Some(s) = arg.to_str() else {
            kept.push(arg);
            continue;
        };

        if s == "--" {
            positional_only = true;
            kept.push(arg);
        } else if let Some(long) = s.strip_prefix("--") {
            let name = format!("--{}", long.split_once('=').map_or(long, |(n, _)| n));
            if VALUE_FLAGS.contains(&name.as_str()) {
                expect_value = !long.contains('=');
                kept.push(arg);
            } else if LONG_FLAGS.contains(&name.as_str()) {
                kept.push(arg);
            } else {
                dropped.push(s.to_string());
            }
        } else if s.len() > 1 && s.starts_with('-') {
            if s[1..].chars().all(|c| SHORT_FLAGS.contains(&c)) {
                kept.push(arg);
            } else {
                dropped.push(s.to_string());
            }
        } else {
            kept.push(arg);
        }
    }
    (kept, dropped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_flags_are_dropped() {
        let (args, dropped) = parse_lenient(["to_trash", "-rf", "a.txt", "--force", "-n", "b.txt"]).unwrap();
        assert_eq!(args.paths, vec![PathBuf::from("a.txt"), PathBuf::from("b.txt")]);
        assert!(args.dry_run);
        assert_eq!(dropped, vec!["-rf".to_string(), "--force".to_string()]);
    }

    #[test]
    fn value_flags_keep_their_value() {
        let (args, dropped) = parse_lenient(["to_trash", "--trash-dir", "bin", "-X", "--log-level=info", "x"]).unwrap();
        assert_eq!(args.trash_dir, Some(PathBuf::from("bin")));
        assert_eq!(args.effective_log_level(), Some(LogLevel::Info));
        assert_eq!(dropped, vec!["-X".to_string()]);
    }

    #[test]
    fn double_dash_ends_flag_filtering() {
        let (args, dropped) = parse_lenient(["to_trash", "--", "--odd-name"]).unwrap();
        assert_eq!(args.paths, vec![PathBuf::from("--odd-name")]);
        assert!(dropped.is_empty());
    }

    #[test]
    fn verbose_wins_over_log_level() {
        let (args, _) = parse_lenient(["to_trash", "-v", "--log-level", "quiet"]).unwrap();
        assert_eq!(args.effective_log_level(), Some(LogLevel::Debug));
    }

    #[test]
    fn dry_run_alias_and_combined_shorts() {
        let (args, _) = parse_lenient(["to_trash", "--dry-run"]).unwrap();
        assert!(args.dry_run);
        let (args, _) = parse_lenient(["to_trash", "-nv"]).unwrap();
        assert!(args.dry_run && args.verbose);
    }
}
