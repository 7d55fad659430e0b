//! Application orchestrator.
//! Loads/merges config, initializes logging, installs the signal handler, then
//! either trashes the given paths or runs the interactive restore.

use anyhow::{Context, Result};
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

use to_trash::cli::Args;
use to_trash::config::{config_candidates, explicit_config_path, load_config};
use to_trash::fs_ops::{BatchOutcome, MoveRequest, move_batch, resolve_path, tilde_display};
use to_trash::history::{History, MoveRecord};
use to_trash::output as out;
use to_trash::restore::{RestoreOutcome, RestoreTheme, run_restore};
use to_trash::{Config, shutdown};

use crate::logging::init_tracing;

/// Run the CLI application.
pub fn run(args: Args, dropped_flags: &[String]) -> Result<()> {
    // Handle --print-config before logging init
    if args.print_config {
        print_config();
        return Ok(());
    }

    let loaded = load_config()?;
    let mut cfg = loaded.config;
    args.apply_overrides(&mut cfg);

    // Initialize logging and capture the guard so we can drop it on signal
    let guard_opt =
        init_tracing(cfg.log_level, cfg.log_file.as_deref(), args.json).context("failed to initialize logging")?;

    // Guard needs to be dropped on SIGINT to flush logs
    let guard_slot = Arc::new(Mutex::new(guard_opt));
    {
        let guard_slot = Arc::clone(&guard_slot);
        ctrlc::set_handler(move || {
            shutdown::request();
            out::print_warn("Received interrupt; finishing moves already in progress...");
            if let Ok(mut g) = guard_slot.lock() {
                let _ = g.take();
            }
        })
        .context("failed to install signal handler")?;
    }

    for flag in dropped_flags {
        out::print_warn(&format!("ignoring unknown option '{flag}'"));
    }
    if let Some(src) = &loaded.source {
        debug!(config = %src.display(), "using config file");
    }
    debug!(?args, trash_dir = %cfg.trash_dir.display(), dry_run = cfg.dry_run, "starting to_trash");

    let result = if args.restore {
        restore(&cfg)
    } else {
        trash(&cfg, &args)
    };

    // Ensure logs are flushed before exit
    if let Ok(mut g) = guard_slot.lock() {
        let _ = g.take();
    }

    result
}

fn print_config() {
    if let Some(p) = explicit_config_path() {
        out::print_info(&format!("Using TO_TRASH_CONFIG (explicit):\n  {}", p.display()));
        return;
    }
    let candidates = config_candidates();
    match candidates.iter().find(|p| p.is_file()) {
        Some(p) => out::print_info(&format!("Using config file:\n  {}", p.display())),
        None => {
            out::print_info("No config file found; using defaults. Looked in:");
            for p in &candidates {
                out::print_user(&format!("  {}", p.display()));
            }
        }
    }
}

fn trash(cfg: &Config, args: &Args) -> Result<()> {
    if args.paths.is_empty() {
        debug!("no paths given");
        return Ok(());
    }

    // Resolve everything first; a bad path is reported but does not stop the rest.
    let mut outcome = BatchOutcome::default();
    let mut requests = Vec::with_capacity(args.paths.len());
    for raw in &args.paths {
        match resolve_path(raw).and_then(|p| MoveRequest::into_trash(&p, &cfg.trash_dir)) {
            Ok(req) => requests.push(req),
            Err(e) => {
                warn!(path = %raw.display(), code = e.code(), kind = e.kind(), "{e}");
                outcome.push_failure(raw, e);
            }
        }
    }

    if !requests.is_empty() && !cfg.dry_run {
        cfg.prepare_trash_dir()?;
    }

    let batch = move_batch(&requests, cfg.dry_run);
    outcome.moved = batch.moved;
    outcome.failures.extend(batch.failures);

    for rec in &outcome.moved {
        if cfg.dry_run {
            out::print_user(&out::dry_run_line(&rec.from, &rec.to));
        } else {
            out::print_user(&out::moved_line(&rec.from, &rec.to));
        }
    }

    if !cfg.dry_run && !outcome.moved.is_empty() {
        persist(cfg, std::mem::take(&mut outcome.moved))?;
    }

    report_failures(&outcome);
    outcome.into_result()?;
    Ok(())
}

fn persist(cfg: &Config, moved: Vec<MoveRecord>) -> Result<()> {
    let count = moved.len();
    let mut history = History::load(&cfg.trash_dir)?;
    history.update(moved).context("could not record history")?;
    info!(ledger = %history.path().display(), count, "history updated");
    Ok(())
}

fn restore(cfg: &Config) -> Result<()> {
    match run_restore(&cfg.trash_dir, RestoreTheme::default(), cfg.dry_run)? {
        RestoreOutcome::NothingToRestore => {
            out::print_info("nothing to restore");
            Ok(())
        }
        RestoreOutcome::Cancelled => {
            debug!("restore cancelled");
            Ok(())
        }
        RestoreOutcome::Restored(outcome) => {
            for rec in &outcome.moved {
                if cfg.dry_run {
                    out::print_user(&out::dry_run_line(&rec.from, &rec.to));
                } else {
                    out::print_user(&out::restored_line(&rec.from, &rec.to));
                }
            }
            if !cfg.dry_run && !outcome.moved.is_empty() {
                out::print_success(&format!("{} file(s) restored", outcome.moved.len()));
            }
            report_failures(&outcome);
            outcome.into_result()?;
            Ok(())
        }
    }
}

fn report_failures(outcome: &BatchOutcome) {
    for f in &outcome.failures {
        out::print_error(&format!("{}: {}", tilde_display(&f.path), f.error));
    }
}
