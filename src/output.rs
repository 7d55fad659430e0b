//! User-facing console output.
//!
//! Status messages carry a colored tag when the target stream is a TTY.
//! Per-file result lines are plain so they can be scripted against.

use owo_colors::{OwoColorize, Style};
use std::path::Path;

use crate::fs_ops::tilde_display;

#[derive(Clone, Copy)]
enum Stream {
    Out,
    Err,
}

impl Stream {
    fn is_tty(self) -> bool {
        match self {
            Stream::Out => atty::is(atty::Stream::Stdout),
            Stream::Err => atty::is(atty::Stream::Stderr),
        }
    }
}

fn emit(stream: Stream, tag: &str, style: Style, msg: &str) {
    let line = if stream.is_tty() {
        format!("{} {msg}", tag.style(style))
    } else {
        format!("{tag} {msg}")
    };
    match stream {
        Stream::Out => println!("{line}"),
        Stream::Err => eprintln!("{line}"),
    }
}

pub fn print_info(msg: &str) {
    emit(Stream::Out, "info:", Style::new().cyan().bold(), msg);
}

pub fn print_warn(msg: &str) {
    emit(Stream::Err, "warn:", Style::new().yellow().bold(), msg);
}

pub fn print_error(msg: &str) {
    emit(Stream::Err, "error:", Style::new().red().bold(), msg);
}

pub fn print_success(msg: &str) {
    emit(Stream::Out, "ok:", Style::new().green().bold(), msg);
}

/// Plain line on stdout, no tag.
pub fn print_user(msg: &str) {
    println!("{msg}");
}

/// `moved: ~/a.txt → ~/.myTrash/a.txt`
pub fn moved_line(from: &Path, to: &Path) -> String {
    format!("moved: {} → {}", tilde_display(from), tilde_display(to))
}

/// `[DRYRUN] move '~/a.txt' to '~/.myTrash/a.txt'`
pub fn dry_run_line(from: &Path, to: &Path) -> String {
    format!("[DRYRUN] move '{}' to '{}'", tilde_display(from), tilde_display(to))
}

/// `restored: ~/.myTrash/a.txt → ~/a.txt`
pub fn restored_line(from: &Path, to: &Path) -> String {
    format!("restored: {} → {}", tilde_display(from), tilde_display(to))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_lines_have_fixed_shapes() {
        let (a, b) = (Path::new("/srv/a.txt"), Path::new("/srv/t/a.txt"));
        assert_eq!(moved_line(a, b), "moved: /srv/a.txt → /srv/t/a.txt");
        assert_eq!(dry_run_line(a, b), "[DRYRUN] move '/srv/a.txt' to '/srv/t/a.txt'");
        assert_eq!(restored_line(b, a), "restored: /srv/t/a.txt → /srv/a.txt");
    }
}
