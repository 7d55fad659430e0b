//! Raw ledger file access: JSON lines in, JSON lines out.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

use crate::errors::Result;
use crate::fs_ops::ledger_error_with_help;

use super::record::MoveRecord;

/// Read every parseable record. `Ok(None)` when the file does not exist.
/// Lines that are blank, not UTF-8 or not a record are skipped.
pub fn read_records(path: &Path) -> Result<Option<Vec<MoveRecord>>> {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(ledger_error_with_help("open", path)(e)),
    };

    let mut reader = BufReader::new(file);
    let mut buf = Vec::new();
    let mut records = Vec::new();
    let mut line_no = 0usize;
    loop {
        buf.clear();
        let n = reader
            .read_until(b'\n', &mut buf)
            .map_err(ledger_error_with_help("read", path))?;
        if n == 0 {
            break;
        }
        line_no += 1;
        let line = buf.trim_ascii();
        if line.is_empty() {
            continue;
        }
        match serde_json::from_slice::<MoveRecord>(line) {
            Ok(rec) => records.push(rec),
            Err(e) => debug!(path = %path.display(), line = line_no, error = %e, "skipping malformed ledger line"),
        }
    }
    trace!(path = %path.display(), count = records.len(), "ledger read");
    Ok(Some(records))
}

/// Replace the whole file: write a temp sibling, fsync it, rename over.
pub fn rewrite_records(path: &Path, records: &[MoveRecord]) -> Result<()> {
    let tmp = temp_sibling(path);
    let result = write_all_to(&tmp, records).and_then(|()| {
        fs::rename(&tmp, path).map_err(ledger_error_with_help("replace", path))
    });
    if result.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    result?;
    debug!(path = %path.display(), count = records.len(), "ledger rewritten");
    Ok(())
}

/// Append lines to an existing file, then flush and `sync_data`.
pub fn append_records(path: &Path, records: &[MoveRecord]) -> Result<()> {
    let file = OpenOptions::new()
        .append(true)
        .open(path)
        .map_err(ledger_error_with_help("open for append", path))?;
    let mut w = BufWriter::new(file);
    write_lines(&mut w, records).map_err(ledger_error_with_help("append", path))?;
    let file = w
        .into_inner()
        .map_err(|e| ledger_error_with_help("flush", path)(e.into_error()))?;
    file.sync_data().map_err(ledger_error_with_help("sync", path))?;
    debug!(path = %path.display(), count = records.len(), "ledger appended");
    Ok(())
}

fn write_all_to(tmp: &Path, records: &[MoveRecord]) -> Result<()> {
    let file = File::create(tmp).map_err(ledger_error_with_help("create", tmp))?;
    let mut w = BufWriter::new(file);
    write_lines(&mut w, records).map_err(ledger_error_with_help("write", tmp))?;
    let file = w
        .into_inner()
        .map_err(|e| ledger_error_with_help("flush", tmp)(e.into_error()))?;
    file.sync_all().map_err(ledger_error_with_help("sync", tmp))
}

/// Every record is encoded before anything reaches `w`, so a record that
/// cannot be encoded leaves the file exactly as it was.
fn write_lines<W: Write>(w: &mut W, records: &[MoveRecord]) -> io::Result<()> {
    let buf = encode_lines(records)?;
    w.write_all(&buf)?;
    w.flush()
}

fn encode_lines(records: &[MoveRecord]) -> io::Result<Vec<u8>> {
    let mut buf = Vec::with_capacity(records.len() * 160);
    for rec in records {
        buf.extend(serde_json::to_vec(rec)?);
        buf.push(b'\n');
    }
    Ok(buf)
}

fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(format!(".tmp.{}", std::process::id()));
    path.with_file_name(name)
}
