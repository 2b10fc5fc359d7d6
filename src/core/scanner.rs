// dirwatcher - core/scanner.rs
//
// Incremental magic-string scan of a single file.
//
// The whole file is re-read on every call and lines before the remembered
// offset are skipped without being inspected. Only line *counts* are
// remembered between polls, never byte positions, so appended text is picked
// up on the next poll while already reported matches are never repeated.
//
// Encoding: lines are decoded as lossy UTF-8, same as the tail reader, so a
// stray invalid byte never makes a file unscannable.
//
// The scanner is pure: it performs the read and returns a `ScanResult`.
// Logging of matches is the poll loop's job.

use crate::core::model::{LineMatch, ScanResult};
use crate::util::error::FileAccessError;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Scan `path` for lines containing `magic`, ignoring the first
/// `start_offset` lines.
///
/// The returned `new_offset` is the file's current line count, or
/// `start_offset` if the file has shrunk below it. A final line without a
/// trailing newline still counts as a line.
pub fn scan(path: &Path, start_offset: u64, magic: &str) -> Result<ScanResult, FileAccessError> {
    let file = std::fs::File::open(path)
        .map_err(|e| FileAccessError::from_io(path.to_path_buf(), e))?;
    scan_reader(BufReader::new(file), start_offset, magic)
        .map_err(|e| FileAccessError::from_io(path.to_path_buf(), e))
}

/// Line-matching core of `scan`, split out so it works on any buffered reader.
pub fn scan_reader<R: BufRead>(
    mut reader: R,
    start_offset: u64,
    magic: &str,
) -> io::Result<ScanResult> {
    let mut matches = Vec::new();
    let mut buf = Vec::new();
    let mut index: u64 = 0;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        if index >= start_offset {
            let line = String::from_utf8_lossy(strip_newline(&buf));
            if line.contains(magic) {
                matches.push(LineMatch {
                    line_number: index + 1,
                });
            }
        }
        index += 1;
    }

    Ok(ScanResult {
        new_offset: index.max(start_offset),
        matches,
    })
}

fn strip_newline(buf: &[u8]) -> &[u8] {
    buf.strip_suffix(b"\n").unwrap_or(buf)
}
