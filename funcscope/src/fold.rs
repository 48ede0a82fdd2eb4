//! Fold duplicate-prefixed count lines from a text report.
//!
//! Trace reports arrive as lines of the form `<prefix> <count>`, where the
//! prefix is typically a semicolon-joined call stack and the count a cycle
//! total. The same prefix can appear many times; folding sums the counts so
//! downstream tools (flamegraph renderers, diff scripts) see each prefix
//! once. Output is sorted by prefix so repeated runs diff cleanly.

use crate::domain::FoldError;
use std::collections::BTreeMap;
use std::io::{BufRead, Write};

/// Sum counts per prefix.
///
/// Each non-empty line is split on its *last* space: everything before is
/// the prefix (which may itself contain spaces), everything after must
/// parse as an unsigned count.
///
/// # Errors
/// Returns an error naming the offending line when a line has no separator
/// or a non-numeric count, or when reading fails.
pub fn fold<R: BufRead>(reader: R) -> Result<BTreeMap<String, u64>, FoldError> {
    let mut totals: BTreeMap<String, u64> = BTreeMap::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim_end();
        if line.is_empty() {
            continue;
        }
        let line_no = idx + 1;

        let Some((prefix, count)) = line.rsplit_once(' ') else {
            return Err(FoldError::MalformedLine { line: line_no });
        };
        let count: u64 = count.parse().map_err(|_| FoldError::BadCount { line: line_no })?;

        *totals.entry(prefix.to_string()).or_insert(0) += count;
    }

    Ok(totals)
}

/// Write folded totals as `<prefix> <sum>` lines.
///
/// # Errors
/// Returns an error when the writer fails.
pub fn write_folded<W: Write>(out: &mut W, totals: &BTreeMap<String, u64>) -> std::io::Result<()> {
    for (prefix, total) in totals {
        writeln!(out, "{prefix} {total}")?;
    }
    Ok(())
}
