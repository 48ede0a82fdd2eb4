//! Function Locator: best-effort start/end address resolution.
//!
//! Two sources are tried in a fixed order. The symbol table is cheap,
//! authoritative, and detects ambiguous patterns; the DWARF subprogram walk
//! is the fallback for stripped or statically-linked binaries and takes the
//! first match it finds. Every lookup is a pure read over metadata already
//! in memory - calls are independent and idempotent.
//!
//! All "not found" flavors (no match, ambiguous pattern, malformed
//! metadata, no metadata at all) collapse to `None`; the reason is logged
//! as a warning rather than surfaced as a structured error, and callers
//! treat `None` as the sole failure signal.

pub mod dwarf;
pub mod symtab;

pub use dwarf::{HighPc, SubprogramRecord};

use crate::domain::{FunctionRange, ImageError};
use crate::image::BinaryImage;
use log::warn;
use regex::Regex;

/// Resolve a function's address range by name pattern.
///
/// The pattern is a regex *search*: `foo` matches any function whose name
/// contains `foo`. When the symbol table produces a unique match it wins
/// outright and the debug metadata is never consulted.
#[must_use]
pub fn resolve(image: &BinaryImage, pattern: &Regex) -> Option<FunctionRange> {
    match image.symbols() {
        Ok(symbols) => {
            if let Some(range) = symtab::find_range(&symbols, pattern) {
                return Some(range);
            }
        }
        Err(e) => warn!("unable to read symbol table: {e}"),
    }

    match collect_subprograms(image) {
        Ok(records) => dwarf::find_range(&records, pattern),
        Err(e) => {
            warn!("unable to read debug metadata: {e}");
            None
        }
    }
}

/// Find the name of the function containing `addr`.
///
/// Walks every compilation unit's subprograms; the symbol table is not
/// consulted for containment queries.
#[must_use]
pub fn resolve_containing(image: &BinaryImage, addr: u64) -> Option<String> {
    match collect_subprograms(image) {
        Ok(records) => dwarf::find_containing(&records, addr),
        Err(e) => {
            warn!("unable to read debug metadata: {e}");
            None
        }
    }
}

fn collect_subprograms(image: &BinaryImage) -> Result<Vec<SubprogramRecord>, ImageError> {
    let dwarf = image.load_dwarf()?;
    Ok(dwarf::subprogram_records(&dwarf)?)
}
