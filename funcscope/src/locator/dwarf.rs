//! Debug-metadata lookup: the slower fallback path.
//!
//! `DW_TAG_subprogram` entries are flattened to [`SubprogramRecord`]s in
//! document order (depth-first within each compilation unit, units in
//! section order) and the lookups run over the flattened records. Split
//! address ranges (`DW_AT_ranges`) are disregarded.
//!
//! Unlike the symbol-table path there is no ambiguity detection here: the
//! first matching subprogram wins. That asymmetry is deliberate and
//! documented in DESIGN.md.

use crate::domain::FunctionRange;
use log::warn;
use regex::Regex;

/// How a subprogram encodes its upper address bound.
///
/// DWARF allows `DW_AT_high_pc` to be either an absolute address or a byte
/// offset from `DW_AT_low_pc`, distinguished by the form class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighPc {
    /// Absolute address (address form class).
    Addr(u64),
    /// Byte offset from the low pc (constant form class).
    Offset(u64),
    /// Present, but in a form class we do not interpret.
    Unsupported,
}

/// One `DW_TAG_subprogram` entry, reduced to the attributes lookups need.
#[derive(Debug, Clone)]
pub struct SubprogramRecord {
    pub name: Option<String>,
    pub low_pc: Option<u64>,
    pub high_pc: Option<HighPc>,
}

/// Flatten every subprogram entry across all compilation units.
///
/// # Errors
/// Returns an error if the DWARF sections cannot be walked.
pub fn subprogram_records<R: gimli::Reader>(
    dwarf: &gimli::Dwarf<R>,
) -> Result<Vec<SubprogramRecord>, gimli::Error> {
    let mut records = Vec::new();

    let mut units = dwarf.units();
    while let Some(header) = units.next()? {
        let unit = dwarf.unit(header)?;
        let mut entries = unit.entries();
        while let Some((_, entry)) = entries.next_dfs()? {
            if entry.tag() != gimli::DW_TAG_subprogram {
                continue;
            }
            records.push(record_from_entry(dwarf, &unit, entry)?);
        }
    }

    Ok(records)
}

fn record_from_entry<R: gimli::Reader>(
    dwarf: &gimli::Dwarf<R>,
    unit: &gimli::Unit<R>,
    entry: &gimli::DebuggingInformationEntry<'_, '_, R>,
) -> Result<SubprogramRecord, gimli::Error> {
    let mut record = SubprogramRecord { name: None, low_pc: None, high_pc: None };

    let mut attrs = entry.attrs();
    while let Some(attr) = attrs.next()? {
        match attr.name() {
            gimli::DW_AT_name => {
                if let Ok(s) = dwarf.attr_string(unit, attr.value()) {
                    record.name = Some(s.to_string_lossy()?.into_owned());
                }
            }
            gimli::DW_AT_low_pc => {
                if let gimli::AttributeValue::Addr(addr) = attr.value() {
                    record.low_pc = Some(addr);
                }
            }
            gimli::DW_AT_high_pc => {
                record.high_pc = Some(match attr.value() {
                    gimli::AttributeValue::Addr(addr) => HighPc::Addr(addr),
                    value => match value.udata_value() {
                        Some(offset) => HighPc::Offset(offset),
                        None => HighPc::Unsupported,
                    },
                });
            }
            _ => {}
        }
    }

    Ok(record)
}

/// Find the first subprogram whose name search-matches `pattern`.
///
/// Any subprogram without a name attribute aborts the whole search, even
/// when a later unit would have matched: the metadata is treated as
/// malformed. A matching subprogram missing either address bound, or
/// carrying an uninterpretable high-pc form, aborts as well.
#[must_use]
pub fn find_range(records: &[SubprogramRecord], pattern: &Regex) -> Option<FunctionRange> {
    for record in records {
        let Some(name) = record.name.as_deref() else {
            warn!("subprogram entry without a name attribute, aborting debug-metadata search");
            return None;
        };
        if !pattern.is_match(name) {
            continue;
        }

        let Some(low) = record.low_pc else {
            warn!("subprogram {name} has no low address, aborting debug-metadata search");
            return None;
        };
        let high = match record.high_pc {
            Some(HighPc::Addr(addr)) => addr,
            Some(HighPc::Offset(offset)) => low + offset,
            Some(HighPc::Unsupported) => {
                warn!("subprogram {name} has an unsupported high-pc form");
                return None;
            }
            None => {
                warn!("subprogram {name} has no high address, aborting debug-metadata search");
                return None;
            }
        };

        // First match wins; no ambiguity detection on this path
        return Some(FunctionRange { name: name.to_string(), low, high });
    }
    None
}

/// Find the name of the first subprogram whose `[low, high)` interval
/// contains `addr`.
///
/// Entries missing a name or an address bound are skipped rather than
/// fatal on this path; only an uninterpretable high-pc form aborts the
/// walk.
#[must_use]
pub fn find_containing(records: &[SubprogramRecord], addr: u64) -> Option<String> {
    for record in records {
        let (Some(name), Some(low)) = (record.name.as_deref(), record.low_pc) else {
            continue;
        };
        let high = match record.high_pc {
            Some(HighPc::Addr(a)) => a,
            Some(HighPc::Offset(offset)) => low + offset,
            Some(HighPc::Unsupported) => {
                warn!("subprogram {name} has an unsupported high-pc form");
                return None;
            }
            None => continue,
        };
        if addr >= low && addr < high {
            return Some(name.to_string());
        }
    }
    None
}
