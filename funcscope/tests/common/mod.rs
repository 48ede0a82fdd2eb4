//! Fixture builders shared by the integration tests.
//!
//! Real ELF files are synthesized with `object`'s write API and DWARF
//! sections with `gimli`'s write API, so the tests exercise the same parse
//! path as production lookups without shipping binary fixtures.

use gimli::write::{Address, AttributeValue, DwarfUnit, EndianVec, Sections};
use object::write::{Object, Symbol, SymbolSection};
use object::{
    Architecture, BinaryFormat, Endianness, SectionKind, SymbolFlags, SymbolKind, SymbolScope,
};
use std::io::Write;
use tempfile::NamedTempFile;

/// How a test subprogram encodes its high pc.
#[derive(Clone, Copy)]
pub enum High {
    Addr(u64),
    Offset(u64),
}

/// Build DWARF sections containing one compilation unit with the given
/// subprograms.
pub fn build_dwarf(subprograms: &[(&str, u64, High)]) -> Vec<(String, Vec<u8>)> {
    let encoding =
        gimli::Encoding { format: gimli::Format::Dwarf32, version: 4, address_size: 8 };
    let mut dwarf = DwarfUnit::new(encoding);

    let root = dwarf.unit.root();
    for &(name, low, high) in subprograms {
        let id = dwarf.unit.add(root, gimli::DW_TAG_subprogram);
        let entry = dwarf.unit.get_mut(id);
        entry.set(gimli::DW_AT_name, AttributeValue::String(name.as_bytes().to_vec()));
        entry.set(gimli::DW_AT_low_pc, AttributeValue::Address(Address::Constant(low)));
        entry.set(
            gimli::DW_AT_high_pc,
            match high {
                High::Addr(addr) => AttributeValue::Address(Address::Constant(addr)),
                High::Offset(offset) => AttributeValue::Udata(offset),
            },
        );
    }

    let mut sections = Sections::new(EndianVec::new(gimli::LittleEndian));
    dwarf.write(&mut sections).expect("write DWARF");

    let mut out = Vec::new();
    sections
        .for_each(|id, data| {
            if !data.slice().is_empty() {
                out.push((id.name().to_string(), data.slice().to_vec()));
            }
            Ok::<(), gimli::Error>(())
        })
        .expect("collect DWARF sections");
    out
}

/// Build an ELF with the given function symbols and optional DWARF
/// sections, written to a temp file.
///
/// Symbols are `(name, address, size)` triples placed in `.text`.
pub fn build_elf(
    symbols: &[(&str, u64, u64)],
    dwarf_sections: &[(String, Vec<u8>)],
) -> NamedTempFile {
    let mut obj = Object::new(BinaryFormat::Elf, Architecture::Riscv64, Endianness::Little);

    let text = obj.add_section(Vec::new(), b".text".to_vec(), SectionKind::Text);
    obj.append_section_data(text, &[0u8; 0x4000], 4);

    for &(name, address, size) in symbols {
        obj.add_symbol(Symbol {
            name: name.as_bytes().to_vec(),
            value: address,
            size,
            kind: SymbolKind::Text,
            scope: SymbolScope::Linkage,
            weak: false,
            section: SymbolSection::Section(text),
            flags: SymbolFlags::None,
        });
    }

    for (name, data) in dwarf_sections {
        let section = obj.add_section(Vec::new(), name.clone().into_bytes(), SectionKind::Debug);
        obj.append_section_data(section, data, 1);
    }

    let bytes = obj.write().expect("write ELF");
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(&bytes).expect("write temp file");
    file
}
