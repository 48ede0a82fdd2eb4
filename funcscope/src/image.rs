//! Loading a binary image from disk.
//!
//! [`BinaryImage`] owns the raw bytes of an executable and hands out views
//! of its symbol table and DWARF debug metadata. The file is read exactly
//! once, here; every lookup afterwards is an in-memory traversal with no
//! I/O. Parsing is delegated entirely to the `object` and `gimli` crates.

use crate::domain::ImageError;
use gimli::{EndianRcSlice, RunTimeEndian};
use object::{Object, ObjectSection, ObjectSymbol, SymbolKind};
use std::fs;
use std::path::Path;
use std::rc::Rc;

/// One symbol-table entry, detached from the parse borrow.
#[derive(Debug, Clone)]
pub struct SymbolRecord {
    pub name: String,
    pub kind: SymbolKind,
    pub address: u64,
    pub size: u64,
}

/// A loaded executable or object file.
pub struct BinaryImage {
    data: Vec<u8>,
}

impl BinaryImage {
    /// Read a binary from disk.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read. Parsing happens lazily,
    /// so an unparseable file only fails once its metadata is requested.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, ImageError> {
        let data = fs::read(path.as_ref())?;
        Ok(Self { data })
    }

    fn parse(&self) -> Result<object::File<'_>, ImageError> {
        Ok(object::File::parse(&*self.data)?)
    }

    /// Extract the symbol table in table order.
    ///
    /// A stripped binary simply yields an empty list.
    ///
    /// # Errors
    /// Returns an error if the file is not a recognized object format.
    pub fn symbols(&self) -> Result<Vec<SymbolRecord>, ImageError> {
        let obj = self.parse()?;
        Ok(obj
            .symbols()
            .map(|sym| SymbolRecord {
                name: sym.name().unwrap_or_default().to_string(),
                kind: sym.kind(),
                address: sym.address(),
                size: sym.size(),
            })
            .collect())
    }

    /// Load the DWARF debug metadata.
    ///
    /// Missing debug sections load as empty slices, so a binary without
    /// debug info yields a DWARF view with no compilation units rather than
    /// an error.
    ///
    /// # Errors
    /// Returns an error if the file is not a recognized object format or a
    /// debug section is present but unreadable.
    pub fn load_dwarf(&self) -> Result<gimli::Dwarf<EndianRcSlice<RunTimeEndian>>, ImageError> {
        let obj = self.parse()?;
        let endian =
            if obj.is_little_endian() { RunTimeEndian::Little } else { RunTimeEndian::Big };

        let load_section =
            |id: gimli::SectionId| -> Result<EndianRcSlice<RunTimeEndian>, gimli::Error> {
                let data = obj
                    .section_by_name(id.name())
                    .and_then(|section| section.uncompressed_data().ok())
                    .unwrap_or(std::borrow::Cow::Borrowed(&[][..]));
                Ok(EndianRcSlice::new(Rc::from(&*data), endian))
            };

        Ok(gimli::Dwarf::load(&load_section)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_open_missing_file() {
        let result = BinaryImage::open("/nonexistent/no-such-binary");
        assert!(matches!(result, Err(ImageError::Io(_))));
    }

    #[test]
    fn test_parse_garbage() {
        let mut file = tempfile::NamedTempFile::new().expect("create temp file");
        file.write_all(b"definitely not an ELF").expect("write temp file");

        let image = BinaryImage::open(file.path()).expect("open temp file");
        assert!(matches!(image.symbols(), Err(ImageError::Object(_))));
    }
}
