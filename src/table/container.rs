use std::fs::File;
use std::ops::Deref;
use std::path::Path;

use crate::{tab_err, error::TableError, Result};

use super::TableDocument;

/// Byte source a document can be parsed from.
pub trait TableContainer<'a>: AsRef<[u8]> + Deref<Target = [u8]> + 'a {
    fn data(&'a self) -> &'a [u8] {
        self.as_ref()
    }

    fn file_size(&'a self) -> usize {
        self.data().len()
    }
}

impl<'a> TableContainer<'a> for memmap2::Mmap {}

pub struct InMemoryTableContainer<'a>(&'a [u8]);

impl<'a> InMemoryTableContainer<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self(data)
    }
}

impl<'a> Deref for InMemoryTableContainer<'a> {
    type Target = [u8];
    fn deref(&self) -> &'a Self::Target {
        self.0
    }
}

impl<'a> AsRef<[u8]> for InMemoryTableContainer<'a> {
    fn as_ref(&self) -> &'a [u8] {
        self.0
    }
}

impl<'a> TableContainer<'a> for InMemoryTableContainer<'a> {}

impl<'a> TableContainer<'a> for &'a [u8] {}

/// Maps an opcode table file and remembers how it should be checked.
///
/// The mapping lives exactly as long as the container, so the file is
/// released on every exit path once parsing is done.
#[derive(Debug)]
pub struct TableFileContainer {
    mmap: memmap2::Mmap,
    location: String,
    pub verify: bool,
    pub verify_keys: bool,
}

impl TableFileContainer {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let location = path.as_ref().display().to_string();
        let file = match File::open(path.as_ref()) {
            Ok(file) => file,
            Err(source) => return Err(TableError::from_io(&location, source)),
        };

        // An empty file cannot be mapped; hand it to serde_json so the
        // diagnostic talks about the document rather than the mapping.
        match file.metadata() {
            Ok(meta) if meta.len() == 0 => {
                if let Err(source) = serde_json::from_slice::<serde_json::Value>(&[]) {
                    return tab_err!(MalformedJson { location, source });
                }
            }
            Ok(_) => {}
            Err(source) => return Err(TableError::from_io(&location, source)),
        }

        let mmap = match unsafe { memmap2::Mmap::map(&file) } {
            Ok(mmap) => mmap,
            Err(source) => return Err(TableError::from_io(&location, source)),
        };
        Ok(Self {
            mmap,
            location,
            verify: false,
            verify_keys: false,
        })
    }

    pub fn location(mut self, location: String) -> Self {
        self.location = location;
        self
    }

    /// Check every present `group` field for a string value while opening.
    pub fn verify(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }

    /// Additionally check that every key spells an opcode (`0x` + two hex
    /// digits). Only takes effect together with [`verify`](Self::verify).
    pub fn verify_keys(mut self, verify_keys: bool) -> Self {
        self.verify_keys = verify_keys;
        self
    }

    pub fn open(&self) -> Result<TableDocument> {
        TableDocument::open(self)
    }

    pub fn get_location(&self) -> &str {
        &self.location
    }

    pub fn data(&self) -> &memmap2::Mmap {
        &self.mmap
    }
}
