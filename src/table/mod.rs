use std::fmt;

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

pub mod container;
pub use container::*;
pub mod record;
pub use record::*;
pub mod value;
pub use value::*;
pub mod verifier;
pub use verifier::*;
pub mod report;
pub use report::*;
pub mod groups;
pub use groups::*;

use crate::{tab_err, error::TableError, Result};

/// Table holding opcodes encoded without a prefix byte.
pub const UNPREFIXED: &str = "unprefixed";
/// Table holding opcodes encoded behind the 0xCB prefix byte.
pub const CBPREFIXED: &str = "cbprefixed";

#[derive(Debug, Clone)]
pub enum TableLocation {
    InMemory,
    Path(String),
}

impl From<&str> for TableLocation {
    fn from(s: &str) -> Self {
        TableLocation::Path(s.to_string())
    }
}

impl fmt::Display for TableLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableLocation::InMemory => write!(f, "[in-memory]"),
            TableLocation::Path(path) => write!(f, "{}", path),
        }
    }
}

/// Top-level frame of a document: named tables in document order.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
struct RawDocument {
    tables: IndexMap<String, Value>,
}

/// A parsed opcode table document.
///
/// The document is loaded once, held read-only, and never mutated. Top-level
/// keys whose value is not an object are kept aside as ignored entries so a
/// lookup can report them precisely instead of claiming they are missing.
#[derive(Debug)]
pub struct TableDocument {
    tables: IndexMap<String, OpcodeTable>,
    ignored: Vec<(String, &'static str)>,
    location: TableLocation,
}

impl TableDocument {
    pub fn from_raw_parts<'a, C: TableContainer<'a>>(
        base: &'a C,
        location: TableLocation,
    ) -> Result<TableDocument> {
        TableDocument::from_slice(base.data(), location)
    }

    pub fn from_slice(data: &[u8], location: TableLocation) -> Result<TableDocument> {
        let raw: RawDocument = match serde_json::from_slice(data) {
            Ok(raw) => raw,
            Err(source) => {
                return tab_err!(MalformedJson {
                    location: location.to_string(),
                    source,
                })
            }
        };

        let mut tables = IndexMap::with_capacity(raw.tables.len());
        let mut ignored = Vec::new();
        for (name, value) in &raw.tables {
            match value {
                Value::Object(_) => {
                    tables.insert(name.clone(), OpcodeTable::from_value(name, value)?);
                }
                other => ignored.push((name.clone(), json_type_name(other))),
            }
        }

        log::debug!(
            "parsed {}: tables={} ignored={}",
            location,
            tables.len(),
            ignored.len()
        );
        Ok(TableDocument {
            tables,
            ignored,
            location,
        })
    }

    pub fn open(container: &TableFileContainer) -> Result<TableDocument> {
        let loc = container.get_location();
        let doc = TableDocument::from_raw_parts(container.data(), TableLocation::from(loc))?;
        if container.verify {
            let preset = if container.verify_keys {
                VerifyPreset::All
            } else {
                VerifyPreset::GroupsOnly
            };
            doc.verify(preset)?;
        }
        Ok(doc)
    }

    /// Looks up a table by name. An ignored non-object entry under that name
    /// is `MalformedTable`; anything else absent is `MissingTable`.
    pub fn get_table(&self, name: &str) -> Result<&OpcodeTable> {
        if let Some(table) = self.tables.get(name) {
            return Ok(table);
        }
        for (ignored, found) in &self.ignored {
            if ignored == name {
                return tab_err!(MalformedTable {
                    name: name.to_string(),
                    found: *found,
                });
            }
        }
        tab_err!(MissingTable {
            name: name.to_string(),
        })
    }

    #[inline]
    pub fn unprefixed(&self) -> Result<&OpcodeTable> {
        self.get_table(UNPREFIXED)
    }

    pub fn tables(&self) -> impl Iterator<Item = &OpcodeTable> {
        self.tables.values()
    }

    /// Top-level keys skipped at load because their value was not an object,
    /// with the JSON type that was found.
    pub fn ignored(&self) -> &[(String, &'static str)] {
        &self.ignored
    }

    #[inline]
    pub fn num_tables(&self) -> usize {
        self.tables.len()
    }

    pub fn get_location(&self) -> &TableLocation {
        &self.location
    }
}

/// One named opcode table: an ordered mapping from opcode key to record.
///
/// Keys are unique (the JSON object source guarantees it) and iteration
/// follows document order.
#[derive(Debug)]
pub struct OpcodeTable {
    name: String,
    records: IndexMap<String, OpcodeRecord>,
}

impl OpcodeTable {
    pub fn from_value(name: &str, value: &Value) -> Result<OpcodeTable> {
        let Value::Object(raw) = value else {
            return tab_err!(MalformedTable {
                name: name.to_string(),
                found: json_type_name(value),
            });
        };

        let mut records = IndexMap::with_capacity(raw.len());
        for (key, value) in raw {
            records.insert(key.clone(), OpcodeRecord::from_value(name, key, value)?);
        }
        Ok(OpcodeTable {
            name: name.to_string(),
            records,
        })
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[inline]
    pub fn get(&self, key: &str) -> Option<&OpcodeRecord> {
        self.records.get(key)
    }

    /// Records in document order.
    pub fn records(&self) -> impl Iterator<Item = (&str, &OpcodeRecord)> {
        self.records.iter().map(|(key, record)| (key.as_str(), record))
    }

    /// Lazy record report over this table: a data line per record plus a
    /// warning line per record without a `group` field.
    pub fn report(&self) -> ReportIter<'_> {
        ReportIter::new(self.records.iter())
    }
}
