use std::fmt::Debug;
use std::io;

use thiserror::Error;

#[derive(Error)]
pub enum TableError {
    #[error("File not found: {location}")]
    FileNotFound { location: String },

    #[error("Failed to read {location}: {source}")]
    Io {
        location: String,
        #[source]
        source: io::Error,
    },

    #[error("{location}: not a valid opcode table document: {source}")]
    MalformedJson {
        location: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Document has no {name:?} table")]
    MissingTable { name: String },

    #[error("Table {name:?} should be an object, found {found}")]
    MalformedTable { name: String, found: &'static str },

    #[error("Record {key:?} in table {table:?} should be an object, found {found}")]
    MalformedRecord {
        table: String,
        key: String,
        found: &'static str,
    },

    #[error("Record {key:?} in table {table:?} has a {found} group, expected a string")]
    BadGroupValue {
        table: String,
        key: String,
        found: &'static str,
    },

    #[error("Key {key:?} in table {table:?} is not an opcode key (expected 0x followed by two hex digits)")]
    BadOpcodeKey { table: String, key: String },
}

impl TableError {
    /// Maps an I/O failure to the matching error kind, keeping the file
    /// location for the diagnostic.
    pub fn from_io(location: &str, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::NotFound => TableError::FileNotFound {
                location: location.to_string(),
            },
            _ => TableError::Io {
                location: location.to_string(),
                source,
            },
        }
    }
}

#[macro_export]
macro_rules! tab_err {
    ($name:ident) => {
        Err(TableError::$name)
    };
    ($name:ident { $($arg:tt)* }) => {
        Err(TableError::$name { $($arg)* })
    };
    ($name:ident, $($arg:tt)*) => {
        Err(TableError::$name($($arg)*))
    };
}

impl Debug for TableError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_not_found_becomes_file_not_found() {
        let err = TableError::from_io(
            "opcodes.json",
            io::Error::new(io::ErrorKind::NotFound, "missing"),
        );
        assert!(matches!(err, TableError::FileNotFound { .. }));
        assert_eq!(err.to_string(), "File not found: opcodes.json");
    }

    #[test]
    fn other_io_errors_keep_their_source() {
        let err = TableError::from_io(
            "opcodes.json",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(matches!(err, TableError::Io { .. }));
        assert!(err.to_string().starts_with("Failed to read opcodes.json"));
    }

    #[test]
    fn debug_matches_display() {
        let err = TableError::MissingTable {
            name: "unprefixed".to_string(),
        };
        assert_eq!(format!("{:?}", err), format!("{}", err));
    }
}
