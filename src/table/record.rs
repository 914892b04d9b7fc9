use std::fmt;

use indexmap::IndexMap;
use serde_json::Value;

use crate::{tab_err, error::TableError, Result};

use super::value::{json_type_name, FieldValue};

/// Field name carrying the optional group classification.
pub const GROUP_FIELD: &str = "group";

/// Metadata attached to a single opcode.
///
/// Records are open-ended: apart from the optional [`GROUP_FIELD`] no field
/// name or shape is required. Fields keep their document order.
#[derive(Debug, Clone, PartialEq)]
pub struct OpcodeRecord {
    fields: IndexMap<String, FieldValue>,
}

impl OpcodeRecord {
    /// Converts one raw table entry. Anything but a JSON object is rejected
    /// with `MalformedRecord` naming the table and key.
    pub fn from_value(table: &str, key: &str, value: &Value) -> Result<OpcodeRecord> {
        let Value::Object(raw) = value else {
            return tab_err!(MalformedRecord {
                table: table.to_string(),
                key: key.to_string(),
                found: json_type_name(value),
            });
        };

        let fields = raw
            .iter()
            .map(|(name, value)| (name.clone(), FieldValue::from(value)))
            .collect();
        Ok(OpcodeRecord { fields })
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Whether a `group` field is present at all. The missing-group warning
    /// keys off presence, not the value: `null` or `""` still count.
    #[inline]
    pub fn has_group(&self) -> bool {
        self.fields.contains_key(GROUP_FIELD)
    }

    /// The group name, if the record carries one as a string.
    #[inline]
    pub fn group(&self) -> Option<&str> {
        self.get(GROUP_FIELD).and_then(FieldValue::as_str)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl fmt::Display for OpcodeRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (name, value)) in self.fields.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", name, value)?;
        }
        write!(f, "}}")
    }
}
