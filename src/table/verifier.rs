use crate::{tab_err, error::TableError, Result};

use super::{OpcodeTable, TableDocument, GROUP_FIELD};

/// How much of a document to check beyond its basic structure.
///
/// Structure itself (tables and records must be objects) is enforced while
/// parsing and cannot be skipped.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum VerifyPreset {
    None,
    /// Present `group` fields must hold strings.
    GroupsOnly,
    /// `GroupsOnly` plus opcode key syntax.
    All,
}

/// Parses an opcode key of the `0x` + two hex digits convention.
pub fn parse_opcode_key(key: &str) -> Option<u8> {
    let digits = key.strip_prefix("0x")?;
    if digits.len() != 2 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u8::from_str_radix(digits, 16).ok()
}

impl TableDocument {
    /// Runs `preset` over every table in the document.
    pub fn verify(&self, preset: VerifyPreset) -> Result<()> {
        log::debug!(
            "verify {}: preset={:?} tables={}",
            self.get_location(),
            preset,
            self.num_tables()
        );
        for table in self.tables() {
            table.verify(preset)?;
        }
        Ok(())
    }
}

impl OpcodeTable {
    pub fn verify(&self, preset: VerifyPreset) -> Result<()> {
        match preset {
            VerifyPreset::None => Ok(()),
            VerifyPreset::GroupsOnly => check_groups(self),
            VerifyPreset::All => {
                check_groups(self)?;
                check_keys(self)
            }
        }
    }
}

fn check_groups(table: &OpcodeTable) -> Result<()> {
    for (key, record) in table.records() {
        if let Some(value) = record.get(GROUP_FIELD) {
            if value.as_str().is_none() {
                return tab_err!(BadGroupValue {
                    table: table.name().to_string(),
                    key: key.to_string(),
                    found: value.type_name(),
                });
            }
        }
    }
    Ok(())
}

fn check_keys(table: &OpcodeTable) -> Result<()> {
    for (key, _) in table.records() {
        if parse_opcode_key(key).is_none() {
            return tab_err!(BadOpcodeKey {
                table: table.name().to_string(),
                key: key.to_string(),
            });
        }
    }
    Ok(())
}
