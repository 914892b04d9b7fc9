use std::fmt;
use std::io::{self, Write};

use super::{OpcodeRecord, OpcodeTable};

/// One emitted report line.
///
/// Borrows from the table, so a line never outlives the document it was
/// generated from.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportLine<'a> {
    /// Data line for one record, in table order.
    Record {
        key: &'a str,
        record: &'a OpcodeRecord,
    },
    /// Warning line for a record without a `group` field. Always follows the
    /// data line of the same key.
    MissingGroup { key: &'a str },
}

impl<'a> ReportLine<'a> {
    #[inline]
    pub fn key(&self) -> &'a str {
        match self {
            ReportLine::Record { key, .. } => key,
            ReportLine::MissingGroup { key } => key,
        }
    }

    #[inline]
    pub fn is_warning(&self) -> bool {
        matches!(self, ReportLine::MissingGroup { .. })
    }
}

impl fmt::Display for ReportLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportLine::Record { key, record } => {
                write!(f, "Opcode: {}, Data: {}", key, record)
            }
            ReportLine::MissingGroup { key } => {
                write!(f, "Opcode {} does not have a group.", key)
            }
        }
    }
}

/// Lazy record report: one [`ReportLine::Record`] per record in table order,
/// immediately followed by a [`ReportLine::MissingGroup`] whenever the record
/// carries no `group` field at all. Single pass, not restartable.
pub struct ReportIter<'a> {
    records: indexmap::map::Iter<'a, String, OpcodeRecord>,
    pending_warning: Option<&'a str>,
}

impl<'a> ReportIter<'a> {
    pub(crate) fn new(records: indexmap::map::Iter<'a, String, OpcodeRecord>) -> Self {
        Self {
            records,
            pending_warning: None,
        }
    }
}

impl<'a> Iterator for ReportIter<'a> {
    type Item = ReportLine<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(key) = self.pending_warning.take() {
            return Some(ReportLine::MissingGroup { key });
        }
        let (key, record) = self.records.next()?;
        if !record.has_group() {
            self.pending_warning = Some(key);
        }
        Some(ReportLine::Record { key, record })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (lo, hi) = self.records.size_hint();
        let pending = usize::from(self.pending_warning.is_some());
        // every remaining record may bring a warning with it
        (lo + pending, hi.map(|hi| hi * 2 + pending))
    }
}

// Blanket impl so any Write sink gets the report operations.
impl<W: Write> ReportWrite for W {}

/// Writes report lines to any [`Write`] sink, one line each.
pub trait ReportWrite: Write {
    fn write_report_line(&mut self, line: &ReportLine<'_>) -> io::Result<()> {
        writeln!(self, "{}", line)
    }

    /// Drains a full record report for `table` into this sink.
    fn write_report(&mut self, table: &OpcodeTable) -> io::Result<()> {
        for line in table.report() {
            self.write_report_line(&line)?;
        }
        Ok(())
    }
}
