#![allow(unused)]

use std::io;

use optab::table::{ReportLine, ReportWrite, TableDocument, TableFileContainer, TableLocation};
use optab::Result;

fn report_from_file(path: &str) -> Result<()> {
    // the container owns the file mapping; it is released when the
    // container drops, after parsing is done
    let container = TableFileContainer::new(path)?
        .verify(true)
        .verify_keys(true);

    let doc = container.open()?;
    let table = doc.unprefixed()?;

    // write_report drains the whole report into any io::Write sink
    let stdout = io::stdout();
    let mut out = stdout.lock();
    out.write_report(table).map_err(|source| {
        optab::error::TableError::from_io(container.get_location(), source)
    })?;
    Ok(())
}

fn report_line_by_line(data: &[u8]) -> Result<()> {
    let doc = TableDocument::from_slice(data, TableLocation::InMemory)?;

    // report() is a lazy iterator; warnings follow their data line
    for line in doc.unprefixed()?.report() {
        match line {
            ReportLine::Record { key, record } => {
                println!("{} has {} fields", key, record.len());
            }
            ReportLine::MissingGroup { key } => {
                eprintln!("{} is not classified", key);
            }
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    report_from_file("tests/gbops/opcodes.json")?;
    report_line_by_line(br#"{"unprefixed": {"0x00": {"mnemonic": "NOP"}}}"#)?;
    Ok(())
}
