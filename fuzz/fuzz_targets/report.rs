#![no_main]

use optab::table::{ReportWrite, TableDocument, TableLocation};

extern crate libfuzzer_sys;
extern crate optab;

libfuzzer_sys::fuzz_target!(|data: &[u8]| {
    // reporting and grouping must not panic on anything that parses
    if let Ok(doc) = TableDocument::from_slice(data, TableLocation::InMemory) {
        for table in doc.tables() {
            let mut out = Vec::new();
            let _ = out.write_report(table);
            let _ = table.group_index().summary_table().to_string();
        }
    }
});
