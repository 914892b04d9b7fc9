#![no_main]

use optab::table::{TableDocument, TableLocation, VerifyPreset};

extern crate libfuzzer_sys;
extern crate optab;

libfuzzer_sys::fuzz_target!(|data: &[u8]| {
    // this must not panic
    if let Ok(doc) = TableDocument::from_slice(data, TableLocation::InMemory) {
        if doc.verify(VerifyPreset::All).is_ok() {
            let _ = doc;
        }
    }
});
