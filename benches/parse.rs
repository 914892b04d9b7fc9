use criterion::{criterion_group, criterion_main, Criterion};
use optab::table::{InMemoryTableContainer, TableDocument, TableLocation, VerifyPreset};

fn parse_and_verify_small_document(c: &mut Criterion) {
    let data = include_bytes!("../tests/gbops/opcodes.json");
    c.bench_function("parse_and_verify_small_document", |b| {
        b.iter(|| {
            let container = InMemoryTableContainer::new(data);
            if let Ok(doc) = TableDocument::from_raw_parts(&container, TableLocation::InMemory) {
                if doc.verify(VerifyPreset::All).is_ok() {
                    assert_eq!(doc.num_tables(), 2);
                }
            }
        })
    });
}

fn parse_small_document(c: &mut Criterion) {
    let data = include_bytes!("../tests/gbops/opcodes.json");
    c.bench_function("parse_small_document", |b| {
        b.iter(|| {
            let container = InMemoryTableContainer::new(data);
            if let Ok(doc) = TableDocument::from_raw_parts(&container, TableLocation::InMemory) {
                assert_eq!(doc.num_tables(), 2);
            }
        })
    });
}

criterion_group!(benches, parse_and_verify_small_document, parse_small_document);
criterion_main!(benches);
