#![allow(unused)]

use optab::table::{TableDocument, TableFileContainer};
use optab::Result;

fn main() -> Result<()> {
    let container = TableFileContainer::new("tests/gbops/opcodes.json")?;
    let doc = container.open()?;
    let table = doc.unprefixed()?;

    // one pass over the table; groups keep first-seen order
    let index = table.group_index();
    for (group, keys) in index.groups() {
        println!("{}: {}", group, keys.join(", "));
    }

    // records without a usable string group end up here
    if !index.ungrouped().is_empty() {
        println!("unclassified: {}", index.ungrouped().join(", "));
    }

    // or render everything as one summary table
    println!("{}", index.summary_table());
    Ok(())
}
