use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use indexmap::IndexMap;

use super::OpcodeTable;

/// Label used for the catch-all bucket in the rendered summary.
pub const UNGROUPED_LABEL: &str = "(ungrouped)";

/// Opcodes of one table bucketed by their `group` value.
///
/// Groups appear in first-seen order, keys inside a bucket in table order.
/// Records whose `group` is absent or not a string land in the ungrouped
/// bucket; strict verification is the place to reject the latter.
pub struct GroupIndex<'a> {
    groups: IndexMap<&'a str, Vec<&'a str>>,
    ungrouped: Vec<&'a str>,
}

impl OpcodeTable {
    /// Builds the group index in one pass over the table.
    pub fn group_index(&self) -> GroupIndex<'_> {
        let mut groups: IndexMap<&str, Vec<&str>> = IndexMap::new();
        let mut ungrouped = Vec::new();
        for (key, record) in self.records() {
            match record.group() {
                Some(group) => groups.entry(group).or_default().push(key),
                None => ungrouped.push(key),
            }
        }
        log::debug!(
            "group index for {:?}: groups={} ungrouped={}",
            self.name(),
            groups.len(),
            ungrouped.len()
        );
        GroupIndex { groups, ungrouped }
    }
}

impl<'a> GroupIndex<'a> {
    /// Group buckets in first-seen order.
    pub fn groups<'s>(&'s self) -> impl Iterator<Item = (&'a str, &'s [&'a str])> + 's {
        self.groups.iter().map(|(name, keys)| (*name, &keys[..]))
    }

    #[inline]
    pub fn get(&self, group: &str) -> Option<&[&'a str]> {
        self.groups.get(group).map(Vec::as_slice)
    }

    /// Keys without a usable string `group`, in table order.
    #[inline]
    pub fn ungrouped(&self) -> &[&'a str] {
        &self.ungrouped
    }

    #[inline]
    pub fn num_groups(&self) -> usize {
        self.groups.len()
    }

    /// Renders the summary as a bordered table, one row per group plus an
    /// ungrouped row when applicable.
    pub fn summary_table(&self) -> Table {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec!["Group", "Count", "Opcodes"]);
        for (group, keys) in self.groups() {
            table.add_row(vec![
                group.to_string(),
                keys.len().to_string(),
                keys.join(", "),
            ]);
        }
        if !self.ungrouped.is_empty() {
            table.add_row(vec![
                UNGROUPED_LABEL.to_string(),
                self.ungrouped.len().to_string(),
                self.ungrouped.join(", "),
            ]);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{TableDocument, TableLocation};

    fn doc(data: &str) -> TableDocument {
        TableDocument::from_slice(data.as_bytes(), TableLocation::InMemory)
            .expect("document should parse")
    }

    #[test]
    fn buckets_in_first_seen_order() {
        let doc = doc(
            r#"{"unprefixed": {
                "0x00": {"group": "control/misc"},
                "0x80": {"group": "x8/alu"},
                "0x10": {"group": "control/misc"},
                "0x81": {"group": "x8/alu"}}}"#,
        );
        let index = doc.unprefixed().unwrap().group_index();
        let names: Vec<&str> = index.groups().map(|(name, _)| name).collect();
        assert_eq!(names, ["control/misc", "x8/alu"]);
        assert_eq!(index.get("control/misc"), Some(&["0x00", "0x10"][..]));
        assert_eq!(index.get("x8/alu"), Some(&["0x80", "0x81"][..]));
        assert!(index.ungrouped().is_empty());
    }

    #[test]
    fn absent_and_non_string_groups_land_ungrouped() {
        let doc = doc(
            r#"{"unprefixed": {
                "0x00": {"mnemonic": "NOP"},
                "0x01": {"group": null},
                "0x02": {"group": 7},
                "0x03": {"group": "x8/lsm"}}}"#,
        );
        let index = doc.unprefixed().unwrap().group_index();
        assert_eq!(index.num_groups(), 1);
        assert_eq!(index.ungrouped(), ["0x00", "0x01", "0x02"]);
    }

    #[test]
    fn empty_group_name_is_a_real_bucket() {
        let doc = doc(r#"{"unprefixed": {"0x00": {"group": ""}}}"#);
        let index = doc.unprefixed().unwrap().group_index();
        assert_eq!(index.get(""), Some(&["0x00"][..]));
        assert!(index.ungrouped().is_empty());
    }

    #[test]
    fn summary_lists_every_bucket() {
        let doc = doc(
            r#"{"unprefixed": {
                "0x00": {"group": "control/misc"},
                "0x01": {"mnemonic": "LD"}}}"#,
        );
        let rendered = doc.unprefixed().unwrap().group_index().summary_table().to_string();
        assert!(rendered.contains("control/misc"));
        assert!(rendered.contains(UNGROUPED_LABEL));
        assert!(rendered.contains("0x01"));
    }

    #[test]
    fn empty_table_summarizes_to_header_only() {
        let doc = doc(r#"{"unprefixed": {}}"#);
        let index = doc.unprefixed().unwrap().group_index();
        assert_eq!(index.num_groups(), 0);
        let rendered = index.summary_table().to_string();
        assert!(!rendered.contains(UNGROUPED_LABEL));
    }
}
