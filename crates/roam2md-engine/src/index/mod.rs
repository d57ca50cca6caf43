//! # Block Index
//!
//! Corpus-wide lookup from block uid to the block and the page that owns it.
//! Built once before any rendering and read-only afterwards.

pub mod discovery;

pub use discovery::DiscoverySet;

use std::collections::HashMap;

use crate::models::{Block, Page};

/// A block paired with its owning page.
#[derive(Debug, Clone, Copy)]
pub struct IndexedBlock<'a> {
    pub block: &'a Block,
    pub page: &'a Page,
}

/// Map from uid to every block of every page, at every depth.
///
/// A uid seen twice keeps the block visited last. Duplicates are logged and
/// kept in [`BlockIndex::duplicates`] so callers can report them.
#[derive(Debug, Default)]
pub struct BlockIndex<'a> {
    blocks: HashMap<&'a str, IndexedBlock<'a>>,
    duplicates: Vec<&'a str>,
}

impl<'a> BlockIndex<'a> {
    pub fn build(pages: &'a [Page]) -> Self {
        let mut index = Self::default();
        for page in pages {
            for block in &page.children {
                index.insert_subtree(block, page);
            }
        }
        log::debug!(
            "indexed {} blocks across {} pages",
            index.blocks.len(),
            pages.len()
        );
        index
    }

    fn insert_subtree(&mut self, block: &'a Block, page: &'a Page) {
        let entry = IndexedBlock { block, page };
        if self.blocks.insert(block.uid.as_str(), entry).is_some() {
            log::warn!(
                "duplicate block uid {} (keeping the one on page {:?})",
                block.uid,
                page.title
            );
            self.duplicates.push(block.uid.as_str());
        }
        for child in &block.children {
            self.insert_subtree(child, page);
        }
    }

    pub fn get(&self, uid: &str) -> Option<IndexedBlock<'a>> {
        self.blocks.get(uid).copied()
    }

    pub fn contains(&self, uid: &str) -> bool {
        self.blocks.contains_key(uid)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Uids that were seen more than once while building, in visit order.
    pub fn duplicates(&self) -> &[&'a str] {
        &self.duplicates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{block, date, page};

    #[test]
    fn indexes_blocks_at_every_depth() {
        let pages = vec![
            page(
                "Alpha",
                vec![block("aaaaaaaa1", "top").with_children(vec![
                    block("aaaaaaaa2", "child")
                        .with_children(vec![block("aaaaaaaa3", "grandchild")]),
                ])],
            ),
            page("Beta", vec![block("bbbbbbbb1", "other page")]),
        ];

        let index = BlockIndex::build(&pages);

        assert_eq!(index.len(), 4);
        let grandchild = index.get("aaaaaaaa3").unwrap();
        assert_eq!(grandchild.block.text, "grandchild");
        assert_eq!(grandchild.page.title, "Alpha");
        assert_eq!(index.get("bbbbbbbb1").unwrap().page.title, "Beta");
        assert!(index.duplicates().is_empty());
    }

    #[test]
    fn empty_titled_pages_are_still_indexed() {
        let pages = vec![page("", vec![block("hidden001", "still resolvable")])];

        let index = BlockIndex::build(&pages);

        assert!(index.contains("hidden001"));
    }

    #[test]
    fn duplicate_uid_keeps_last_visited_block() {
        let pages = vec![
            page("First", vec![block("dupdupdup", "first copy")]),
            page("Second", vec![block("dupdupdup", "second copy")]),
        ];

        let index = BlockIndex::build(&pages);

        assert_eq!(index.len(), 1);
        assert_eq!(index.get("dupdupdup").unwrap().block.text, "second copy");
        assert_eq!(index.duplicates(), &["dupdupdup"]);
    }

    #[test]
    fn index_does_not_touch_block_content() {
        let pages = vec![Page::new("Gamma", date(2023, 1, 5)).with_children(vec![block(
            "ggggggggg",
            "((ggggggggg))",
        )])];
        let before = pages.clone();

        let _ = BlockIndex::build(&pages);

        assert_eq!(pages, before);
    }
}
