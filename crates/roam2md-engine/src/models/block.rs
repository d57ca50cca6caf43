/// A node in the note graph.
///
/// `uid` is unique across the whole corpus, not only within the owning page.
/// The owning page is not stored here; the [`BlockIndex`](crate::index::BlockIndex)
/// pairs each block with its page when the corpus is indexed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub uid: String,
    /// Raw text, possibly multi-line and containing reference markers.
    pub text: String,
    /// Heading level, `0` when the block is not a heading.
    pub heading: u8,
    /// Child blocks in document order.
    pub children: Vec<Block>,
}

impl Block {
    pub fn new(uid: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            text: text.into(),
            heading: 0,
            children: Vec::new(),
        }
    }

    pub fn with_heading(mut self, heading: u8) -> Self {
        self.heading = heading;
        self
    }

    pub fn with_children(mut self, children: Vec<Block>) -> Self {
        self.children = children;
        self
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of blocks in this subtree, including `self`.
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(Block::subtree_len).sum::<usize>()
    }
}
