use chrono::NaiveDate;

use super::Block;

/// How a page is filed by the writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageKind {
    #[default]
    Ordinary,
    /// A journal page whose title is a calendar date.
    Daily,
    /// A `Weekly Plan: <date>` page.
    Weekly,
}

/// Why a page is kept out of the output.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RejectReason {
    #[error("page has neither create-time nor edit-time")]
    MissingTimestamp,
    #[error("timestamp {0} is out of range")]
    InvalidTimestamp(i64),
    #[error("malformed date {0:?}")]
    MalformedDate(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageStatus {
    Accepted { created: NaiveDate },
    /// Not written, but its blocks can still be referenced.
    Rejected(RejectReason),
}

/// A top-level document made of a block tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Graph uid of the page itself; pages are addressed by title, so this is rarely set.
    pub uid: Option<String>,
    pub title: String,
    pub kind: PageKind,
    pub status: PageStatus,
    pub children: Vec<Block>,
}

impl Page {
    pub fn new(title: impl Into<String>, created: NaiveDate) -> Self {
        Self {
            uid: None,
            title: title.into(),
            kind: PageKind::Ordinary,
            status: PageStatus::Accepted { created },
            children: Vec::new(),
        }
    }

    pub fn rejected(title: impl Into<String>, reason: RejectReason) -> Self {
        Self {
            uid: None,
            title: title.into(),
            kind: PageKind::Ordinary,
            status: PageStatus::Rejected(reason),
            children: Vec::new(),
        }
    }

    pub fn with_kind(mut self, kind: PageKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_children(mut self, children: Vec<Block>) -> Self {
        self.children = children;
        self
    }

    /// Creation date of an accepted page.
    pub fn created(&self) -> Option<NaiveDate> {
        match self.status {
            PageStatus::Accepted { created } => Some(created),
            PageStatus::Rejected(_) => None,
        }
    }

    pub fn rejection(&self) -> Option<&RejectReason> {
        match &self.status {
            PageStatus::Accepted { .. } => None,
            PageStatus::Rejected(reason) => Some(reason),
        }
    }

    /// Total number of blocks on the page at every depth.
    pub fn block_count(&self) -> usize {
        self.children.iter().map(Block::subtree_len).sum()
    }
}
