use chrono::NaiveDate;
use tempfile::TempDir;

use crate::models::{Block, Page};

/// Build a leaf block.
pub fn block(uid: &str, text: &str) -> Block {
    Block::new(uid, text)
}

/// Build an ordinary page created on 2023-01-01.
pub fn page(title: &str, children: Vec<Block>) -> Page {
    Page::new(title, date(2023, 1, 1)).with_children(children)
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Create a temporary output directory
pub fn create_test_output_dir() -> TempDir {
    tempfile::tempdir().unwrap()
}
