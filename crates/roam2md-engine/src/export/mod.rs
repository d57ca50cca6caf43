//! # Roam Export Loading
//!
//! Reads the JSON export (an array of pages with nested `children`) into
//! [`Page`] and [`Block`] records, classifying daily and weekly pages by title.
//! A page that cannot be dated is still loaded, marked rejected, so references
//! to its blocks resolve.

pub mod titles;

pub use titles::classify_title;

use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate};
use serde::Deserialize;

pub use crate::models::RejectReason;

use crate::models::{Block, Page};

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Failed to read export at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid export JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// A loaded export: every page in file order, rejected ones included.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Export {
    pub pages: Vec<Page>,
}

impl Export {
    /// Pages that will not be written, with the reason.
    pub fn rejected(&self) -> impl Iterator<Item = (&Page, &RejectReason)> {
        self.pages
            .iter()
            .filter_map(|page| page.rejection().map(|reason| (page, reason)))
    }
}

#[derive(Debug, Deserialize)]
struct RawPage {
    #[serde(default)]
    title: String,
    #[serde(rename = "create-time")]
    create_time: Option<i64>,
    #[serde(rename = "edit-time")]
    edit_time: Option<i64>,
    uid: Option<String>,
    #[serde(default)]
    children: Vec<RawBlock>,
}

#[derive(Debug, Deserialize)]
struct RawBlock {
    uid: String,
    #[serde(default)]
    string: String,
    heading: Option<u8>,
    #[serde(default)]
    children: Vec<RawBlock>,
}

impl From<RawBlock> for Block {
    fn from(raw: RawBlock) -> Self {
        Block {
            uid: raw.uid,
            text: raw.string,
            heading: raw.heading.unwrap_or(0),
            children: raw.children.into_iter().map(Block::from).collect(),
        }
    }
}

impl From<RawPage> for Page {
    fn from(raw: RawPage) -> Self {
        let created = raw
            .create_time
            .or(raw.edit_time)
            .ok_or(RejectReason::MissingTimestamp)
            .and_then(created_date);

        let page = match (created, classify_title(&raw.title)) {
            (Ok(created), Ok((kind, title))) => Page::new(title, created).with_kind(kind),
            (Err(reason), _) | (_, Err(reason)) => {
                log::warn!("not writing page {:?}: {reason}", raw.title);
                Page::rejected(raw.title, reason)
            }
        };

        let mut page = page.with_children(raw.children.into_iter().map(Block::from).collect());
        page.uid = raw.uid;
        page
    }
}

/// Calendar date (UTC) of a millisecond Unix timestamp.
fn created_date(millis: i64) -> Result<NaiveDate, RejectReason> {
    DateTime::from_timestamp_millis(millis)
        .map(|dt| dt.date_naive())
        .ok_or(RejectReason::InvalidTimestamp(millis))
}

/// Parse an export document.
pub fn parse_export(json: &str) -> Result<Export, ExportError> {
    let raw: Vec<RawPage> = serde_json::from_str(json)?;
    Ok(Export {
        pages: raw.into_iter().map(Page::from).collect(),
    })
}

/// Read and parse an export file. Invalid UTF-8 is replaced rather than rejected.
pub fn load_export(path: &Path) -> Result<Export, ExportError> {
    let bytes = std::fs::read(path).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let export = parse_export(&String::from_utf8_lossy(&bytes))?;
    log::info!(
        "loaded {} pages from {} ({} rejected)",
        export.pages.len(),
        path.display(),
        export.rejected().count()
    );
    Ok(export)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PageKind;
    use crate::tests::{create_test_output_dir, date};
    use pretty_assertions::assert_eq;

    // 2023-01-05T12:00:00Z
    const JAN_5_NOON: i64 = 1_672_920_000_000;

    #[test]
    fn loads_pages_and_nested_blocks() {
        let json = format!(
            r#"[{{
                "title": "Reading List",
                "create-time": {JAN_5_NOON},
                "edit-time": 0,
                "children": [
                    {{"uid": "aaaaaaaaa", "string": "Books", "heading": 2,
                      "children": [{{"uid": "bbbbbbbbb", "string": "Dune", "create-time": 1}}]}},
                    {{"uid": "ccccccccc"}}
                ]
            }}]"#
        );

        let export = parse_export(&json).unwrap();

        assert_eq!(export.rejected().count(), 0);
        let page = &export.pages[0];
        assert_eq!(page.title, "Reading List");
        assert_eq!(page.created(), Some(date(2023, 1, 5)));
        assert_eq!(page.kind, PageKind::Ordinary);
        assert_eq!(
            page.children,
            vec![
                Block::new("aaaaaaaaa", "Books")
                    .with_heading(2)
                    .with_children(vec![Block::new("bbbbbbbbb", "Dune")]),
                Block::new("ccccccccc", ""),
            ]
        );
    }

    #[test]
    fn falls_back_to_edit_time() {
        let json = format!(r#"[{{"title": "Edited", "edit-time": {JAN_5_NOON}}}]"#);

        let export = parse_export(&json).unwrap();

        assert_eq!(export.pages[0].created(), Some(date(2023, 1, 5)));
        assert!(export.pages[0].children.is_empty());
    }

    #[test]
    fn daily_titles_are_normalised() {
        let json = format!(r#"[{{"title": "January 5th, 2023", "edit-time": {JAN_5_NOON}}}]"#);

        let export = parse_export(&json).unwrap();

        assert_eq!(export.pages[0].title, "2023-01-05");
        assert_eq!(export.pages[0].kind, PageKind::Daily);
    }

    #[test]
    fn bad_pages_are_rejected_individually() {
        let json = format!(
            r#"[
                {{"title": "No Time"}},
                {{"title": "February 30th, 2023", "edit-time": {JAN_5_NOON}}},
                {{"title": "Fine", "edit-time": {JAN_5_NOON}}}
            ]"#
        );

        let export = parse_export(&json).unwrap();

        assert_eq!(export.pages.len(), 3);
        assert_eq!(export.pages[2].created(), Some(date(2023, 1, 5)));
        let rejected: Vec<_> = export
            .rejected()
            .map(|(page, reason)| (page.title.as_str(), reason.clone()))
            .collect();
        assert_eq!(
            rejected,
            vec![
                ("No Time", RejectReason::MissingTimestamp),
                (
                    "February 30th, 2023",
                    RejectReason::MalformedDate("February 30th, 2023".to_string())
                ),
            ]
        );
    }

    #[test]
    fn rejected_pages_keep_their_blocks() {
        let json = r#"[{
            "title": "No Time",
            "children": [{"uid": "target001", "string": "kept"}]
        }]"#;

        let export = parse_export(json).unwrap();

        let page = &export.pages[0];
        assert_eq!(page.rejection(), Some(&RejectReason::MissingTimestamp));
        assert_eq!(page.created(), None);
        assert_eq!(page.children, vec![Block::new("target001", "kept")]);
    }

    #[test]
    fn non_array_document_is_an_error() {
        let result = parse_export(r#"{"title": "not an array"}"#);
        assert!(matches!(result, Err(ExportError::Json(_))));
    }

    #[test]
    fn load_missing_file_reports_path() {
        let dir = create_test_output_dir();
        let path = dir.path().join("missing.json");

        let err = load_export(&path).unwrap_err();

        assert!(matches!(err, ExportError::Io { .. }));
        assert!(err.to_string().contains("missing.json"));
    }

    #[test]
    fn load_tolerates_invalid_utf8() {
        let dir = create_test_output_dir();
        let path = dir.path().join("export.json");
        let mut bytes = br#"[{"title": "Caf"#.to_vec();
        bytes.push(0xff);
        bytes.extend(format!(r#"", "edit-time": {JAN_5_NOON}}}]"#).into_bytes());
        std::fs::write(&path, bytes).unwrap();

        let export = load_export(&path).unwrap();

        assert_eq!(export.pages[0].title, "Caf\u{fffd}");
    }
}
