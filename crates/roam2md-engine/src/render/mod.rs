//! # Outline Rendering
//!
//! Walks a page's block tree depth-first and produces one output entry per
//! block: indentation, bullet, heading markup, checkbox, resolved text and,
//! for blocks something else references, a trailing `^uid` anchor.

use crate::index::DiscoverySet;
use crate::models::Block;
use crate::parsing::kinds::Checkbox;
use crate::resolve::{ResolveError, Resolver, UnresolvedMarker};

/// One level of nesting.
pub const INDENT: &str = "    ";
pub const BULLET: &str = "- ";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("block {uid}: {source}")]
pub struct RenderError {
    pub uid: String,
    #[source]
    pub source: ResolveError,
}

/// An unresolved marker together with the block whose text contained it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockDiagnostic {
    pub block: String,
    pub marker: UnresolvedMarker,
}

/// Rendered lines for a block list, one per block, in depth-first order.
///
/// A line holds a newline of its own when the block text is multi-line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedBlocks {
    pub lines: Vec<String>,
    pub unresolved: Vec<BlockDiagnostic>,
}

pub struct Renderer<'r, 'i, 'a> {
    resolver: &'r Resolver<'i, 'a>,
}

impl<'r, 'i, 'a> Renderer<'r, 'i, 'a> {
    pub fn new(resolver: &'r Resolver<'i, 'a>) -> Self {
        Self { resolver }
    }

    /// Renders `blocks` as top-level siblings.
    pub fn render(
        &self,
        blocks: &[Block],
        discovered: &mut DiscoverySet,
    ) -> Result<RenderedBlocks, RenderError> {
        let mut out = RenderedBlocks::default();
        self.render_level(blocks, 0, discovered, &mut out)?;
        Ok(out)
    }

    fn render_level(
        &self,
        blocks: &[Block],
        depth: usize,
        discovered: &mut DiscoverySet,
        out: &mut RenderedBlocks,
    ) -> Result<(), RenderError> {
        for block in blocks {
            let prefix = line_prefix(block, depth);
            let text = Checkbox::translate(&block.text);
            let resolution = self
                .resolver
                .resolve(&text, discovered)
                .map_err(|source| RenderError {
                    uid: block.uid.clone(),
                    source,
                })?;

            let mut line = prefix.clone();
            if block.heading > 0 {
                line.push_str(&"#".repeat(block.heading as usize));
                line.push(' ');
            }
            line.push_str(&resolution.text);
            if discovered.contains(&block.uid) {
                line.push_str(" ^");
                line.push_str(&block.uid);
            }

            out.lines.push(reflow(&line, &prefix));
            out.unresolved
                .extend(resolution.unresolved.into_iter().map(|marker| BlockDiagnostic {
                    block: block.uid.clone(),
                    marker,
                }));

            self.render_level(&block.children, depth + 1, discovered, out)?;
        }
        Ok(())
    }
}

/// Indentation and bullet for a block at `depth`.
///
/// Top-level leaf blocks render as plain paragraphs.
pub fn line_prefix(block: &Block, depth: usize) -> String {
    let mut prefix = INDENT.repeat(depth);
    if depth > 0 || !block.is_leaf() {
        prefix.push_str(BULLET);
    }
    prefix
}

/// Re-indents every continuation line of `line` with `prefix`.
///
/// The final character is left as it is, so a trailing newline does not
/// gain a dangling prefix.
fn reflow(line: &str, prefix: &str) -> String {
    if !line.contains('\n') {
        return line.to_string();
    }
    let last_len = line.chars().next_back().map_or(0, char::len_utf8);
    let (body, last) = line.split_at(line.len() - last_len);
    let mut out = body.replace('\n', &format!("\n{prefix}"));
    out.push_str(last);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::BlockIndex;
    use crate::models::Page;
    use crate::tests::{block, page};
    use pretty_assertions::assert_eq;

    fn render_page(pages: &[Page], which: usize, discovered: &mut DiscoverySet) -> Vec<String> {
        let index = BlockIndex::build(pages);
        let resolver = Resolver::new(&index);
        Renderer::new(&resolver)
            .render(&pages[which].children, discovered)
            .unwrap()
            .lines
    }

    #[test]
    fn top_level_leaf_has_no_bullet() {
        let pages = vec![page("P", vec![block("aaaaaaaaa", "just text")])];
        let lines = render_page(&pages, 0, &mut DiscoverySet::new());
        assert_eq!(lines, vec!["just text"]);
    }

    #[test]
    fn nested_blocks_indent_strictly_deeper() {
        let pages = vec![page(
            "P",
            vec![block("aaaaaaaaa", "parent").with_children(vec![
                block("bbbbbbbbb", "child").with_children(vec![block("ccccccccc", "grandchild")]),
            ])],
        )];

        let lines = render_page(&pages, 0, &mut DiscoverySet::new());

        assert_eq!(
            lines,
            vec!["- parent", "    - child", "        - grandchild"]
        );
    }

    #[test]
    fn headings_go_after_the_bullet() {
        let pages = vec![page(
            "P",
            vec![
                block("aaaaaaaaa", "Title").with_heading(2),
                block("bbbbbbbbb", "Section")
                    .with_heading(1)
                    .with_children(vec![block("ccccccccc", "Sub").with_heading(3)]),
            ],
        )];

        let lines = render_page(&pages, 0, &mut DiscoverySet::new());

        assert_eq!(lines, vec!["## Title", "- # Section", "    - ### Sub"]);
    }

    #[test]
    fn checkboxes_are_translated() {
        let pages = vec![page(
            "P",
            vec![
                block("aaaaaaaaa", "{{[[TODO]]}} buy milk"),
                block("bbbbbbbbb", "{{[[DONE]]}} buy milk"),
            ],
        )];

        let lines = render_page(&pages, 0, &mut DiscoverySet::new());

        assert_eq!(lines, vec!["[ ] buy milk", "[x] buy milk"]);
    }

    #[test]
    fn multi_line_text_keeps_its_nesting() {
        let pages = vec![page(
            "P",
            vec![block("aaaaaaaaa", "parent")
                .with_children(vec![block("bbbbbbbbb", "line one\nline two")])],
        )];

        let lines = render_page(&pages, 0, &mut DiscoverySet::new());

        assert_eq!(lines[1], "    - line one\n    - line two");
        assert_eq!(lines[1].lines().count(), 2);
    }

    #[test]
    fn trailing_newline_is_preserved_without_prefix() {
        assert_eq!(reflow("- a\nb\n", "- "), "- a\n- b\n");
        assert_eq!(reflow("- a\nb", "- "), "- a\n- b");
        assert_eq!(reflow("- single", "- "), "- single");
    }

    #[test]
    fn anchors_only_for_discovered_blocks() {
        let pages = vec![page(
            "P",
            vec![
                block("aaaaaaaaa", "target"),
                block("bbbbbbbbb", "points at ((aaaaaaaaa))"),
            ],
        )];
        let mut discovered = DiscoverySet::new();

        // Without a discovery pass the target renders before it is known.
        let first = render_page(&pages, 0, &mut discovered);
        assert_eq!(first[0], "target");

        let second = render_page(&pages, 0, &mut discovered);
        assert_eq!(
            second,
            vec!["target ^aaaaaaaaa", "points at target [[P#^aaaaaaaaa]]"]
        );
    }

    #[test]
    fn line_count_matches_block_count() {
        let pages = vec![page(
            "P",
            vec![
                block("aaaaaaaaa", "one\ntwo").with_children(vec![
                    block("bbbbbbbbb", ""),
                    block("ccccccccc", "x").with_children(vec![block("ddddddddd", "y")]),
                ]),
                block("eeeeeeeee", "z"),
            ],
        )];

        let lines = render_page(&pages, 0, &mut DiscoverySet::new());

        assert_eq!(lines.len(), pages[0].block_count());
    }

    #[test]
    fn unresolved_markers_are_reported_with_their_block() {
        let pages = vec![page("P", vec![block("aaaaaaaaa", "see ((123456789))")])];
        let index = BlockIndex::build(&pages);
        let resolver = Resolver::new(&index);

        let rendered = Renderer::new(&resolver)
            .render(&pages[0].children, &mut DiscoverySet::new())
            .unwrap();

        assert_eq!(rendered.lines, vec!["see ((123456789))"]);
        assert_eq!(rendered.unresolved.len(), 1);
        assert_eq!(rendered.unresolved[0].block, "aaaaaaaaa");
        assert!(matches!(
            &rendered.unresolved[0].marker,
            UnresolvedMarker::Reference { uid, .. } if uid == "123456789"
        ));
    }

    #[test]
    fn resolution_errors_name_the_block() {
        let pages = vec![page("P", vec![block("aaaaaaaaa", "again ((aaaaaaaaa))")])];
        let index = BlockIndex::build(&pages);
        let resolver = Resolver::new(&index);

        let err = Renderer::new(&resolver)
            .render(&pages[0].children, &mut DiscoverySet::new())
            .unwrap_err();

        assert_eq!(err.uid, "aaaaaaaaa");
        assert!(matches!(err.source, ResolveError::CyclicReference { .. }));
    }

    #[test]
    fn impossible_day_link_only_affects_its_own_text() {
        let pages = vec![page(
            "P",
            vec![
                block("aaaaaaaaa", "due [[February 30th, 2023]]"),
                block("bbbbbbbbb", "on [[March 1st, 2023]]"),
            ],
        )];
        let index = BlockIndex::build(&pages);
        let resolver = Resolver::new(&index);

        let rendered = Renderer::new(&resolver)
            .render(&pages[0].children, &mut DiscoverySet::new())
            .unwrap();

        assert_eq!(
            rendered.lines,
            vec!["due [[February 30th, 2023]]", "on [[2023-03-01]]"]
        );
        assert_eq!(
            rendered.unresolved,
            vec![BlockDiagnostic {
                block: "aaaaaaaaa".to_string(),
                marker: UnresolvedMarker::MalformedDate {
                    phrase: "February 30th, 2023".to_string()
                },
            }]
        );
    }
}
