//! # Corpus Conversion
//!
//! Drives the three passes over the whole corpus:
//!
//! 1. **Index**: every block of every page goes into the [`BlockIndex`].
//! 2. **Discover**: every page is rendered once and the output thrown away;
//!    only the uids recorded in the [`DiscoverySet`] are kept.
//! 3. **Render**: every titled, accepted page is rendered again, now that the
//!    set knows which blocks are referenced anywhere, and the output is kept.
//!
//! Untitled and rejected pages take part in the first two passes only.
//!
//! The phases are separate types, and the discovery set moves from
//! [`IndexedCorpus::discover`] into [`DiscoveredCorpus`], so nothing can be
//! rendered for output before discovery has seen the whole corpus.

use chrono::NaiveDate;

use crate::index::{BlockIndex, DiscoverySet};
use crate::models::{Page, PageKind};
use crate::render::{RenderError, Renderer};
use crate::resolve::{DEFAULT_MAX_DEPTH, Resolver, UnresolvedMarker};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Bound on how deeply references may nest.
    pub max_depth: usize,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Final content for one page, ready for the writer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    pub title: String,
    pub created: NaiveDate,
    pub kind: PageKind,
    pub lines: Vec<String>,
}

/// A page that could not be rendered. Other pages are unaffected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("page {title:?}: {error}")]
pub struct PageError {
    pub title: String,
    #[source]
    pub error: RenderError,
}

/// An unresolved marker, located by page and block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageDiagnostic {
    pub page: String,
    pub block: String,
    pub marker: UnresolvedMarker,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Conversion {
    /// Rendered pages in input order; untitled and rejected pages are omitted.
    pub pages: Vec<RenderedPage>,
    pub failures: Vec<PageError>,
    /// One entry per unresolved marker occurrence in the final output.
    pub unresolved: Vec<PageDiagnostic>,
    /// Number of distinct blocks that received an anchor.
    pub anchored: usize,
    /// Uids carried by more than one block; the last one indexed wins.
    pub duplicates: Vec<String>,
}

/// Convert a whole corpus.
pub fn convert(pages: &[Page], options: ConvertOptions) -> Conversion {
    IndexedCorpus::new(pages, options).discover().render()
}

/// Pass 1 done: the corpus is indexed.
pub struct IndexedCorpus<'a> {
    pages: &'a [Page],
    index: BlockIndex<'a>,
    options: ConvertOptions,
}

impl<'a> IndexedCorpus<'a> {
    pub fn new(pages: &'a [Page], options: ConvertOptions) -> Self {
        log::info!("Pass 1: scan all pages");
        let index = BlockIndex::build(pages);
        log::info!("indexed {} blocks on {} pages", index.len(), pages.len());
        Self {
            pages,
            index,
            options,
        }
    }

    pub fn index(&self) -> &BlockIndex<'a> {
        &self.index
    }

    /// Pass 2: render every page, keeping only the discovered uids.
    ///
    /// Pages with an empty title take part too; their references still
    /// anchor blocks elsewhere.
    pub fn discover(self) -> DiscoveredCorpus<'a> {
        log::info!("Pass 2: track block references");
        let mut discovered = DiscoverySet::new();
        let resolver = Resolver::new(&self.index).with_max_depth(self.options.max_depth);
        let renderer = Renderer::new(&resolver);

        for page in self.pages {
            if let Err(e) = renderer.render(&page.children, &mut discovered) {
                // Reported once, when the page is rendered for output.
                log::debug!("discovery stopped early on page {:?}: {e}", page.title);
            }
        }
        log::info!("{} blocks are referenced", discovered.len());

        DiscoveredCorpus {
            pages: self.pages,
            index: self.index,
            discovered,
            options: self.options,
        }
    }
}

/// Pass 2 done: the discovery set covers the whole corpus.
pub struct DiscoveredCorpus<'a> {
    pages: &'a [Page],
    index: BlockIndex<'a>,
    discovered: DiscoverySet,
    options: ConvertOptions,
}

impl<'a> DiscoveredCorpus<'a> {
    pub fn discovered(&self) -> &DiscoverySet {
        &self.discovered
    }

    /// Pass 3: render every titled page for output.
    pub fn render(mut self) -> Conversion {
        log::info!("Pass 3: generate");
        let resolver = Resolver::new(&self.index).with_max_depth(self.options.max_depth);
        let renderer = Renderer::new(&resolver);
        let anchored = self.discovered.len();
        let mut conversion = Conversion {
            anchored,
            duplicates: self
                .index
                .duplicates()
                .iter()
                .map(|uid| uid.to_string())
                .collect(),
            ..Conversion::default()
        };

        for page in self.pages {
            if page.title.is_empty() {
                log::debug!("skipping untitled page with {} blocks", page.block_count());
                continue;
            }
            let Some(created) = page.created() else {
                log::debug!("not rendering rejected page {:?}", page.title);
                continue;
            };

            match renderer.render(&page.children, &mut self.discovered) {
                Ok(rendered) => {
                    for diagnostic in rendered.unresolved {
                        match &diagnostic.marker {
                            UnresolvedMarker::Reference { uid, .. } => log::warn!(
                                "uid not found: {uid} (page {:?}, block {})",
                                page.title,
                                diagnostic.block
                            ),
                            UnresolvedMarker::MalformedDate { phrase } => log::warn!(
                                "malformed date [[{phrase}]] (page {:?}, block {})",
                                page.title,
                                diagnostic.block
                            ),
                        }
                        conversion.unresolved.push(PageDiagnostic {
                            page: page.title.clone(),
                            block: diagnostic.block,
                            marker: diagnostic.marker,
                        });
                    }
                    log::debug!("rendered {:?} ({} lines)", page.title, rendered.lines.len());
                    conversion.pages.push(RenderedPage {
                        title: page.title.clone(),
                        created,
                        kind: page.kind,
                        lines: rendered.lines,
                    });
                }
                Err(error) => {
                    log::error!("failed to render page {:?}: {error}", page.title);
                    conversion.failures.push(PageError {
                        title: page.title.clone(),
                        error,
                    });
                }
            }
        }

        debug_assert_eq!(
            anchored,
            self.discovered.len(),
            "rendering found references that discovery missed"
        );
        conversion
    }
}
