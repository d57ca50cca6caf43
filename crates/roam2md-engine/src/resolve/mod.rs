//! # Inline Marker Resolution
//!
//! Substitutes block embeds, mentions and references with the text of the
//! block they point at plus a back-link, then rewrites day links to ISO dates.
//!
//! Resolution depends only on the text and the [`BlockIndex`], so resolving
//! the same text twice yields the same output. The only side effect is
//! recording every substituted uid in the [`DiscoverySet`].

use crate::index::{BlockIndex, DiscoverySet};
use crate::parsing::{MarkerKind, Payload, find_block_marker, parse_markers};

/// Default bound on how deeply references may nest inside one another.
pub const DEFAULT_MAX_DEPTH: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("cyclic reference: {}", chain.join(" -> "))]
    CyclicReference { chain: Vec<String> },
    #[error("reference to {uid} is nested more than {limit} levels deep")]
    TooDeep { uid: String, limit: usize },
}

/// A marker left in the text as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnresolvedMarker {
    /// A block marker whose uid is not in the index.
    Reference { uid: String, kind: MarkerKind },
    /// A day link naming a date that does not exist.
    MalformedDate { phrase: String },
}

/// Resolved text plus the markers that could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub text: String,
    pub unresolved: Vec<UnresolvedMarker>,
}

pub struct Resolver<'i, 'a> {
    index: &'i BlockIndex<'a>,
    max_depth: usize,
}

impl<'i, 'a> Resolver<'i, 'a> {
    pub fn new(index: &'i BlockIndex<'a>) -> Self {
        Self {
            index,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Resolves every marker in `text`.
    pub fn resolve(
        &self,
        text: &str,
        discovered: &mut DiscoverySet,
    ) -> Result<Resolution, ResolveError> {
        let mut chain = Vec::new();
        let resolved = self.expand(text, &mut chain, discovered)?;
        let mut unresolved = self.unresolved(&resolved);
        let (text, malformed) = replace_day_links(&resolved);
        unresolved.extend(
            malformed
                .into_iter()
                .map(|phrase| UnresolvedMarker::MalformedDate { phrase }),
        );
        Ok(Resolution { text, unresolved })
    }

    /// Substitutes block markers until none with a known uid remains.
    ///
    /// A target's text is expanded before it is spliced in, so `chain` holds
    /// the uids currently being expanded. Meeting one of them again is a cycle.
    fn expand(
        &self,
        text: &str,
        chain: &mut Vec<String>,
        discovered: &mut DiscoverySet,
    ) -> Result<String, ResolveError> {
        let mut s = text.to_string();

        while let Some(marker) = find_block_marker(&s, |uid| self.index.contains(uid)) {
            let Some(target) = marker.uid(&s).and_then(|uid| self.index.get(uid)) else {
                break;
            };
            let uid = &target.block.uid;
            if chain.contains(uid) {
                let mut cycle = chain.clone();
                cycle.push(uid.clone());
                return Err(ResolveError::CyclicReference { chain: cycle });
            }
            if chain.len() == self.max_depth {
                return Err(ResolveError::TooDeep {
                    uid: uid.clone(),
                    limit: self.max_depth,
                });
            }

            chain.push(uid.clone());
            let inner = self.expand(&target.block.text, chain, discovered)?;
            chain.pop();

            discovered.insert(uid);
            let replacement = format!("{inner} [[{}#^{uid}]]", target.page.title);
            s.replace_range(marker.full.start..marker.full.end, &replacement);
        }

        Ok(s)
    }

    /// Block markers left in `text` whose uid the index does not know.
    pub fn unresolved(&self, text: &str) -> Vec<UnresolvedMarker> {
        parse_markers(text)
            .into_iter()
            .filter(|marker| marker.kind.is_block())
            .filter_map(|marker| {
                let uid = marker.uid(text)?;
                (!self.index.contains(uid)).then(|| UnresolvedMarker::Reference {
                    uid: uid.to_string(),
                    kind: marker.kind,
                })
            })
            .collect()
    }
}

/// Rewrites every `[[Month Dth, YYYY]]` as `[[YYYY-MM-DD]]`.
///
/// A phrase naming an impossible date stays as written and is returned
/// alongside the text.
pub fn replace_day_links(text: &str) -> (String, Vec<String>) {
    let mut out = String::with_capacity(text.len());
    let mut malformed = vec![];
    let mut copied = 0;

    for marker in parse_markers(text) {
        let Payload::Day { phrase, span } = marker.payload else {
            continue;
        };
        let Some(date) = phrase.to_date() else {
            malformed.push(span.slice(text).to_string());
            continue;
        };
        out.push_str(&text[copied..span.start]);
        out.push_str(&date.format("%Y-%m-%d").to_string());
        copied = span.end;
    }

    out.push_str(&text[copied..]);
    (out, malformed)
}
