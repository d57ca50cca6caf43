use super::{kinds::DayPhrase, span::Span};

/// The kind of a reference marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerKind {
    BlockEmbed,
    BlockMention,
    BlockReference,
    DayLink,
}

impl MarkerKind {
    /// Block marker kinds in resolution priority order.
    pub const BLOCK_TIERS: [MarkerKind; 3] = [
        MarkerKind::BlockEmbed,
        MarkerKind::BlockMention,
        MarkerKind::BlockReference,
    ];

    pub fn is_block(self) -> bool {
        !matches!(self, MarkerKind::DayLink)
    }
}

/// What a marker points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Payload {
    /// Span of the referenced uid inside the scanned text.
    Uid(Span),
    /// The day phrase between the brackets, with its span.
    Day { phrase: DayPhrase, span: Span },
}

/// A marker found in block text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Marker {
    pub kind: MarkerKind,
    /// Full span including delimiters.
    pub full: Span,
    pub payload: Payload,
}

impl Marker {
    /// The referenced uid for block markers.
    pub fn uid<'s>(&self, s: &'s str) -> Option<&'s str> {
        match self.payload {
            Payload::Uid(span) => Some(span.slice(s)),
            Payload::Day { .. } => None,
        }
    }
}
