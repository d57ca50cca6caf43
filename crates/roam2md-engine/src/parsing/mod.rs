//! # Marker Parsing
//!
//! Cursor-based scanning for the reference markers found in block text.
//!
//! ## Modules
//!
//! - **`types`**: `Marker`, `MarkerKind` (BlockEmbed, BlockMention, BlockReference, DayLink)
//! - **`kinds`**: marker types with owned delimiters, plus the leading checkbox marker
//! - **`cursor`**: `Cursor` for byte-wise scanning with char-aware uid payloads
//! - **`parser`**: `find_block_marker()` for tiered substitution, `parse_markers()` for a full scan
//!
//! ## Tier Precedence
//!
//! Block embeds win over mentions, which win over plain references, so
//! `{{embed: ((uid))}}` is never substituted as the `((uid))` inside it.

pub mod cursor;
pub mod kinds;
pub mod parser;
pub mod span;
pub mod types;

pub use parser::{find_block_marker, parse_markers};
pub use span::Span;
pub use types::{Marker, MarkerKind, Payload};
