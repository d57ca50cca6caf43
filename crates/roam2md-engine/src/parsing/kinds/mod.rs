//! # Marker Kinds
//!
//! Marker types that own their syntax delimiters.
//!
//! ## Types
//!
//! - **`BlockEmbed`**: `{{embed: ((uid))}}`
//! - **`BlockMention`**: `{{mentions: ((uid))}}`
//! - **`BlockRef`**: `((uid))`
//! - **`DayLink`**: `[[January 5th, 2023]]`, with [`DayPhrase`] for the date itself
//! - **`Checkbox`**: leading `{{[[TODO]]}}` / `{{[[DONE]]}}`
//!
//! All delimiter constants live here, not scattered in parser code.

pub mod block_ref;
pub mod checkbox;
pub mod day_link;

pub use block_ref::{BlockEmbed, BlockMention, BlockRef, UID_CHARS};
pub use checkbox::{Checkbox, CheckboxState};
pub use day_link::{DayLink, DayPhrase};
