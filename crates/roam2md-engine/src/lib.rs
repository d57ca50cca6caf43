pub mod convert;
pub mod export;
pub mod index;
pub mod io;
pub mod models;
pub mod parsing;
pub mod render;
pub mod resolve;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use convert::{Conversion, ConvertOptions, PageDiagnostic, PageError, RenderedPage, convert};
pub use export::{Export, ExportError, load_export, parse_export};
pub use index::{BlockIndex, DiscoverySet};
pub use io::{OutputLayout, WriteFailure, WriteReport, write_pages};
pub use models::{Block, Page, PageKind, PageStatus, RejectReason};
pub use resolve::{ResolveError, Resolver, UnresolvedMarker};
