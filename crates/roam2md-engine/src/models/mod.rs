pub mod block;
pub mod page;

pub use block::Block;
pub use page::{Page, PageKind, PageStatus, RejectReason};
