//! In-page behavior: rendering records into a document and filtering them.
//!
//! [`Dom`] is the seam to a live document; [`MemoryDom`] backs it in
//! process for the CLI and tests.

pub mod dom;
pub mod filter;
pub mod page;
pub mod renderer;

pub use dom::{Dom, MemoryDom, NodeId};
pub use filter::{FilterOutcome, SearchFilter, filter_records, matches};
pub use page::{Page, PageOptions};
pub use renderer::{DomRenderer, SEARCH_ATTR};
