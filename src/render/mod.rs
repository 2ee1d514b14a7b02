//! Build-time page generation.

pub mod page;

pub use page::{PageRenderer, RenderContext};
