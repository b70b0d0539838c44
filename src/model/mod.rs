//! Data model: producer input pages, the outline tree, and content ranges.

mod outline;
mod page;
mod range;

pub use outline::{NodeId, OutlineNode, OutlineTree};
pub use page::{DocumentText, FontSize, LineRun, PageText, Rect, TextBlock};
pub use range::{ContentRange, Position};
