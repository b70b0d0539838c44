//! Outline inference: size statistics, candidate scanning, tree building.

mod bands;
mod builder;
mod options;
mod select;

pub use bands::PageBands;
pub use builder::OutlineTreeBuilder;
pub use options::OutlineOptions;
pub use select::{scan_page, select_heading_sizes, HeadingCandidate, SizeStats};
