//! Header and footer band detection.
//!
//! Running headers repeat the report name at the top of every page and page
//! numbers sit at the bottom; both would otherwise be picked up as heading
//! candidates. A band is detected per page from its first and last blocks.

use crate::model::{PageText, TextBlock};

/// The vertical bands on one page occupied by the running header and footer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageBands {
    /// Bottom y of the header band (0.0 when no header was found).
    pub header_bottom: f32,
    /// Top y of the footer band (infinite when no footer was found).
    pub footer_top: f32,
}

impl PageBands {
    /// Detect bands on a page.
    ///
    /// The first block is a header if its text contains any of
    /// `header_features`; the last block is a footer if its text contains
    /// the page number.
    pub fn detect(page: &PageText, header_features: &[String]) -> Self {
        let mut header_bottom = 0.0;
        let mut footer_top = f32::INFINITY;

        if let Some(first) = page.blocks.first() {
            let text = first.joined_text();
            if header_features.iter().any(|f| text.contains(f.as_str())) {
                header_bottom = first.bbox.bottom;
            }
        }

        if let Some(last) = page.blocks.last() {
            let page_no = page.number.to_string();
            if last.joined_text().contains(&page_no) {
                footer_top = last.bbox.top;
            }
        }

        Self {
            header_bottom,
            footer_top,
        }
    }

    /// Whether a block lies inside the header or footer band.
    pub fn excludes(&self, block: &TextBlock) -> bool {
        block.bbox.bottom <= self.header_bottom || block.bbox.top >= self.footer_top
    }
}
