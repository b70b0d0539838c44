//! Heading-size selection and per-page candidate scanning.
//!
//! A one-time pass over the whole document decides which font sizes can be
//! headings at all ([`select_heading_sizes`]); a second per-page pass
//! re-uses those sizes to emit ordered [`HeadingCandidate`]s for the tree
//! builder. The level assigned to each size is only a hint: the builder's
//! own size/signature comparison decides actual placement.

use std::collections::{BTreeMap, HashMap};

use log::{debug, info};

use super::bands::PageBands;
use super::options::OutlineOptions;
use crate::error::{Error, Result};
use crate::model::{FontSize, PageText};
use crate::signature::{self, TitleSignature};

/// One text block selected as a possible heading, prior to tree placement.
#[derive(Debug, Clone)]
pub struct HeadingCandidate {
    /// Font size of the block's runs, in points
    pub size: f32,
    /// Concatenated heading text
    pub text: String,
    /// Style signature of the text's prefix
    pub signature: TitleSignature,
    /// Whether the block is horizontally centered on the page
    pub centered: bool,
    /// Page the block appears on (1-based)
    pub page: u32,
    /// Top y of the block
    pub top: f32,
    /// Bottom y of the block
    pub bottom: f32,
}

/// Aggregate font-size statistics over a whole document.
#[derive(Debug, Clone, Default)]
pub struct SizeStats {
    /// Document-wide text volume per size
    totals: HashMap<FontSize, usize>,
    /// Number of pages on which a size behaved as body text
    body_pages: HashMap<FontSize, usize>,
    /// Pages observed
    pages: usize,
}

impl SizeStats {
    /// Create empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulate statistics over a slice of pages.
    pub fn from_pages(pages: &[PageText], options: &OutlineOptions) -> Self {
        let mut stats = Self::new();
        for page in pages {
            stats.add_page(page, options);
        }
        stats
    }

    /// Add one page's observations.
    pub fn add_page(&mut self, page: &PageText, options: &OutlineOptions) {
        self.pages += 1;
        for (&size, &count) in &page.size_totals {
            *self.totals.entry(size).or_insert(0) += count;
        }

        // Sparse pages say nothing about what body text looks like.
        if page.total_length <= options.min_page_volume {
            return;
        }
        for (&size, &count) in &page.size_totals {
            if count as f32 / page.total_length as f32 >= options.body_ratio {
                *self.body_pages.entry(size).or_insert(0) += 1;
            }
        }
    }

    /// Number of pages observed.
    pub fn page_count(&self) -> usize {
        self.pages
    }

    /// Document-wide text volume of a size.
    pub fn total(&self, size: FontSize) -> usize {
        self.totals.get(&size).copied().unwrap_or(0)
    }

    /// Number of pages on which a size behaved as body text.
    pub fn body_page_count(&self, size: FontSize) -> usize {
        self.body_pages.get(&size).copied().unwrap_or(0)
    }
}

/// Decide which font sizes are plausible heading sizes.
///
/// Sizes are scanned largest first. A size below the minimum heading size
/// stops the scan (everything smaller is body text); a size with too little
/// document-wide volume is skipped as noise; a size behaving as body text on
/// too many pages stops the scan. Accepted sizes get provisional levels
/// 0, 1, 2, … up to the configured maximum depth.
///
/// Returns [`Error::NoHeadingSize`] when nothing qualifies.
pub fn select_heading_sizes(
    stats: &SizeStats,
    options: &OutlineOptions,
) -> Result<BTreeMap<FontSize, u8>> {
    let mut sizes: Vec<(FontSize, usize)> =
        stats.totals.iter().map(|(&s, &c)| (s, c)).collect();
    sizes.sort_by(|a, b| b.0.cmp(&a.0));

    let body_page_limit = stats.page_count() as f32 * options.body_page_ratio;

    let mut selected = BTreeMap::new();
    let mut level: u8 = 0;
    for (size, count) in sizes {
        if size.points() < options.min_heading_size {
            break;
        }
        if count < options.min_size_volume {
            debug!("size {size} rejected: volume {count} too small");
            continue;
        }
        if stats.body_page_count(size) as f32 > body_page_limit {
            // This size is body text; smaller sizes cannot be headings.
            break;
        }

        selected.insert(size, level);
        level += 1;
        if level > options.max_depth {
            break;
        }
    }

    if selected.is_empty() {
        return Err(Error::NoHeadingSize);
    }
    info!("selected heading sizes: {selected:?}");
    Ok(selected)
}

/// Scan one page for heading candidates, in block order.
///
/// Only blocks whose first run uses a selected heading size are considered,
/// and the size must not behave as body text on this particular page.
pub fn scan_page(
    page: &PageText,
    sizes: &BTreeMap<FontSize, u8>,
    options: &OutlineOptions,
) -> Vec<HeadingCandidate> {
    let bands = PageBands::detect(page, &options.header_features);
    let mut candidates = Vec::new();

    for block in &page.blocks {
        if bands.excludes(block) {
            continue;
        }
        let Some(first) = block.lines.first() else {
            continue;
        };
        let size = FontSize::from_points(first.size);
        if !sizes.contains_key(&size) {
            continue;
        }
        if page.size_share(size) > options.body_ratio {
            continue;
        }

        // A heading split across runs is still one horizontal stretch;
        // a large gap means unrelated fragments sharing a size.
        let contiguous = block
            .lines
            .windows(2)
            .all(|pair| pair[1].x0 - pair[0].x1 <= options.max_run_gap);
        if !contiguous {
            continue;
        }

        let text = join_heading_text(block.lines.iter().map(|l| l.text.as_str()));
        if text.chars().all(|c| c.is_ascii_digit()) {
            continue; // bare page number
        }
        if text.chars().count() > options.max_title_len {
            continue;
        }

        let sig = match signature::classify(&text) {
            Ok(sig) => sig,
            Err(_) => {
                debug!("page {}: unclassifiable block skipped", page.number);
                continue;
            }
        };
        let centered = is_centered(page.width, block.bbox.x0, block.bbox.x1, options);
        if sig.is_empty() && !centered {
            continue; // body text styled like body text
        }

        candidates.push(HeadingCandidate {
            size: first.size,
            text,
            signature: sig,
            centered,
            page: page.number,
            top: block.bbox.top,
            bottom: block.bbox.bottom,
        });
    }

    candidates
}

/// Join run texts into one heading. A space is inserted only after a
/// chapter-root marker ("第X节 标题"); everything else concatenates directly.
fn join_heading_text<'a>(mut parts: impl Iterator<Item = &'a str>) -> String {
    let mut text = match parts.next() {
        Some(first) => first.to_string(),
        None => return String::new(),
    };
    let mut rest = parts.peekable();
    if rest.peek().is_some() && signature::is_root_title(&text) {
        text.push(' ');
    }
    for part in rest {
        text.push_str(part);
    }
    text
}

/// Whether a block is horizontally centered on a page of the given width.
fn is_centered(width: f32, x0: f32, x1: f32, options: &OutlineOptions) -> bool {
    let margin = (width - (x1 - x0)) / 2.0;
    (x0 - margin).abs() < options.center_tolerance
        && (x1 - (width - margin)).abs() < options.center_tolerance
}
