//! Tuning knobs for outline inference.

/// Options controlling heading-size selection, candidate scanning, and tree
/// depth.
///
/// The defaults are calibrated for CJK annual-report typography; documents
/// with denser body text or deeper numbering may need adjustment.
#[derive(Debug, Clone)]
pub struct OutlineOptions {
    /// Maximum nesting level a heading may occupy (root is level 0).
    pub max_depth: u8,

    /// Smallest font size still considered a heading; the descending size
    /// scan stops at the first size below this.
    pub min_heading_size: f32,

    /// Minimum document-wide text volume a size needs to qualify; rarer
    /// sizes are treated as noise.
    pub min_size_volume: usize,

    /// A size occupying more than this fraction of a page's text volume
    /// behaves as body text on that page.
    pub body_ratio: f32,

    /// A size behaving as body text on more than this fraction of pages is
    /// rejected, along with every smaller size.
    pub body_page_ratio: f32,

    /// Pages with total text volume at or below this are too sparse for the
    /// body-text check.
    pub min_page_volume: usize,

    /// Maximum heading length in characters; longer blocks are paragraphs.
    pub max_title_len: usize,

    /// Maximum horizontal gap between consecutive runs of one heading.
    pub max_run_gap: f32,

    /// Tolerance when testing whether a block is horizontally centered.
    pub center_tolerance: f32,

    /// Skip the first page (cover pages carry decorative type that defeats
    /// the size heuristics).
    pub skip_cover: bool,

    /// Strings marking a page's first block as a running header; blocks in
    /// the header band are never heading candidates.
    pub header_features: Vec<String>,
}

impl OutlineOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum nesting level.
    pub fn with_max_depth(mut self, depth: u8) -> Self {
        self.max_depth = depth;
        self
    }

    /// Set the minimum heading font size.
    pub fn with_min_heading_size(mut self, size: f32) -> Self {
        self.min_heading_size = size;
        self
    }

    /// Set the minimum document-wide volume per heading size.
    pub fn with_min_size_volume(mut self, volume: usize) -> Self {
        self.min_size_volume = volume;
        self
    }

    /// Set the per-page body-text volume ratio.
    pub fn with_body_ratio(mut self, ratio: f32) -> Self {
        self.body_ratio = ratio;
        self
    }

    /// Set the body-page fraction above which a size is rejected.
    pub fn with_body_page_ratio(mut self, ratio: f32) -> Self {
        self.body_page_ratio = ratio;
        self
    }

    /// Set the maximum heading length in characters.
    pub fn with_max_title_len(mut self, len: usize) -> Self {
        self.max_title_len = len;
        self
    }

    /// Enable or disable skipping the first page.
    pub fn with_skip_cover(mut self, skip: bool) -> Self {
        self.skip_cover = skip;
        self
    }

    /// Add a header feature string.
    pub fn with_header_feature(mut self, feature: impl Into<String>) -> Self {
        self.header_features.push(feature.into());
        self
    }
}

impl Default for OutlineOptions {
    fn default() -> Self {
        Self {
            max_depth: 3,
            min_heading_size: 10.0,
            min_size_volume: 30,
            body_ratio: 0.3,
            body_page_ratio: 0.1,
            min_page_volume: 50,
            max_title_len: 50,
            max_run_gap: 5.0,
            center_tolerance: 5.0,
            skip_cover: true,
            header_features: Vec::new(),
        }
    }
}
