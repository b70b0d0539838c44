//! Input model for per-page text produced by the page-block producer.
//!
//! The producer (external to this crate) walks the source document and emits,
//! for every page, its ordered text blocks together with per-font-size
//! aggregate text lengths. This module mirrors that JSON shape.

use std::collections::HashMap;
use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

/// A font size in fixed-point hundredths of a point.
///
/// The producer rounds sizes to two decimals and uses them as map keys, so
/// the model needs a hashable, ordered representation. Serializes as the
/// stringified point value ("12.0", "10.56") to match producer JSON keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FontSize(i32);

impl FontSize {
    /// Convert from a point value, rounding to hundredths.
    pub fn from_points(points: f32) -> Self {
        Self((points * 100.0).round() as i32)
    }

    /// The size in points.
    pub fn points(self) -> f32 {
        self.0 as f32 / 100.0
    }
}

impl fmt::Display for FontSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 % 10 == 0 {
            write!(f, "{:.1}", self.points())
        } else {
            write!(f, "{:.2}", self.points())
        }
    }
}

impl Serialize for FontSize {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for FontSize {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct FontSizeVisitor;

        impl Visitor<'_> for FontSizeVisitor {
            type Value = FontSize;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a font size string like \"12.0\"")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<FontSize, E> {
                value
                    .parse::<f32>()
                    .map(FontSize::from_points)
                    .map_err(|_| E::custom(format!("invalid font size: {value}")))
            }
        }

        deserializer.deserialize_str(FontSizeVisitor)
    }
}

/// A bounding box in page coordinates (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f32; 4]", into = "[f32; 4]")]
pub struct Rect {
    /// Left edge
    pub x0: f32,
    /// Top edge
    pub top: f32,
    /// Right edge
    pub x1: f32,
    /// Bottom edge
    pub bottom: f32,
}

impl Rect {
    /// Create a new rectangle.
    pub fn new(x0: f32, top: f32, x1: f32, bottom: f32) -> Self {
        Self { x0, top, x1, bottom }
    }
}

impl From<[f32; 4]> for Rect {
    fn from(v: [f32; 4]) -> Self {
        Rect::new(v[0], v[1], v[2], v[3])
    }
}

impl From<Rect> for [f32; 4] {
    fn from(r: Rect) -> Self {
        [r.x0, r.top, r.x1, r.bottom]
    }
}

/// One text run within a block: a horizontal stretch of same-size text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineRun {
    /// Left x coordinate
    pub x0: f32,
    /// Right x coordinate
    pub x1: f32,
    /// Rounded font size in points
    pub size: f32,
    /// Run text, already stripped by the producer
    pub text: String,
}

impl LineRun {
    /// Create a new line run.
    pub fn new(x0: f32, x1: f32, size: f32, text: impl Into<String>) -> Self {
        Self {
            x0,
            x1,
            size,
            text: text.into(),
        }
    }
}

/// A text block: a bounding box with its ordered line runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextBlock {
    /// Block bounding box
    pub bbox: Rect,
    /// Ordered line runs inside the block
    pub lines: Vec<LineRun>,
}

impl TextBlock {
    /// Create a new block.
    pub fn new(bbox: Rect, lines: Vec<LineRun>) -> Self {
        Self { bbox, lines }
    }

    /// Concatenated text of all runs, without separators.
    pub fn joined_text(&self) -> String {
        self.lines.iter().map(|l| l.text.as_str()).collect()
    }
}

/// One page of producer output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageText {
    /// Page number (1-based)
    #[serde(rename = "page_number")]
    pub number: u32,

    /// Page width in points
    pub width: f32,

    /// Ordered text blocks
    pub blocks: Vec<TextBlock>,

    /// Aggregate matched-text length per font size on this page
    #[serde(rename = "sizes_count")]
    pub size_totals: HashMap<FontSize, usize>,

    /// Total matched-text length on this page
    pub total_length: usize,
}

impl PageText {
    /// Create a page, computing `size_totals` and `total_length` from blocks.
    pub fn new(number: u32, width: f32, blocks: Vec<TextBlock>) -> Self {
        let mut size_totals: HashMap<FontSize, usize> = HashMap::new();
        for block in &blocks {
            for line in &block.lines {
                let len = line.text.chars().count();
                *size_totals.entry(FontSize::from_points(line.size)).or_insert(0) += len;
            }
        }
        let total_length = size_totals.values().sum();
        Self {
            number,
            width,
            blocks,
            size_totals,
            total_length,
        }
    }

    /// Fraction of this page's text volume set in `size`.
    ///
    /// Returns 0.0 for an empty page.
    pub fn size_share(&self, size: FontSize) -> f32 {
        if self.total_length == 0 {
            return 0.0;
        }
        let count = self.size_totals.get(&size).copied().unwrap_or(0);
        count as f32 / self.total_length as f32
    }
}

/// A whole document: a label plus its pages, as fed to batch processing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentText {
    /// Display label, used as the synthetic outline root's text
    pub label: String,
    /// Pages in document order
    pub pages: Vec<PageText>,
}

impl DocumentText {
    /// Create a document from pages.
    pub fn new(label: impl Into<String>, pages: Vec<PageText>) -> Self {
        Self {
            label: label.into(),
            pages,
        }
    }
}
