//! Content positions and ranges.

use std::fmt;

use serde::Serialize;

/// A position in document order: page-major, y-minor.
///
/// The derived ordering compares `page` first and `y` second, which is
/// exactly document order for top-down pages.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
pub struct Position {
    /// Page number (1-based)
    pub page: u32,
    /// Vertical coordinate on the page (grows downward)
    pub y: f32,
}

impl Position {
    /// Sentinel marking "through end of document".
    pub const DOCUMENT_END: Position = Position {
        page: u32::MAX,
        y: f32::INFINITY,
    };

    /// Create a position.
    pub fn new(page: u32, y: f32) -> Self {
        Self { page, y }
    }

    /// Whether this is the end-of-document sentinel.
    pub fn is_document_end(&self) -> bool {
        self.page == u32::MAX
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_document_end() {
            write!(f, "end of document")
        } else {
            write!(f, "p{}@{:.1}", self.page, self.y)
        }
    }
}

/// The closed span of content belonging to one matched section.
///
/// `start` is the position just below the section's heading; `end` is the
/// top of the next section's heading, or [`Position::DOCUMENT_END`] for the
/// last section. Invariant: `start <= end` in document order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ContentRange {
    /// Where the section's content begins
    pub start: Position,
    /// Where the section's content ends
    pub end: Position,
}

impl ContentRange {
    /// Create a range.
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Create an open-ended range running to the end of the document.
    pub fn to_document_end(start: Position) -> Self {
        Self {
            start,
            end: Position::DOCUMENT_END,
        }
    }

    /// Whether the range runs to the end of the document.
    pub fn is_open_ended(&self) -> bool {
        self.end.is_document_end()
    }
}

impl fmt::Display for ContentRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} .. {}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_document_order() {
        let a = Position::new(3, 500.0);
        let b = Position::new(4, 10.0);
        let c = Position::new(4, 200.0);

        assert!(a < b);
        assert!(b < c);
        assert!(a < Position::DOCUMENT_END);
    }

    #[test]
    fn test_open_ended_range() {
        let range = ContentRange::to_document_end(Position::new(7, 120.0));
        assert!(range.is_open_ended());
        assert!(range.start <= range.end);
        assert_eq!(range.to_string(), "p7@120.0 .. end of document");
    }

    #[test]
    fn test_range_ordering_invariant() {
        let range = ContentRange::new(Position::new(2, 300.0), Position::new(5, 80.0));
        assert!(range.start <= range.end);
        assert!(!range.is_open_ended());
    }
}
