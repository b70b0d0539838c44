//! # docspan
//!
//! Heuristic section-outline inference for born-digital documents.
//!
//! Given per-page text extraction output (blocks, runs, font sizes), this
//! library reconstructs a document's section hierarchy from typography alone
//! and resolves named target sections to page/position ranges. It is built
//! for documents without embedded bookmarks, such as CJK annual reports.
//!
//! ## Quick Start
//!
//! ```no_run
//! use docspan::{build_outline_with_title, load_pages, OutlineOptions};
//!
//! fn main() -> docspan::Result<()> {
//!     // Load producer output (a JSON array of pages)
//!     let pages = load_pages("report.pages.json")?;
//!
//!     // Infer the outline
//!     let options = OutlineOptions::default();
//!     let tree = build_outline_with_title("2024年年度报告", &pages, &options)?;
//!     println!("{}", tree.dump());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Signature classification**: headings fingerprinted by numbering style
//! - **Size-driven selection**: heading sizes chosen from document statistics
//! - **Single-pass tree building**: strict document order, one cursor
//! - **Target resolution**: named sections mapped to content ranges
//! - **Parallel batch processing**: uses Rayon across documents

pub mod analyze;
pub mod error;
pub mod model;
pub mod signature;
pub mod target;

// Re-export commonly used types
pub use analyze::{
    scan_page, select_heading_sizes, HeadingCandidate, OutlineOptions, OutlineTreeBuilder,
    PageBands, SizeStats,
};
pub use error::{Error, Result};
pub use model::{
    ContentRange, DocumentText, FontSize, LineRun, NodeId, OutlineNode, OutlineTree, PageText,
    Position, Rect, TextBlock,
};
pub use target::{resolve, MatchOutcome, TargetMatch, TargetNode, TargetSchema};

use std::path::Path;

use rayon::prelude::*;

/// Load producer pages from a JSON file (an array of page objects).
///
/// # Example
///
/// ```no_run
/// use docspan::load_pages;
///
/// let pages = load_pages("report.pages.json").unwrap();
/// println!("Pages: {}", pages.len());
/// ```
pub fn load_pages<P: AsRef<Path>>(path: P) -> Result<Vec<PageText>> {
    let json = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}

/// Infer a document's outline.
///
/// The document's label becomes the synthetic root's text.
pub fn build_outline(document: &DocumentText, options: &OutlineOptions) -> Result<OutlineTree> {
    build_outline_with_title(&document.label, &document.pages, options)
}

/// Infer an outline from pages, labelling the root with `title`.
///
/// Heading sizes are selected from statistics over every page; candidate
/// scanning then skips the cover page if [`OutlineOptions::skip_cover`] is
/// set. Returns [`Error::EmptyDocument`] for an empty page list and
/// [`Error::NoHeadingSize`] when no font size qualifies as a heading size.
pub fn build_outline_with_title(
    title: &str,
    pages: &[PageText],
    options: &OutlineOptions,
) -> Result<OutlineTree> {
    if pages.is_empty() {
        return Err(Error::EmptyDocument);
    }

    let stats = SizeStats::from_pages(pages, options);
    let sizes = select_heading_sizes(&stats, options)?;

    let body = if options.skip_cover && pages.len() > 1 {
        &pages[1..]
    } else {
        pages
    };

    let mut builder = OutlineTreeBuilder::with_options(title, options);
    for page in body {
        for candidate in scan_page(page, &sizes, options) {
            builder.add(candidate);
        }
    }
    Ok(builder.finish())
}

/// Resolve a target schema against an inferred outline.
///
/// Equivalent to [`target::resolve`]; one result per schema leaf, in
/// declaration order.
pub fn resolve_targets(schema: &TargetSchema, tree: &OutlineTree) -> Vec<TargetMatch> {
    target::resolve(schema, tree)
}

/// Infer a document's outline and resolve targets in one step.
pub fn process_document(
    document: &DocumentText,
    schema: &TargetSchema,
    options: &OutlineOptions,
) -> Result<Vec<TargetMatch>> {
    let tree = build_outline(document, options)?;
    Ok(resolve_targets(schema, &tree))
}

/// Process many documents in parallel against one shared schema.
///
/// Results line up with the input slice; a failure on one document never
/// affects the others.
pub fn process_batch(
    documents: &[DocumentText],
    schema: &TargetSchema,
    options: &OutlineOptions,
) -> Vec<Result<Vec<TargetMatch>>> {
    documents
        .par_iter()
        .map(|document| process_document(document, schema, options))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_rejected() {
        let document = DocumentText::new("空文档", Vec::new());
        let result = build_outline(&document, &OutlineOptions::default());
        assert!(matches!(result, Err(Error::EmptyDocument)));
    }

    #[test]
    fn test_batch_results_align_with_inputs() {
        let schema = TargetSchema::new(vec![TargetNode::new("第一节 重要提示")]).unwrap();
        let options = OutlineOptions::default();
        let documents = vec![
            DocumentText::new("空文档", Vec::new()),
            DocumentText::new("另一个空文档", Vec::new()),
        ];

        let results = process_batch(&documents, &schema, &options);
        assert_eq!(results.len(), 2);
        for result in &results {
            assert!(matches!(result, Err(Error::EmptyDocument)));
        }
    }

    #[test]
    fn test_load_pages_roundtrip() {
        use std::io::Write;

        let json = r#"[
            {
                "page_number": 1,
                "width": 595.0,
                "blocks": [
                    {
                        "bbox": [90.0, 80.0, 300.0, 100.0],
                        "lines": [
                            {"x0": 90.0, "x1": 300.0, "size": 16.0, "text": "第一节 重要提示"}
                        ]
                    }
                ],
                "sizes_count": {"16.0": 8},
                "total_length": 8
            }
        ]"#;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{json}").unwrap();

        let pages = load_pages(file.path()).unwrap();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].number, 1);
        assert_eq!(pages[0].blocks[0].lines[0].text, "第一节 重要提示");
    }
}
