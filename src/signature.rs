//! Title style signatures.
//!
//! A [`TitleSignature`] is a comparable fingerprint of the stylistic shape of
//! a heading's leading characters (its numbering prefix). Headings at the
//! same nesting depth in a report share a prefix convention ("第一节 …",
//! "（一）…", "1、…"), so the tree builder compares signatures instead of
//! literal text when deciding whether two headings sit at the same level.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Maximum number of characters examined for the prefix.
const MAX_PREFIX_LEN: usize = 5;

/// CJK positional numerals recognized in heading prefixes.
const CJK_NUMERALS: &str = "零一二三四五六七八九十";

/// Characters that terminate a prefix and mark an enumerator ("、" / ".").
const SEPARATORS: [char; 2] = ['、', '.'];

/// Closing brackets, half- and full-width.
const CLOSE_BRACKETS: [char; 2] = [')', '）'];

struct Patterns {
    /// "第" + CJK numeral + "节"/"章" at the start of the prefix.
    root_marker: Regex,
    /// A bracket pair fully enclosing the start of the prefix.
    full_bracket: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        root_marker: Regex::new(&format!("^第[{CJK_NUMERALS}]+[节章]")).unwrap(),
        full_bracket: Regex::new("^[(（].*?[)）]").unwrap(),
    })
}

/// Style fingerprint of a heading prefix.
///
/// Two signatures are equal iff every encoded feature matches. A signature
/// with no features ([`TitleSignature::is_empty`]) is the shape of plain
/// body text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TitleSignature(u8);

impl TitleSignature {
    /// Prefix starts with a chapter/section root marker ("第X节").
    const ROOT_MARKER: u8 = 1;
    /// Prefix contains a CJK positional numeral.
    const NUMERAL: u8 = 1 << 1;
    /// Prefix contains a closing bracket.
    const BRACKET: u8 = 1 << 2;
    /// A bracket pair fully wraps the numbered part of the prefix.
    const FULL_BRACKET: u8 = 1 << 3;
    /// Prefix contains an enumerator separator.
    const SEPARATOR: u8 = 1 << 4;
    /// Reserved for the synthetic tree root, never produced by `classify`.
    const SENTINEL: u8 = 1 << 7;

    /// The signature of featureless (body-styled) text.
    pub const EMPTY: TitleSignature = TitleSignature(0);

    /// Signature of the synthetic outline root.
    ///
    /// Compares unequal to every value `classify` can return, including the
    /// empty one, so the first real heading is always attached below root.
    pub fn sentinel() -> Self {
        TitleSignature(Self::SENTINEL)
    }

    /// Whether no stylistic feature was detected.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Whether the prefix carried a "第X节"-style root marker.
    pub fn has_root_marker(self) -> bool {
        self.0 & Self::ROOT_MARKER != 0
    }

    /// Whether the prefix carried a bracket.
    pub fn has_bracket(self) -> bool {
        self.0 & Self::BRACKET != 0
    }
}

/// Classify a heading text into its style signature.
///
/// Only the first [`MAX_PREFIX_LEN`] characters are examined, and scanning
/// stops one past the first separator, closing bracket, or whitespace. Text
/// beyond the prefix never influences the result.
///
/// Returns [`Error::EmptyTitle`] if `text` is empty after trimming.
pub fn classify(text: &str) -> Result<TitleSignature> {
    let text = text.trim_start();
    if text.trim().is_empty() {
        return Err(Error::EmptyTitle);
    }

    let prefix = title_prefix(text);
    let patterns = patterns();

    let mut bits = 0u8;
    if patterns.root_marker.is_match(&prefix) {
        bits |= TitleSignature::ROOT_MARKER;
    }
    if prefix.chars().any(is_cjk_numeral) {
        bits |= TitleSignature::NUMERAL;
    }
    // Full wrap takes precedence; a lone closing bracket (opening bracket
    // absent or outside the prefix) still counts as bracketed.
    if patterns.full_bracket.is_match(&prefix) {
        bits |= TitleSignature::BRACKET | TitleSignature::FULL_BRACKET;
    } else if prefix.contains(CLOSE_BRACKETS) {
        bits |= TitleSignature::BRACKET;
    }
    if prefix.contains(SEPARATORS) {
        bits |= TitleSignature::SEPARATOR;
    }

    Ok(TitleSignature(bits))
}

/// Whether a text begins with a chapter/section root marker ("第X节").
pub fn is_root_title(text: &str) -> bool {
    patterns().root_marker.is_match(text.trim_start())
}

/// Extract the prefix: up to `MAX_PREFIX_LEN` characters, cut one past the
/// first separator, closing bracket, or whitespace.
fn title_prefix(text: &str) -> String {
    let mut prefix = String::new();
    for (i, ch) in text.chars().enumerate() {
        if i >= MAX_PREFIX_LEN {
            break;
        }
        prefix.push(ch);
        if SEPARATORS.contains(&ch) || CLOSE_BRACKETS.contains(&ch) || ch.is_whitespace() {
            break;
        }
    }
    prefix
}

fn is_cjk_numeral(ch: char) -> bool {
    CJK_NUMERALS.contains(ch)
}
