//! Splits a raw action bar line into whitespace-delimited segments.

use std::borrow::Cow;

use crate::text::strip_formatting;

/// Three spaces separate segments in the raw line. Wider gaps leave blank
/// pieces behind, which are discarded.
pub const SEGMENT_SEPARATOR: &str = "   ";

/// One unit of the action bar line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment<'a> {
    /// Original text, style codes included (used verbatim in rewritten output)
    pub styled: &'a str,
    /// Style codes removed (used for classification and parsing)
    pub plain: Cow<'a, str>,
}

impl<'a> Segment<'a> {
    pub fn new(styled: &'a str) -> Self {
        Self {
            styled,
            plain: strip_formatting(styled),
        }
    }
}

/// Split `line` into trimmed, non-empty segments in their original order.
pub fn segment(line: &str) -> Vec<Segment<'_>> {
    line.split(SEGMENT_SEPARATOR)
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(Segment::new)
        .collect()
}
