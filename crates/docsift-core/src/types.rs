//! Domain types shared by the segmentation, ranking and pipeline crates.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub type SentenceId = usize;
pub type PageNumber = u32;

/// Page number assigned when no page range could be resolved for a sentence.
pub const UNRESOLVED_PAGE: PageNumber = 0;

/// Inclusive `[start, end]` character offsets.
///
/// Used both for sentence spans within a document's full text and for the
/// per-page offset table supplied with a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[usize; 2]", into = "[usize; 2]")]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self { Self { start, end } }

    /// True when `other` lies entirely inside `self`.
    pub fn contains(&self, other: &Span) -> bool { other.start >= self.start && other.end <= self.end }

    /// True when `other` starts inside `self` and runs to or past its end.
    pub fn overflows_into_next(&self, other: &Span) -> bool {
        other.start >= self.start && other.start <= self.end && other.end >= self.end
    }
}

impl From<[usize; 2]> for Span {
    fn from([start, end]: [usize; 2]) -> Self { Self { start, end } }
}

impl From<Span> for [usize; 2] {
    fn from(s: Span) -> Self { [s.start, s.end] }
}

/// A page's offset range within the full document text.
pub type PageRange = Span;

/// Raw text plus the per-page offset table, as handed over by the page source.
///
/// The JSON shape is `{ "text": "...", "token_indices_per_page": [[s, e], ...] }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub text: String,
    #[serde(rename = "token_indices_per_page", default)]
    pub page_ranges: Vec<PageRange>,
}

impl Document {
    pub fn new(text: impl Into<String>, page_ranges: Vec<PageRange>) -> Self {
        Self { text: text.into(), page_ranges }
    }

    pub fn page_count(&self) -> usize { self.page_ranges.len() }
}

/// A sentence produced by segmentation, before it is placed on a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub span: Span,
}

/// A sentence with its resolved page.
///
/// `page` is 1-based; [`UNRESOLVED_PAGE`] marks a sentence that matched no range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    pub text: String,
    pub span: Span,
    pub page: PageNumber,
}

/// Sentence text → id, last write wins on duplicate text.
pub type IdMap = HashMap<String, SentenceId>;
/// Sentence text → page, last write wins on duplicate text.
pub type PageMap = HashMap<String, PageNumber>;

/// One retrieved sentence with its score and provenance.
///
/// `score` is ranker-specific but higher is always better.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedSentence {
    pub text: String,
    pub score: f64,
    pub page: PageNumber,
}
