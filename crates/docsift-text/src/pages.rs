//! Sentence → page resolution against a document's page offset table.
//!
//! Resolution order for a sentence span `s`:
//! 1. a page that fully contains `s`; when several do, the last one wins;
//! 2. otherwise the first page that contains `s.start` while `s.end` runs
//!    to or past that page's end (a sentence straddling a page break);
//! 3. otherwise [`UNRESOLVED_PAGE`].
//!
//! Both passes are linear scans over the page table.

use docsift_core::types::{PageNumber, PageRange, Segment, Sentence, Span, UNRESOLVED_PAGE};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy)]
pub struct PageMapper<'a> {
    pages: &'a [PageRange],
}

impl<'a> PageMapper<'a> {
    pub fn new(pages: &'a [PageRange]) -> Self { Self { pages } }

    pub fn page_count(&self) -> usize { self.pages.len() }

    pub fn page_of(&self, span: &Span) -> PageNumber {
        let contained = self.pages.iter().rposition(|page| page.contains(span));
        let index = contained.or_else(|| self.pages.iter().position(|page| page.overflows_into_next(span)));
        match index {
            Some(i) => to_page_number(i),
            None => UNRESOLVED_PAGE,
        }
    }

    /// One page number per input span, in input order.
    pub fn map_pages<'s, I>(&self, spans: I) -> Vec<PageNumber>
    where
        I: IntoIterator<Item = &'s Span>,
    {
        spans.into_iter().map(|span| self.page_of(span)).collect()
    }

    /// Attach pages to segmented sentences.
    pub fn assign<I>(&self, segments: I) -> Vec<Sentence>
    where
        I: IntoIterator<Item = Segment>,
    {
        info!(pages = self.pages.len(), "total pages in document");
        let mut unresolved = 0usize;
        let sentences: Vec<Sentence> = segments
            .into_iter()
            .map(|Segment { text, span }| {
                let page = self.page_of(&span);
                debug!(start = span.start, end = span.end, page, "resolved sentence page");
                if page == UNRESOLVED_PAGE { unresolved += 1; }
                Sentence { text, span, page }
            })
            .collect();
        if unresolved > 0 {
            warn!(unresolved, total = sentences.len(), "sentences without a resolvable page");
        }
        sentences
    }
}

fn to_page_number(index: usize) -> PageNumber { PageNumber::try_from(index + 1).unwrap_or(PageNumber::MAX) }
