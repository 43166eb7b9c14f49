use docsift_core::traits::SentenceSplitter;
use docsift_core::types::{Segment, Span};
use tracing::info;

/// Splits document text into sentences and reconstructs their spans.
///
/// Spans are not searched for in the source text. They are rebuilt from a
/// running cursor that assumes exactly one separator character between
/// consecutive sentences: a sentence of `L` chars starting at `c` covers
/// `[c, c + L - 1]` and the next one starts at `c + L + 1`. Text with runs of
/// whitespace between sentences therefore drifts away from the true offsets.
pub struct SentenceSegmenter {
    splitter: Box<dyn SentenceSplitter>,
}

impl SentenceSegmenter {
    pub fn new(splitter: Box<dyn SentenceSplitter>) -> Self { Self { splitter } }

    pub fn segment(&self, text: &str) -> Segments {
        let sentences = self.splitter.split(text);
        info!(sentences = sentences.len(), "segmented document");
        Segments { sentences: sentences.into_iter(), cursor: 0 }
    }
}

/// Lazily assigns spans to split sentences. Clone it to iterate again.
#[derive(Debug, Clone)]
pub struct Segments {
    sentences: std::vec::IntoIter<String>,
    cursor: usize,
}

impl Iterator for Segments {
    type Item = Segment;

    fn next(&mut self) -> Option<Segment> {
        loop {
            let text = self.sentences.next()?;
            let len = text.chars().count();
            // An empty sentence would span [c, c - 1]; it is dropped but still consumes its separator.
            if len == 0 {
                self.cursor += 1;
                continue;
            }
            let start = self.cursor;
            let end = start + len - 1;
            self.cursor = end + 2;
            return Some(Segment { text, span: Span::new(start, end) });
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) { (0, Some(self.sentences.len())) }
}
