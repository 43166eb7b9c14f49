//! docsift-text
//!
//! Turns a document's raw text into a sentence corpus: rule-based sentence
//! splitting, cursor-based span reconstruction, page resolution against the
//! document's page table, and the id/page lookup tables used at query time.

pub mod corpus;
pub mod pages;
pub mod segment;
pub mod splitter;

pub use corpus::{tokenize, Corpus, CorpusIndexBuilder};
pub use pages::PageMapper;
pub use segment::{Segments, SentenceSegmenter};
pub use splitter::RuleSplitter;
