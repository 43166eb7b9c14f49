//! docsift-rank
//!
//! Ranking models over a sentence corpus: an in-memory BM25 Okapi model and a
//! tantivy-backed alternative, plus the `RankingEngine` that attaches page
//! provenance to ranked sentences.

pub mod bm25;
pub mod engine;
pub mod tantivy_ranker;
pub mod tantivy_utils;

pub use bm25::{Bm25Okapi, Bm25Params};
pub use engine::{build_ranker, RankingEngine};
pub use tantivy_ranker::TantivyRanker;
