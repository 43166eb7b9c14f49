//! docsift-pipeline
//!
//! Document in, ranked sentences out: segment → page mapping → corpus →
//! ranking index, held together for the lifetime of a retrieval session.

use anyhow::Result;
use tracing::info;

use docsift_core::config::{RankingConfig, Settings};
use docsift_core::document_store::DocumentStore;
use docsift_core::traits::{Retriever, SentenceSplitter};
use docsift_core::types::{Document, RankedSentence};
use docsift_rank::RankingEngine;
use docsift_text::{Corpus, CorpusIndexBuilder, PageMapper, RuleSplitter, SentenceSegmenter};

pub struct SentenceRetriever {
    engine: RankingEngine,
}

impl SentenceRetriever {
    pub fn build(document: &Document, segmenter: &SentenceSegmenter, ranking: &RankingConfig) -> Result<Self> {
        let segments = segmenter.segment(&document.text);
        let sentences = PageMapper::new(&document.page_ranges).assign(segments);
        let corpus = CorpusIndexBuilder::build(sentences);
        let engine = RankingEngine::index(corpus, ranking)?;
        info!(sentences = engine.corpus().len(), backend = ?ranking.backend, "retriever ready");
        Ok(Self { engine })
    }

    /// Build for `filename` from a store, with the rule-based splitter configured by `settings`.
    pub fn from_store(store: &DocumentStore, filename: &str, settings: &Settings) -> Result<Self> {
        let document = store.get(filename)?;
        let segmenter = default_segmenter(settings);
        Self::build(document, &segmenter, &settings.ranking)
    }

    pub fn corpus(&self) -> &Corpus { self.engine.corpus() }

    pub fn score_all(&self, query: &str) -> Result<Vec<f64>> { self.engine.score_all(query) }

    pub fn predict(&self, query: &str, top_n: usize) -> Result<Vec<RankedSentence>> { self.engine.predict(query, top_n) }
}

impl Retriever for SentenceRetriever {
    fn predict(&self, query: &str, top_n: usize) -> Result<Vec<RankedSentence>> { Self::predict(self, query, top_n) }
}

pub fn default_segmenter(settings: &Settings) -> SentenceSegmenter {
    let splitter: Box<dyn SentenceSplitter> = Box::new(RuleSplitter::from_config(&settings.segmenter));
    SentenceSegmenter::new(splitter)
}
