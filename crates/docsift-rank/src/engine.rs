use anyhow::{anyhow, Result};
use tracing::{debug, info};

use docsift_core::config::{RankingBackend, RankingConfig};
use docsift_core::error::Error;
use docsift_core::traits::Ranker;
use docsift_core::types::RankedSentence;
use docsift_text::{tokenize, Corpus};

use crate::bm25::{Bm25Okapi, Bm25Params};
use crate::tantivy_ranker::TantivyRanker;

/// Build the configured ranking model over a tokenized corpus.
pub fn build_ranker<D, T>(config: &RankingConfig, tokenized_corpus: &[D]) -> Result<Box<dyn Ranker>>
where
    D: AsRef<[T]>,
    T: AsRef<str>,
{
    let ranker: Box<dyn Ranker> = match config.backend {
        RankingBackend::Okapi => Box::new(Bm25Okapi::new(tokenized_corpus, Bm25Params::from(config))),
        RankingBackend::Tantivy => Box::new(TantivyRanker::new(tokenized_corpus)?),
    };
    Ok(ranker)
}

/// A sentence corpus and the ranking model built over it. Immutable once indexed.
pub struct RankingEngine {
    corpus: Corpus,
    ranker: Box<dyn Ranker>,
}

impl RankingEngine {
    pub fn index(corpus: Corpus, config: &RankingConfig) -> Result<Self> {
        let ranker = build_ranker(config, &corpus.tokenized())?;
        Self::with_ranker(corpus, ranker)
    }

    /// Pair a corpus with an already built ranker; both must cover the same documents.
    pub fn with_ranker(corpus: Corpus, ranker: Box<dyn Ranker>) -> Result<Self> {
        if ranker.len() != corpus.len() {
            return Err(Error::Ranking(format!("ranker covers {} documents but corpus has {}", ranker.len(), corpus.len())).into());
        }
        Ok(Self { corpus, ranker })
    }

    pub fn corpus(&self) -> &Corpus { &self.corpus }

    /// Raw score of every corpus document, in corpus order.
    pub fn score_all(&self, query: &str) -> Result<Vec<f64>> {
        let scores = self.ranker.score(&tokenize(query))?;
        info!(documents = scores.len(), "scores available");
        Ok(scores)
    }

    /// Best `top_n` sentences for `query` with score and page provenance.
    ///
    /// Requests larger than the corpus return every sentence. Score and page
    /// are looked up by sentence text, so duplicated sentences report the
    /// values of their last occurrence.
    pub fn predict(&self, query: &str, top_n: usize) -> Result<Vec<RankedSentence>> {
        let scores = self.score_all(query)?;
        let top = docsift_core::traits::rank_positions(&scores, top_n);
        let mut results = Vec::with_capacity(top.len());
        for position in top {
            let sentence = self.corpus.get(position).ok_or_else(|| anyhow!("ranker returned unknown position {}", position))?;
            let text = sentence.text.as_str();
            let id = self.corpus.id_of(text).ok_or_else(|| anyhow!("sentence missing from id map: {:?}", text))?;
            let page = self.corpus.page_of(text).ok_or_else(|| anyhow!("sentence missing from page map: {:?}", text))?;
            debug!(position, id, page, score = scores[id], "ranked sentence");
            results.push(RankedSentence { text: text.to_string(), score: scores[id], page });
        }
        Ok(results)
    }
}

impl docsift_core::traits::Retriever for RankingEngine {
    fn predict(&self, query: &str, top_n: usize) -> Result<Vec<RankedSentence>> { Self::predict(self, query, top_n) }
}
